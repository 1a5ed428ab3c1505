//! Recommendation prompt template.
//!
//! A template is parsed once into literal text and two placeholders,
//! `{favorite_menu}` and `{todays_menu}`. Rendering walks the segments in a
//! single pass, so menu items that happen to contain placeholder text are
//! copied verbatim rather than substituted again.

use thiserror::Error;

pub const FAVORITE_MENU_PLACEHOLDER: &str = "{favorite_menu}";
pub const TODAYS_MENU_PLACEHOLDER: &str = "{todays_menu}";

const MENU_SEPARATOR: &str = ", ";

pub const DEFAULT_TEMPLATE: &str = "You are a helpful food recommendation assistant. Your task is to suggest exactly one dish from today's menu based on the user's preferences.

User's favorite meals: {favorite_menu}

Today's available meals: {todays_menu}

Based on the user's favorite meals, please recommend exactly ONE meal from today's available options. 
Consider:
- Similarity to the user's favorite meals
- Flavor profiles that match their preferences
- Availability in today's menu

IMPORTANT: You must respond with ONLY the exact name of one dish from today's menu. Do not include any explanations, additional text, punctuation, or formatting. Just return the dish name exactly as it appears in today's menu.

Example format: Spaghetti Carbonara

Recommendation:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template must contain {placeholder} exactly once (found {count})")]
    PlaceholderCount {
        placeholder: &'static str,
        count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    FavoriteMenu,
    TodaysMenu,
}

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        // The built-in text carries each placeholder once.
        Self {
            segments: split_segments(DEFAULT_TEMPLATE),
        }
    }
}

impl PromptTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        for placeholder in [FAVORITE_MENU_PLACEHOLDER, TODAYS_MENU_PLACEHOLDER] {
            let count = template.matches(placeholder).count();
            if count != 1 {
                return Err(TemplateError::PlaceholderCount { placeholder, count });
            }
        }

        Ok(Self {
            segments: split_segments(template),
        })
    }

    /// Join each menu with `", "` and substitute into the template.
    pub fn render<S: AsRef<str>>(&self, favorite_menu: &[S], todays_menu: &[S]) -> String {
        let favorites = join_menu(favorite_menu);
        let todays = join_menu(todays_menu);

        let mut prompt = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => prompt.push_str(text),
                Segment::FavoriteMenu => prompt.push_str(&favorites),
                Segment::TodaysMenu => prompt.push_str(&todays),
            }
        }
        prompt
    }
}

fn join_menu<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(MENU_SEPARATOR)
}

fn split_segments(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = template;

    loop {
        let next = [
            (FAVORITE_MENU_PLACEHOLDER, Segment::FavoriteMenu),
            (TODAYS_MENU_PLACEHOLDER, Segment::TodaysMenu),
        ]
        .into_iter()
        .filter_map(|(placeholder, segment)| {
            rest.find(placeholder)
                .map(|at| (at, placeholder.len(), segment))
        })
        .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, len, segment)) => {
                if at > 0 {
                    segments.push(Segment::Literal(rest[..at].to_string()));
                }
                segments.push(segment);
                rest = &rest[at + len..];
            }
            None => {
                if !rest.is_empty() {
                    segments.push(Segment::Literal(rest.to_string()));
                }
                return segments;
            }
        }
    }
}
