use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Request body of `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    /// User's favorite meal names.
    #[validate(length(min = 1, message = "favorite_menu cannot be empty"))]
    pub favorite_menu: Vec<String>,

    /// Today's available meal names.
    #[validate(length(min = 1, message = "todays_menu cannot be empty"))]
    pub todays_menu: Vec<String>,
}

/// Field order in which validation failures are reported.
const FIELD_ORDER: [&str; 2] = ["favorite_menu", "todays_menu"];

/// Message of the first failing field, in request field order.
pub fn first_field_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    FIELD_ORDER
        .iter()
        .find_map(|field| {
            field_errors
                .get(*field)
                .and_then(|errs| errs.first())
                .and_then(|err| err.message.as_ref())
                .map(|message| message.to_string())
        })
        .unwrap_or_else(|| errors.to_string())
}

/// Response body of `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendResponse {
    pub recommendation: String,
}
