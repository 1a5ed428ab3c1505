pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod recommendation;

pub use metrics::{get_metrics, init_metrics};
pub use prompt::PromptTemplate;
pub use recommendation::{RecommendationError, RecommendationService};
