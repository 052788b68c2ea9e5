use serde::Deserialize;
use validator::Validate;

/// Body of the analysis endpoint: the user's natural-language question.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
}
