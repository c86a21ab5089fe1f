use serde::{Deserialize, Serialize, Serializer, ser::Error as _};

/// Parameters for a single call to the completions endpoint.
///
/// Values are not range-checked; the server is the only validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    /// Sampling randomness. Must be finite to be encoded.
    #[serde(serialize_with = "finite_f64")]
    pub temperature: f64,
    pub max_tokens: i64,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f64,
        max_tokens: i64,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature,
            max_tokens,
        }
    }
}

/// JSON has no representation for NaN or infinity.
fn finite_f64<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "temperature must be a finite number, got {value}"
        )));
    }
    serializer.serialize_f64(*value)
}

/// Successful body returned by the completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    /// Always `text_completion` for this endpoint.
    pub object: String,
    /// Unix timestamp in seconds.
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub index: u32,
    /// e.g. `stop` or `length`.
    pub finish_reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
