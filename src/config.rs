//! Client settings.

use reqwest::Url;

use crate::error::QuizError;
use crate::protocol::{DEFAULT_API_BASE, DEFAULT_QUESTION_COUNT, validate_count};

/// Settings the terminal client starts with.
///
/// Everything except `api_base` is only a default for the setup screen and can
/// be changed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the quiz API, e.g. `http://localhost:5000/api`.
    pub api_base: String,
    /// Question bank preselected on the setup screen.
    pub category: Option<String>,
    pub count: usize,
    pub sequential: bool,
    pub shuffle: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            category: None,
            count: DEFAULT_QUESTION_COUNT,
            sequential: false,
            shuffle: false,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), QuizError> {
        let url = Url::parse(&self.api_base).map_err(|e| {
            QuizError::InvalidConfiguration(format!("invalid API base {:?}: {}", self.api_base, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(QuizError::InvalidConfiguration(format!(
                "API base must be an http or https URL, got {:?}",
                self.api_base
            )));
        }
        if !self.sequential {
            validate_count(self.count)?;
        }
        Ok(())
    }
}
