//! Error type shared by the session core, the API client and the terminal UI.

use std::io;

use thiserror::Error;

/// Errors surfaced by quiz operations.
///
/// Everything except [`QuizError::Io`] is recoverable: the client shows the
/// message and lets the user retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// A request to the quiz API failed or returned an unreadable body.
    #[error("cannot reach the quiz server: {0}")]
    NetworkUnavailable(#[from] reqwest::Error),

    /// The quiz setup was rejected before any request was issued.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// The API answered with an `error` field, shown to the user as sent.
    #[error("{0}")]
    ServerReported(String),

    /// Submit attempted without a selected option.
    #[error("select an answer first")]
    NoSelection,

    /// The API returned an empty question batch.
    #[error("the server returned no questions for this category")]
    NoQuestions,

    /// An answer string contained something other than the letters A-D.
    #[error("invalid answer {0:?}")]
    InvalidAnswer(String),

    /// Terminal IO failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
