//! # quiz-bank
//!
//! A terminal client for question-bank quiz servers.
//!
//! The crate is split into a pure session core and the pieces around it:
//!
//! - [`session`]: answers, grading tally, shuffled option order and the
//!   page navigator. No IO.
//! - [`api`]: HTTP client for the quiz API.
//! - [`client`]: the ratatui front end tying the two together.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_bank::{ClientConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = ClientConfig {
//!         api_base: "http://localhost:5000/api".to_string(),
//!         shuffle: true,
//!         ..ClientConfig::default()
//!     };
//!     quiz_bank::client::run(config).await
//! }
//! ```
//!
//! The session core can be driven directly:
//!
//! ```rust
//! use quiz_bank::models::{Letter, OptionTexts, Question, QuestionKind};
//! use quiz_bank::protocol::QuizSetup;
//! use quiz_bank::session::Session;
//!
//! let question = Question {
//!     id: "1".to_string(),
//!     kind: QuestionKind::Single,
//!     text: "Which layer routes packets?".to_string(),
//!     chapter: "2".to_string(),
//!     code: "NET-1".to_string(),
//!     options: [
//!         (Letter::A, "Link".to_string()),
//!         (Letter::B, "Network".to_string()),
//!     ]
//!     .into_iter()
//!     .collect::<OptionTexts>(),
//!     image: None,
//!     answered: false,
//! };
//!
//! let mut session = Session::start(QuizSetup::random("networking", 1), vec![question], false)?;
//! session.record_selection(Letter::B);
//! let submission = session.prepare_submission()?;
//! assert_eq!(submission.request.answer.to_string(), "B");
//! # Ok::<(), quiz_bank::QuizError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
mod error;
pub mod models;
pub mod protocol;
pub mod session;
pub mod terminal;

pub use config::ClientConfig;
pub use error::QuizError;
