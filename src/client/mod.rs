//! Terminal quiz client.
//!
//! Talks to the quiz API over HTTP and renders with ratatui.

mod client;
mod state;
mod ui;

pub use client::run;
pub use state::{ClientApp, ClientState, QuizView, Request, Response, SetupForm};
