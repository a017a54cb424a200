//! Wire types of the quiz API.

mod messages;

pub use messages::*;
