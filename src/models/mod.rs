mod answer;
mod question;

pub use answer::{AnswerSet, Letter};
pub use question::{OptionTexts, Question, QuestionKind};
