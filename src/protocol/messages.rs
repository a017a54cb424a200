//! Request and response bodies of the quiz API.
//!
//! All bodies are JSON. Failed lookups come back as `{ "error": "..." }`,
//! usually with a 404 status, so every response type has an error variant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::models::{AnswerSet, Question};

/// Default API root, matching the stock server bind address.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Bounds for the number of questions in random mode.
pub const MIN_QUESTION_COUNT: usize = 1;
pub const MAX_QUESTION_COUNT: usize = 100;

/// Default number of random questions.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// How the question batch is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    /// `count` questions drawn at random.
    Random { count: usize },
    /// Every question of the category, in bank order.
    Sequential,
}

/// What the user asked for when starting a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSetup {
    pub category: String,
    pub mode: QuizMode,
}

impl QuizSetup {
    pub fn random(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            mode: QuizMode::Random { count },
        }
    }

    pub fn sequential(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            mode: QuizMode::Sequential,
        }
    }

    /// Checks the setup before any request is issued.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.category.trim().is_empty() {
            return Err(QuizError::InvalidConfiguration(
                "select a question bank first".to_string(),
            ));
        }
        if let QuizMode::Random { count } = self.mode {
            validate_count(count)?;
        }
        Ok(())
    }
}

/// Validates a random-mode question count.
pub fn validate_count(count: usize) -> Result<(), QuizError> {
    if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&count) {
        return Err(QuizError::InvalidConfiguration(format!(
            "question count must be between {} and {}",
            MIN_QUESTION_COUNT, MAX_QUESTION_COUNT
        )));
    }
    Ok(())
}

/// A question bank and how many questions it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
    pub count: Option<usize>,
}

/// Body of `GET /categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    #[serde(default)]
    pub counts: HashMap<String, usize>,
}

impl CategoriesResponse {
    /// Categories in server order, with their sizes attached.
    pub fn into_categories(mut self) -> Vec<CategoryInfo> {
        self.categories
            .into_iter()
            .map(|name| {
                let count = self.counts.remove(&name);
                CategoryInfo { name, count }
            })
            .collect()
    }
}

/// Body of `GET /random_questions` and `GET /sequential_questions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionsResponse {
    Error { error: String },
    Questions { questions: Vec<Question> },
}

impl QuestionsResponse {
    pub fn into_result(self) -> Result<Vec<Question>, QuizError> {
        match self {
            QuestionsResponse::Error { error } => Err(QuizError::ServerReported(error)),
            QuestionsResponse::Questions { questions } => Ok(questions),
        }
    }
}

/// Body of `POST /check_answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckAnswerRequest {
    pub category: String,
    pub question_id: String,
    /// Canonical letters, sorted.
    pub answer: AnswerSet,
}

/// Grading of one submission. Answers are in canonical letters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    pub correct_answer: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Response of `POST /check_answer`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CheckAnswerResponse {
    Error { error: String },
    Verdict(Verdict),
}

impl CheckAnswerResponse {
    pub fn into_result(self) -> Result<Verdict, QuizError> {
        match self {
            CheckAnswerResponse::Error { error } => Err(QuizError::ServerReported(error)),
            CheckAnswerResponse::Verdict(verdict) => Ok(verdict),
        }
    }
}
