//! HTTP client for the quiz API.

use log::debug;
use reqwest::Client;

use crate::error::QuizError;
use crate::models::Question;
use crate::protocol::{
    CategoriesResponse, CategoryInfo, CheckAnswerRequest, CheckAnswerResponse, QuestionsResponse,
    QuizMode, QuizSetup, Verdict,
};

/// Thin wrapper over the four API endpoints.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct QuizApi {
    client: Client,
    base_url: String,
}

impl QuizApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Lists the question banks.
    pub async fn categories(&self) -> Result<Vec<CategoryInfo>, QuizError> {
        let url = self.url("categories");
        debug!("GET {}", url);

        let response: CategoriesResponse = self.client.get(url).send().await?.json().await?;
        Ok(response.into_categories())
    }

    /// Fetches the question batch described by `setup`.
    pub async fn questions(&self, setup: &QuizSetup) -> Result<Vec<Question>, QuizError> {
        setup.validate()?;

        let request = match setup.mode {
            QuizMode::Random { count } => self
                .client
                .get(self.url("random_questions"))
                .query(&[("category", setup.category.as_str())])
                .query(&[("count", count)]),
            QuizMode::Sequential => self
                .client
                .get(self.url("sequential_questions"))
                .query(&[("category", setup.category.as_str())]),
        };
        debug!("fetching questions for {:?}", setup);

        let response: QuestionsResponse = request.send().await?.json().await?;
        let questions = response.into_result()?;
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(questions)
    }

    /// Grades one answer.
    pub async fn check_answer(&self, request: &CheckAnswerRequest) -> Result<Verdict, QuizError> {
        let url = self.url("check_answer");
        debug!(
            "POST {} question={} answer={}",
            url, request.question_id, request.answer
        );

        let response: CheckAnswerResponse = self
            .client
            .post(url)
            .json(request)
            .send()
            .await?
            .json()
            .await?;
        response.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = QuizApi::new("http://localhost:5000/api/");
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("categories"), "http://localhost:5000/api/categories");
    }

    #[tokio::test]
    async fn test_questions_rejects_bad_count_without_request() {
        // nothing listens on port 9; the setup must fail before connecting
        let api = QuizApi::new("http://127.0.0.1:9/api");
        let result = api.questions(&QuizSetup::random("networking", 0)).await;
        assert!(matches!(result, Err(QuizError::InvalidConfiguration(_))));
    }
}
