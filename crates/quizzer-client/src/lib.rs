//! Quizzer Client - HTTP client for the Quizzer backend API
//!
//! Used by the professor console to:
//! - Create quizzes and their sections
//! - Submit AI generation jobs and poll their status
//! - Edit, regenerate, approve, and delete generated questions
//! - Publish a finished quiz

use reqwest::Client;
use tracing::{info, warn};
use uuid::Uuid;

pub mod types;
pub use types::*;

/// Error types for Quizzer client operations
#[derive(Debug, thiserror::Error)]
pub enum QuizzerClientError {
    #[error("Quizzer backend not reachable at {0}")]
    NotReachable(String),
    #[error("{0}")]
    Api(String),
    #[error("Failed to parse Quizzer response: {0}")]
    Parse(String),
}

/// Client for the Quizzer backend API
#[derive(Clone)]
pub struct QuizzerClient {
    base_url: String,
    client: Client,
}

impl QuizzerClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Build a client from `QUIZZER_API_URL`, defaulting to localhost
    pub fn from_env() -> Self {
        let url =
            std::env::var("QUIZZER_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        Self::new(&url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the backend is reachable
    pub async fn is_running(&self) -> bool {
        self.health_check().await.is_ok()
    }

    /// Health check
    pub async fn health_check(&self) -> Result<HealthResponse, QuizzerClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| QuizzerClientError::NotReachable(self.base_url.clone()))?;

        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    // ─── Quiz Operations ──────────────────────────────────────────────────

    /// Create a quiz entity
    pub async fn create_quiz(&self, req: CreateQuizRequest) -> Result<Quiz, QuizzerClientError> {
        let url = format!("{}/quizzes/", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        let resp = Self::check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    /// Get a quiz (including its AI generation status)
    pub async fn get_quiz(&self, quiz_id: Uuid) -> Result<Quiz, QuizzerClientError> {
        let url = format!("{}/quizzes/{}", self.base_url, quiz_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        let resp = Self::check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    /// Create a section under a quiz
    pub async fn create_section(
        &self,
        quiz_id: Uuid,
        req: CreateSectionRequest,
    ) -> Result<Section, QuizzerClientError> {
        let url = format!("{}/quizzes/{}/sections", self.base_url, quiz_id);
        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        let resp = Self::check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    /// Submit an AI generation job for a quiz
    pub async fn submit_generation(
        &self,
        quiz_id: Uuid,
        req: GenerateRequest,
    ) -> Result<GenerateResponse, QuizzerClientError> {
        let url = format!("{}/quizzes/{}/generate-ai", self.base_url, quiz_id);
        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        let resp = Self::check_status(resp).await?;
        info!("[CLIENT] generation job accepted for quiz {}", quiz_id);
        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    /// Publish a quiz, making it available to students
    pub async fn publish_quiz(&self, quiz_id: Uuid) -> Result<PublishResponse, QuizzerClientError> {
        let url = format!("{}/quizzes/{}/publish", self.base_url, quiz_id);
        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        let resp = Self::check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    // ─── Review Operations ────────────────────────────────────────────────

    /// Get all generated questions for a quiz
    pub async fn get_questions(&self, quiz_id: Uuid) -> Result<Vec<Question>, QuizzerClientError> {
        let url = format!("{}/review/{}", self.base_url, quiz_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        let resp = Self::check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    /// Update a question; only the populated fields of the patch are sent
    pub async fn update_question(
        &self,
        question_id: Uuid,
        patch: UpdateQuestionRequest,
    ) -> Result<(), QuizzerClientError> {
        let url = format!("{}/questions/{}", self.base_url, question_id);
        let resp = self
            .client
            .patch(&url)
            .json(&patch)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        Self::check_status(resp).await?;
        Ok(())
    }

    /// Delete a question
    pub async fn delete_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        let url = format!("{}/questions/{}", self.base_url, question_id);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        Self::check_status(resp).await?;
        Ok(())
    }

    /// Regenerate a single question's content in place
    pub async fn regenerate_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        let url = format!("{}/questions/{}/regenerate", self.base_url, question_id);
        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        Self::check_status(resp).await?;
        Ok(())
    }

    /// Create a question manually
    pub async fn create_question(
        &self,
        req: CreateQuestionRequest,
    ) -> Result<Question, QuizzerClientError> {
        let url = format!("{}/questions/", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        let resp = Self::check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| QuizzerClientError::Parse(e.to_string()))
    }

    /// Approve a question for publication
    pub async fn approve_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        let url = format!("{}/review/approve/{}", self.base_url, question_id);
        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| QuizzerClientError::Api(e.to_string()))?;

        Self::check_status(resp).await?;
        Ok(())
    }

    /// Map a non-2xx response to an `Api` error carrying the backend's
    /// `detail` message when the body parses, else a generic HTTP message.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, QuizzerClientError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let detail = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|d| d.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| format!("Request failed with HTTP {}", status));
        Err(QuizzerClientError::Api(detail))
    }
}

/// Try to connect to the Quizzer backend, returning a client if reachable
pub async fn try_connect() -> Option<QuizzerClient> {
    let client = QuizzerClient::from_env();
    match client.health_check().await {
        Ok(health) => {
            info!("Connected to Quizzer backend ({})", health.status);
            Some(client)
        }
        Err(e) => {
            warn!("Quizzer backend not available at {}: {}", client.base_url(), e);
            None
        }
    }
}
