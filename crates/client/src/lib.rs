//! Typed client for the training API.
//!
//! Mirrors the data the training UI fetches: a user's aggregated progress,
//! their attempt history, the scenario catalogue, and attempt submission.
//! Every response envelope is unwrapped into a plain `Result`.

pub mod error;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use storage::{
    dto::{
        attempt::CreateAttemptRequest, common::ApiResponse, progress::ProgressSummary,
        scenario::ScenarioFilter,
    },
    models::{Attempt, AttemptWithScenario, Scenario},
};
use uuid::Uuid;

pub use error::{ClientError, Result};

pub struct TrainingClient {
    base_url: String,
    client: reqwest::Client,
}

impl TrainingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lift-planner-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Aggregated statistics over every attempt the user has made
    pub async fn progress(&self, user_id: Uuid) -> Result<ProgressSummary> {
        let request = self
            .client
            .get(self.url("/api/training/progress"))
            .query(&[("userId", user_id)]);

        self.send(request).await
    }

    /// The user's attempts, most recent first
    pub async fn attempts(
        &self,
        user_id: Uuid,
        scenario_id: Option<Uuid>,
    ) -> Result<Vec<AttemptWithScenario>> {
        let mut request = self
            .client
            .get(self.url("/api/training/attempts"))
            .query(&[("userId", user_id)]);

        if let Some(scenario_id) = scenario_id {
            request = request.query(&[("scenarioId", scenario_id)]);
        }

        self.send(request).await
    }

    pub async fn record_attempt(&self, attempt: &CreateAttemptRequest) -> Result<Attempt> {
        let request = self
            .client
            .post(self.url("/api/training/attempts"))
            .json(attempt);

        self.send(request).await
    }

    pub async fn scenarios(&self, filter: &ScenarioFilter) -> Result<Vec<Scenario>> {
        let request = self.client.get(self.url("/api/scenarios")).query(filter);

        self.send(request).await
    }

    pub async fn scenario(&self, scenario_id: Uuid) -> Result<Scenario> {
        let request = self
            .client
            .get(self.url(&format!("/api/scenarios/{}", scenario_id)));

        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Training API response");

        decode_envelope(status, &body)
    }
}

/// Unwrap an API envelope into its payload or a `ClientError::Api`
pub fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    let envelope: ApiResponse<T> =
        serde_json::from_slice(body).map_err(|source| ClientError::Parse {
            status: status.as_u16(),
            source,
        })?;

    envelope
        .into_result()
        .map_err(|(code, message)| ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
}
