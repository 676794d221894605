//! Backend API: the remote collaborator behind the dashboard.
//!
//! `BackendApi` is the seam between the workflow and the network. The
//! real `HttpBackend` speaks JSON over HTTP; tests substitute an
//! in-memory fake. Authentication, credential storage, and third-party
//! OAuth are opaque prerequisites assumed satisfied before any of
//! these operations run.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use pantheon_common::api::{
    BatchApplyOutcome, BatchSendOutcome, MessageDraft, XpAddOutcome,
};
use pantheon_common::config::BackendConfig;
use pantheon_common::types::{CalendarEvent, SkillBook, SkillKind, TaskCounters};

/// Backend errors at the HTTP boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Backend rejected the request: {0}")]
    Backend(String),
}

/// Operations the dashboard core is allowed to call on the backend.
/// Nothing else couples to the collaborator.
#[allow(async_fn_in_trait)]
pub trait BackendApi {
    /// Today's raw activity counters.
    async fn fetch_counters(&self) -> Result<TaskCounters, ApiError>;

    /// The current skill book snapshot.
    async fn fetch_skills(&self) -> Result<SkillBook, ApiError>;

    /// Apply to the given jobs in one batch.
    async fn submit_batch_apply(&self, ids: &[String]) -> Result<BatchApplyOutcome, ApiError>;

    /// Generate one outreach draft per target, without sending.
    async fn submit_draft_messages(&self, ids: &[String]) -> Result<Vec<MessageDraft>, ApiError>;

    /// Send previously generated drafts.
    async fn submit_send_messages(
        &self,
        drafts: &[MessageDraft],
    ) -> Result<BatchSendOutcome, ApiError>;

    /// Send a follow-up to already-contacted targets.
    async fn submit_follow_up(&self, ids: &[String]) -> Result<BatchSendOutcome, ApiError>;

    /// All synced calendar events.
    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, ApiError>;

    /// Grant XP manually; the external action that completes a manual
    /// quest.
    async fn add_xp(&self, skill: SkillKind, amount: u64) -> Result<XpAddOutcome, ApiError>;
}

/// HTTP implementation speaking JSON to the dashboard backend.
pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyRequest<'a> {
    job_ids: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftRequest<'a> {
    contact_ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    emails: &'a [MessageDraft],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FollowUpRequest<'a> {
    contacted_ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct XpAddRequest {
    skill: SkillKind,
    amount: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressEnvelope {
    daily_progress: TaskCounters,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    skills: SkillBook,
}

#[derive(Debug, Deserialize)]
struct DraftsEnvelope {
    drafts: Vec<MessageDraft>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.session_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.client.get(self.url(endpoint)));
        let response = request.send().await.map_err(|e| self.classify(e))?;
        self.decode(endpoint, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.client.post(self.url(endpoint)).json(body));
        let response = request.send().await.map_err(|e| self.classify(e))?;
        self.decode(endpoint, response).await
    }

    fn classify(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.config.timeout_secs)
        } else {
            ApiError::Http(error.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        if !status.is_success() {
            // The backend's own rejections carry {"error": "..."}.
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            tracing::debug!("Backend rejected {}: {} {}", endpoint, status, message);
            return Err(ApiError::Backend(format!("{}: {}", status, message)));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::InvalidJson(e.to_string()))
    }
}

impl BackendApi for HttpBackend {
    async fn fetch_counters(&self) -> Result<TaskCounters, ApiError> {
        let envelope: ProgressEnvelope = self.get_json("/api/tasks/progress").await?;
        Ok(envelope.daily_progress)
    }

    async fn fetch_skills(&self) -> Result<SkillBook, ApiError> {
        let envelope: ProfileEnvelope = self.get_json("/api/user/profile").await?;
        Ok(envelope.skills)
    }

    async fn submit_batch_apply(&self, ids: &[String]) -> Result<BatchApplyOutcome, ApiError> {
        self.post_json("/api/jobs/apply", &ApplyRequest { job_ids: ids })
            .await
    }

    async fn submit_draft_messages(&self, ids: &[String]) -> Result<Vec<MessageDraft>, ApiError> {
        let envelope: DraftsEnvelope = self
            .post_json("/api/emails/draft", &DraftRequest { contact_ids: ids })
            .await?;
        Ok(envelope.drafts)
    }

    async fn submit_send_messages(
        &self,
        drafts: &[MessageDraft],
    ) -> Result<BatchSendOutcome, ApiError> {
        self.post_json("/api/emails/send", &SendRequest { emails: drafts })
            .await
    }

    async fn submit_follow_up(&self, ids: &[String]) -> Result<BatchSendOutcome, ApiError> {
        self.post_json(
            "/api/emails/follow-up",
            &FollowUpRequest { contacted_ids: ids },
        )
        .await
    }

    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        self.get_json("/api/outlook/calendar").await
    }

    async fn add_xp(&self, skill: SkillKind, amount: u64) -> Result<XpAddOutcome, ApiError> {
        self.post_json("/api/xp/add", &XpAddRequest { skill, amount })
            .await
    }
}
