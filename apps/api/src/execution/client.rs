use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::execution::models::{
    ExecutionOutcome, Language, NewSubmission, SubmissionResult, SubmissionToken,
};

/// Client for a Judge0-compatible execution service.
#[derive(Clone)]
pub struct Judge0Client {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    poll_interval: Duration,
}

/// Where a run currently is. Logged as it advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Submitting,
    Polling,
    Finished,
    Failed,
}

impl Judge0Client {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        poll_interval: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            poll_interval,
        })
    }

    /// RapidAPI-hosted instances need both key and host headers.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(key) = &self.api_key else {
            return request;
        };
        let request = request.header("X-RapidAPI-Key", key);
        match reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
        {
            Some(host) => request.header("X-RapidAPI-Host", host),
            None => request,
        }
    }

    /// Submits `source` and polls until Judge0 reports a terminal status.
    pub async fn run(
        &self,
        source: &str,
        language: &Language,
        stdin: Option<&str>,
    ) -> Result<ExecutionOutcome, AppError> {
        let mut phase = RunPhase::Submitting;
        info!(?phase, "Submitting {} source ({} bytes)", language.name, source.len());

        let result = self.submit_and_wait(source, language, stdin, &mut phase).await;
        match &result {
            Ok(outcome) => {
                phase = RunPhase::Finished;
                info!(?phase, "Run finished with status {}", outcome.status.id);
            }
            Err(e) => {
                phase = RunPhase::Failed;
                info!(?phase, "Run failed: {e}");
            }
        }
        result
    }

    async fn submit_and_wait(
        &self,
        source: &str,
        language: &Language,
        stdin: Option<&str>,
        phase: &mut RunPhase,
    ) -> Result<ExecutionOutcome, AppError> {
        let token = self.submit(source, language, stdin).await?;
        *phase = RunPhase::Polling;

        let mut polls: u32 = 0;
        loop {
            tokio::time::sleep(self.poll_interval).await;
            polls += 1;
            let result = self.fetch(&token).await?;
            if result.is_terminal() {
                debug!("Submission {token} terminal after {polls} polls");
                return Ok(ExecutionOutcome::from_terminal(result));
            }
            debug!(
                ?phase,
                "Submission {token} still pending (status {:?})",
                result.status.as_ref().map(|s| s.id)
            );
        }
    }

    async fn submit(
        &self,
        source: &str,
        language: &Language,
        stdin: Option<&str>,
    ) -> Result<String, AppError> {
        let url = format!("{}/submissions?base64_encoded=false&wait=false", self.base_url);
        let body = NewSubmission {
            source_code: source,
            language_id: language.id,
            stdin,
        };
        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Execution(format!("submit failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Execution(format!(
                "submit returned {status}: {text}"
            )));
        }

        let SubmissionToken { token } = response
            .json()
            .await
            .map_err(|e| AppError::Execution(format!("submit response unreadable: {e}")))?;
        Ok(token)
    }

    async fn fetch(&self, token: &str) -> Result<SubmissionResult, AppError> {
        let url = format!(
            "{}/submissions/{}?base64_encoded=false",
            self.base_url, token
        );
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| AppError::Execution(format!("status poll failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Execution(format!(
                "status poll returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Execution(format!("status response unreadable: {e}")))
    }
}
