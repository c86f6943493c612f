use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::debug;
use thiserror::Error;

use super::kind::Submission;
use crate::config::FormsTarget;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("could not encode submission: {0}")]
    Build(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("server answered with status {0}")]
    Status(u16),
}

/// Delivers a validated form somewhere.
#[allow(async_fn_in_trait)]
pub trait Submitter {
    async fn submit(&self, submission: &Submission) -> Result<(), SubmitError>;
}

/// Waits a fixed per-form delay and reports success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedSubmitter;

impl Submitter for SimulatedSubmitter {
    async fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        TimeoutFuture::new(submission.form.simulated_delay_ms()).await;
        debug!("forms: simulated delivery of {} form", submission.form.slug());
        Ok(())
    }
}

/// POSTs the submission as JSON to `{base_url}/api/forms/{kind}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSubmitter {
    base_url: String,
}

impl HttpSubmitter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, submission: &Submission) -> String {
        format!("{}/api/forms/{}", self.base_url, submission.form.slug())
    }
}

impl Submitter for HttpSubmitter {
    async fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        let response = Request::post(&self.endpoint(submission))
            .header("Content-Type", "application/json")
            .json(submission)
            .map_err(|e| SubmitError::Build(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(SubmitError::Status(response.status()))
        }
    }
}

/// The transport a page is configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Simulated(SimulatedSubmitter),
    Http(HttpSubmitter),
}

impl From<FormsTarget> for Transport {
    fn from(target: FormsTarget) -> Self {
        match target {
            FormsTarget::Simulated => Transport::Simulated(SimulatedSubmitter),
            FormsTarget::Http { base_url } => Transport::Http(HttpSubmitter::new(base_url)),
        }
    }
}

impl Submitter for Transport {
    async fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        match self {
            Transport::Simulated(port) => port.submit(submission).await,
            Transport::Http(port) => port.submit(submission).await,
        }
    }
}
