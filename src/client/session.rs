//! Presentation state for one summarizing session.
//!
//! `Idle -> Loading -> {Success, Error}`, and a finished state returns to
//! `Idle` on the next edit or submit.

use crate::models::SummarizeResponse;
use crate::pipeline::cost::{self, Estimate};

use super::{ClientError, SummarizeClient};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Success(SummarizeResponse),
    Error(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransitionError {
    #[error("a request is already in flight")]
    AlreadyLoading,
    #[error("no request is in flight")]
    NotLoading,
}

#[derive(Debug, Clone)]
pub struct Session {
    text: String,
    temperature: f64,
    estimate: Estimate,
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(String::new(), crate::models::DEFAULT_TEMPERATURE)
    }
}

impl Session {
    pub fn new(text: String, temperature: f64) -> Self {
        let estimate = cost::estimate(&text);
        Self {
            text,
            temperature,
            estimate,
            phase: Phase::Idle,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn estimate(&self) -> Estimate {
        self.estimate
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Submit is enabled when nothing is in flight and there is text.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.text.trim().is_empty()
    }

    pub fn set_text(&mut self, text: String) {
        self.estimate = cost::estimate(&text);
        self.text = text;
        self.reset();
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature.clamp(0.0, 1.0);
        self.reset();
    }

    fn reset(&mut self) {
        if !self.is_loading() {
            self.phase = Phase::Idle;
        }
    }

    pub fn begin(&mut self) -> Result<(), TransitionError> {
        if self.is_loading() {
            return Err(TransitionError::AlreadyLoading);
        }
        self.phase = Phase::Loading;
        Ok(())
    }

    pub fn finish(
        &mut self,
        result: Result<SummarizeResponse, ClientError>,
    ) -> Result<(), TransitionError> {
        if !self.is_loading() {
            return Err(TransitionError::NotLoading);
        }
        self.phase = match result {
            Ok(resp) => Phase::Success(resp),
            Err(e) => Phase::Error(e.to_string()),
        };
        Ok(())
    }

    /// Run one submit through the client, enforcing a single request in flight.
    pub async fn submit(&mut self, client: &SummarizeClient) -> Result<&Phase, TransitionError> {
        self.begin()?;
        let result = client.summarize(&self.text, self.temperature).await;
        self.finish(result)?;
        Ok(&self.phase)
    }
}
