//! Narrative feedback collaborator boundary.
//!
//! The engine computes numbers; turning those numbers into coaching prose is
//! delegated to an external text-generation service behind the
//! [`FeedbackNarrator`] trait. A deterministic heuristic implementation is
//! provided as the fallback so a narrator is always available, and an
//! HTTP-backed implementation covers the real service with bounded retries.

use async_trait::async_trait;
use reefsim_data::StabilityTrend;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything a narrator gets to work with for one finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Pre-built prompt: metrics, trend and notable interactions.
    pub prompt: String,
    pub trend: StabilityTrend,
    /// Final stability score in [0, 100].
    pub stability: f64,
}

/// External text-generation collaborator.
///
/// Implementations own their transport, retry and timeout policy; the
/// evaluator treats any `Err` as "no narrative" and keeps the numeric result.
#[async_trait]
pub trait FeedbackNarrator: Send + Sync {
    async fn narrate(&self, request: &FeedbackRequest) -> anyhow::Result<String>;
}

/// Deterministic template narrator used when no external service is wired up.
pub struct HeuristicNarrator;

#[async_trait]
impl FeedbackNarrator for HeuristicNarrator {
    async fn narrate(&self, request: &FeedbackRequest) -> anyhow::Result<String> {
        let opener = match request.trend {
            StabilityTrend::Improving => "Your ecosystem was gaining stability as the run ended.",
            StabilityTrend::Declining => "Your ecosystem was losing stability as the run ended.",
            StabilityTrend::Stable => "Your ecosystem held steady through the end of the run.",
        };
        let verdict = if request.stability >= 75.0 {
            "This is a resilient configuration; focus on fine-tuning energy transfer."
        } else if request.stability >= 50.0 {
            "A workable configuration with clear room to rebalance roles."
        } else {
            "The configuration is fragile; revisit the producer/consumer split."
        };
        Ok(format!("{opener} {verdict}"))
    }
}

/// Narrator backed by an HTTP text-generation endpoint.
pub struct HttpNarrator {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct NarrateBody<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct NarrateResponse {
    text: String,
}

impl HttpNarrator {
    const MAX_RETRIES: u32 = 3;
    const INITIAL_BACKOFF_MS: u64 = 500;
    const REQUEST_TIMEOUT_SECS: u64 = 20;

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedbackNarrator for HttpNarrator {
    async fn narrate(&self, request: &FeedbackRequest) -> anyhow::Result<String> {
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..Self::MAX_RETRIES {
            let response = self
                .client
                .post(&self.endpoint)
                .timeout(Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
                .json(&NarrateBody {
                    prompt: &request.prompt,
                })
                .send()
                .await;

            match response {
                Ok(resp) => {
                    if resp.status().is_success() {
                        let body: NarrateResponse = resp.json().await?;
                        return Ok(body.text);
                    }

                    let status = resp.status();
                    let is_transient = status.is_server_error() || status == 429;
                    if !is_transient || attempt == Self::MAX_RETRIES - 1 {
                        return Err(anyhow::anyhow!(
                            "feedback service returned error: {status}"
                        ));
                    }
                    last_error = Some(anyhow::anyhow!(
                        "feedback service returned error: {status}"
                    ));
                }
                Err(e) => {
                    let is_transient = e.is_timeout() || e.is_connect();
                    if !is_transient || attempt == Self::MAX_RETRIES - 1 {
                        return Err(anyhow::anyhow!("feedback request failed: {e}"));
                    }
                    last_error = Some(anyhow::anyhow!("feedback request failed: {e}"));
                }
            }

            if attempt < Self::MAX_RETRIES - 1 {
                let backoff_ms = Self::INITIAL_BACKOFF_MS * 2_u64.pow(attempt);
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown feedback service error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn heuristic_narrator_mentions_trend() {
        let request = FeedbackRequest {
            prompt: String::new(),
            trend: StabilityTrend::Declining,
            stability: 30.0,
        };
        let text = HeuristicNarrator.narrate(&request).await.unwrap();
        assert!(text.contains("losing stability"));
        assert!(text.contains("fragile"));
    }

    #[tokio::test]
    async fn heuristic_narrator_is_deterministic() {
        let request = FeedbackRequest {
            prompt: String::new(),
            trend: StabilityTrend::Stable,
            stability: 80.0,
        };
        let a = HeuristicNarrator.narrate(&request).await.unwrap();
        let b = HeuristicNarrator.narrate(&request).await.unwrap();
        assert_eq!(a, b);
    }
}
