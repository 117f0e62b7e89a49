//! Client for the external resume-analysis service.

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    resume_text: &'a str,
}

/// The fields this system actually reads out of an analysis response.
///
/// `ai_analysis` must be present for the response to count as well-formed;
/// everything inside it is optional and defaulted at mapping time.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub placement_probability: Option<f64>,
    pub ai_analysis: AiInsights,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiInsights {
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub content_rating: Option<i64>,
}

/// Decoded analysis response.
///
/// The raw value is always retained so the full payload can be persisted
/// verbatim; `Malformed` carries a body that was valid JSON but not the
/// shape this system knows how to read.
#[derive(Debug, Clone)]
pub enum AnalysisPayload {
    Parsed {
        report: AnalysisReport,
        raw: serde_json::Value,
    },
    Malformed(serde_json::Value),
}

impl AnalysisPayload {
    fn from_value(raw: serde_json::Value) -> Self {
        match serde_json::from_value::<AnalysisReport>(raw.clone()) {
            Ok(report) => Self::Parsed { report, raw },
            Err(_) => Self::Malformed(raw),
        }
    }
}

#[derive(Clone)]
pub struct AnalyzerClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalyzerClient {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST the extracted text to `{base_url}/analyze`.
    ///
    /// Transport failures and non-200 statuses surface as
    /// [`AppError::AnalysisService`]; a 200 with a non-JSON body is
    /// [`AppError::Internal`]. No timeout is applied here; a slow analyzer
    /// blocks the requesting task.
    pub async fn analyze(&self, resume_text: &str) -> Result<AnalysisPayload> {
        let url = format!("{}/analyze", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&AnalyzeRequest { resume_text })
            .send()
            .await
            .map_err(|e| AppError::AnalysisService(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::AnalysisService(format!(
                "analysis service returned status {}",
                status.as_u16()
            )));
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("invalid analysis response body: {e}")))?;

        Ok(AnalysisPayload::from_value(raw))
    }
}
