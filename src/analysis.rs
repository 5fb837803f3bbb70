//! Email report built on top of [`Detector::predict`].
//!
//! The report is keyed on the logistic regression's verdict; the random
//! forest's confidence is carried alongside for display.

use serde::{Deserialize, Serialize};

use crate::{Detector, EmailMessage, Label, PipelineError, PredictionResult};

pub const PHISHING_RISK_SCORE: u8 = 80;
pub const BENIGN_RISK_SCORE: u8 = 10;
pub const PHISHING_SUGGESTION: &str = "Do not click links or respond";
pub const BENIGN_SUGGESTION: &str = "No action needed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

/// Derived verdict shown to the user. Serializes with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAnalysis {
    pub phishing_detected: bool,
    /// Same as `lr_confidence`.
    pub confidence: f64,
    pub rf_confidence: f64,
    pub lr_confidence: f64,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub suggestion: String,
    /// Always empty; no keyword flagging is done.
    pub flagged_keywords: Vec<String>,
    pub urls: Vec<String>,
}

impl EmailAnalysis {
    pub fn from_prediction(result: &PredictionResult, urls: Vec<String>) -> Self {
        let lr = result.logistic_regression;
        let phishing = lr.prediction == Label::Phishing;
        let (risk_score, risk_level, suggestion) = if phishing {
            (PHISHING_RISK_SCORE, RiskLevel::High, PHISHING_SUGGESTION)
        } else {
            (BENIGN_RISK_SCORE, RiskLevel::Low, BENIGN_SUGGESTION)
        };

        Self {
            phishing_detected: phishing,
            confidence: lr.confidence,
            rf_confidence: result.random_forest.confidence,
            lr_confidence: lr.confidence,
            risk_score,
            risk_level,
            suggestion: suggestion.to_string(),
            flagged_keywords: Vec::new(),
            urls,
        }
    }
}

/// Everything `/analyse` returns for one email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub subject: String,
    pub sender: String,
    pub analysis_result: EmailAnalysis,
    /// Raw model answers, in the `/predict` shape.
    pub model_results: PredictionResult,
}

impl Detector {
    /// Scores the body of `email` and builds its report.
    pub fn analyse(&self, email: &EmailMessage) -> Result<AnalysisReport, PipelineError> {
        let model_results = self.predict(&email.body)?;
        let urls = email.urls();
        tracing::debug!(
            urls = urls.len(),
            phishing = model_results.logistic_regression.prediction == Label::Phishing,
            "email analysed"
        );

        Ok(AnalysisReport {
            subject: email.subject.clone(),
            sender: email.sender.clone(),
            analysis_result: EmailAnalysis::from_prediction(&model_results, urls),
            model_results,
        })
    }
}
