use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::warn;

use crate::interfaces::generative_model::{GenerateRequest, GenerativeModelInterface, InlineImage};
use crate::middleware::mw_ctx::CtxState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAssessment {
    pub risk_level: RiskLevel,
    pub reason: String,
}

impl FraudAssessment {
    fn low(reason: &str) -> Self {
        Self {
            risk_level: RiskLevel::Low,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotAssessment {
    pub is_valid: bool,
    pub confidence: u8,
    pub feedback: String,
}

impl ScreenshotAssessment {
    fn fallback(is_valid: bool, feedback: &str) -> Self {
        Self {
            is_valid,
            confidence: 0,
            feedback: feedback.to_string(),
        }
    }
}

/// Model reply before the confidence gets clamped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScreenshotReply {
    is_valid: bool,
    confidence: f64,
    feedback: String,
}

/// Models tend to wrap JSON replies in a markdown fence.
fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn rewrite_prompt(title: &str, raw: &str) -> String {
    format!(
        "You are an expert copywriter for a micro-task marketplace.\n\
         Rewrite the following task description to be clear, professional and encouraging for workers.\n\
         Keep it concise but detailed enough that workers know exactly what to do to get paid.\n\n\
         Task Title: {title}\n\
         Draft Instructions: {raw}\n\n\
         Return only the rewritten description text."
    )
}

fn fraud_prompt(proof_text: &str) -> String {
    format!(
        "Analyze this task submission proof text for potential spam or fraud.\n\
         Context: A worker is submitting proof for a digital micro-task.\n\
         Proof Text: \"{proof_text}\"\n\n\
         Is this likely a bot or a copy-paste spam?\n\
         Return a JSON object with keys: \"riskLevel\" (LOW, MEDIUM, HIGH) and \"reason\"."
    )
}

fn screenshot_prompt(requirements: &str) -> String {
    format!(
        "You are a moderator for a task platform.\n\
         Task Requirements: \"{requirements}\"\n\n\
         Does this screenshot provide proof that the task was completed according to the requirements?\n\
         Respond with JSON: {{ \"isValid\": boolean, \"confidence\": number (0-100), \"feedback\": \"short explanation\" }}"
    )
}

/// Optional model helpers. Every call falls back to a neutral answer
/// when the model is missing or misbehaves.
pub struct AiService {
    model: Option<Arc<dyn GenerativeModelInterface + Send + Sync>>,
}

impl AiService {
    pub fn new(state: &CtxState) -> Self {
        Self::with_model(state.ai_model.clone())
    }

    pub fn with_model(model: Option<Arc<dyn GenerativeModelInterface + Send + Sync>>) -> Self {
        Self { model }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn rewrite_description(&self, title: &str, raw: &str) -> String {
        let Some(model) = &self.model else {
            warn!("rewrite skipped, model not configured");
            return raw.to_string();
        };
        let request = GenerateRequest {
            prompt: rewrite_prompt(title, raw),
            inline_image: None,
            json_response: false,
        };
        match model.generate(request).await {
            Ok(Some(text)) => text.trim().to_string(),
            Ok(None) => {
                warn!("rewrite returned no text");
                raw.to_string()
            }
            Err(err) => {
                warn!("rewrite failed: {err}");
                raw.to_string()
            }
        }
    }

    pub async fn detect_fraud_risk(&self, proof_text: &str) -> FraudAssessment {
        let Some(model) = &self.model else {
            warn!("fraud check skipped, model not configured");
            return FraudAssessment::low("AI Unavailable");
        };
        let request = GenerateRequest {
            prompt: fraud_prompt(proof_text),
            inline_image: None,
            json_response: true,
        };
        match model.generate(request).await {
            Ok(Some(text)) => serde_json::from_str(strip_json_fence(&text)).unwrap_or_else(|err| {
                warn!("fraud check reply not parsable: {err}");
                FraudAssessment::low("Error checking fraud")
            }),
            Ok(None) => {
                warn!("fraud check returned no text");
                FraudAssessment::low("No analysis")
            }
            Err(err) => {
                warn!("fraud check failed: {err}");
                FraudAssessment::low("Error checking fraud")
            }
        }
    }

    pub async fn analyze_screenshot(
        &self,
        image_base64: String,
        mime_type: &str,
        requirements: &str,
    ) -> ScreenshotAssessment {
        let Some(model) = &self.model else {
            warn!("screenshot check skipped, model not configured");
            return ScreenshotAssessment::fallback(true, "AI Unavailable");
        };
        let request = GenerateRequest {
            prompt: screenshot_prompt(requirements),
            inline_image: Some(InlineImage {
                mime_type: mime_type.to_string(),
                data: image_base64,
            }),
            json_response: true,
        };
        match model.generate(request).await {
            Ok(Some(text)) => {
                match serde_json::from_str::<ScreenshotReply>(strip_json_fence(&text)) {
                    Ok(reply) => ScreenshotAssessment {
                        is_valid: reply.is_valid,
                        confidence: reply.confidence.clamp(0.0, 100.0).round() as u8,
                        feedback: reply.feedback,
                    },
                    Err(err) => {
                        warn!("screenshot reply not parsable: {err}");
                        ScreenshotAssessment::fallback(true, "Error analyzing image")
                    }
                }
            }
            Ok(None) => {
                warn!("screenshot check returned no text");
                ScreenshotAssessment::fallback(false, "No response")
            }
            Err(err) => {
                warn!("screenshot check failed: {err}");
                ScreenshotAssessment::fallback(true, "Error analyzing image")
            }
        }
    }
}
