//! HTTP client for AI-powered advisory features
//!
//! Single prompt-template invocation per operation. A request either
//! resolves with a full structured answer or fails with a generic advisory
//! error; there are no retries and no partial results.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{
    AdvisoryProvider, DomainError, DomainResult, FormSuggestion, FormSuggestionInput,
    TroubleshootInput, TroubleshootingGuide,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Advisory provider configuration
#[derive(Debug, Clone)]
pub struct AdvisoryConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1/messages".to_string(),
            api_key: String::new(),
            model: "claude-sonnet-4-20250514".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    content: Vec<ContentBlock>,
}

impl ChatResponse {
    fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// LLM-backed advisory provider
pub struct HttpAdvisoryProvider {
    http: Client,
    config: AdvisoryConfig,
}

impl HttpAdvisoryProvider {
    pub fn new(config: AdvisoryConfig) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("fieldserve/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Advisory(e.to_string()))?;
        Ok(Self { http, config })
    }

    async fn ask_json<T: for<'de> Deserialize<'de>>(
        &self,
        system: &str,
        prompt: String,
    ) -> DomainResult<T> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            system: Some(system.to_string()),
        };

        let res = self
            .http
            .post(&self.config.base_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "advisory request failed to send");
                DomainError::Advisory("request failed".into())
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(%status, %body, "advisory request rejected");
            return Err(match status {
                StatusCode::UNAUTHORIZED => DomainError::Advisory("invalid api key".into()),
                _ => DomainError::Advisory("request failed".into()),
            });
        }

        let response: ChatResponse = res.json().await.map_err(|e| {
            error!(error = %e, "advisory response body unreadable");
            DomainError::Advisory("request failed".into())
        })?;

        let text = response
            .text()
            .ok_or_else(|| DomainError::Advisory("empty response".into()))?;

        let json_str = extract_json(text);
        serde_json::from_str(json_str).map_err(|e| {
            error!(error = %e, preview = %json_str.chars().take(200).collect::<String>(),
                "advisory response is not the expected JSON shape");
            DomainError::Advisory("malformed response".into())
        })
    }
}

#[async_trait]
impl AdvisoryProvider for HttpAdvisoryProvider {
    async fn suggest_form(&self, input: FormSuggestionInput) -> DomainResult<FormSuggestion> {
        self.ask_json(SUGGEST_SYSTEM, suggest_prompt(&input)).await
    }

    async fn troubleshoot(&self, input: TroubleshootInput) -> DomainResult<TroubleshootingGuide> {
        self.ask_json(TROUBLESHOOT_SYSTEM, troubleshoot_prompt(&input))
            .await
    }
}

// ── Prompt templates ────────────────────────────────────────────

const SUGGEST_SYSTEM: &str = "You are an assistant for heavy-equipment field-service \
technicians. Answer with a single JSON object and nothing else.";

fn suggest_prompt(input: &FormSuggestionInput) -> String {
    format!(
        "A technician is on site and needs to file a service form.\n\
         Location: {location}\n\
         Equipment model: {model}\n\n\
         Pick the most appropriate form type among \"maintenance\", \"repair\", \
         \"inspection\" and \"work-order\" and explain briefly why.\n\
         Respond with JSON: {{\"suggested_form\": \"...\", \"reasoning\": \"...\"}}",
        location = input.location,
        model = input.equipment_model,
    )
}

const TROUBLESHOOT_SYSTEM: &str = "You are a heavy-equipment troubleshooting assistant. \
Answer with a single JSON object and nothing else.";

fn troubleshoot_prompt(input: &TroubleshootInput) -> String {
    format!(
        "Equipment model: {model}\n\
         Reported problem: {problem}\n\n\
         Provide troubleshooting guidance as JSON: \
         {{\"potential_causes\": [\"...\"], \"diagnostic_steps\": [\"...\"], \
         \"recommended_parts\": [\"...\"]}}",
        model = input.equipment_model,
        problem = input.problem_description,
    )
}

/// Extract JSON from a string that might contain markdown code blocks
fn extract_json(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```json") {
        let content_start = start + 7;
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let content_start = start + 3;
        let content_start = text[content_start..]
            .find('\n')
            .map(|i| content_start + i + 1)
            .unwrap_or(content_start);
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    text
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormType;

    #[test]
    fn extract_json_plain() {
        let input = r#"{"key": "value"}"#;
        assert_eq!(extract_json(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn extract_json_code_block() {
        let input = "Here you go:\n```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn extract_json_generic_code_block() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn suggestion_answer_parses() {
        let answer = r#"{"suggested_form": "repair", "reasoning": "Reported failure"}"#;
        let parsed: FormSuggestion = serde_json::from_str(extract_json(answer)).unwrap();
        assert_eq!(parsed.suggested_form, FormType::Repair);
    }

    #[test]
    fn guide_answer_parses() {
        let answer = r#"```json
{"potential_causes": ["worn seal"], "diagnostic_steps": ["check pressure"], "recommended_parts": ["seal kit"]}
```"#;
        let parsed: TroubleshootingGuide = serde_json::from_str(extract_json(answer)).unwrap();
        assert_eq!(parsed.potential_causes, vec!["worn seal"]);
        assert_eq!(parsed.diagnostic_steps.len(), 1);
        assert_eq!(parsed.recommended_parts, vec!["seal kit"]);
    }

    #[test]
    fn prompts_carry_the_structured_input() {
        let prompt = suggest_prompt(&FormSuggestionInput {
            location: "Mina Este".into(),
            equipment_model: "CAT 785".into(),
        });
        assert!(prompt.contains("Mina Este"));
        assert!(prompt.contains("CAT 785"));

        let prompt = troubleshoot_prompt(&TroubleshootInput {
            equipment_model: "Volvo EC950".into(),
            problem_description: "pérdida de potencia".into(),
        });
        assert!(prompt.contains("Volvo EC950"));
        assert!(prompt.contains("pérdida de potencia"));
    }
}
