//! OpenAI chat-completions client with a forced function-calling contract.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DetailExtractor, Result};
use crate::error::LlmError;
use crate::models::config::LlmConfig;
use crate::models::record::ResumeRecord;

const USER_AGENT: &str = "cvex/0.1.0";
const SYSTEM_PROMPT: &str = "You are a resume-parsing assistant.";
const TOOL_NAME: &str = "extract_details";

/// Client for the OpenAI chat-completions endpoint.
///
/// Every request declares a single tool whose parameters are the four
/// required record fields, and forces the model to call it, so the response
/// is always a structured argument payload rather than free text. The
/// credential lives in memory for the lifetime of the client and is never
/// written anywhere.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Create a client bound to one credential for the session.
    pub fn new(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: api_key.into(),
            model: config.model.clone(),
        })
    }
}

impl DetailExtractor for OpenAiClient {
    async fn extract_details(&self, text: &str) -> Result<ResumeRecord> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user",
                    content: format!(
                        "Extract the name, email, skills, and years of experience from this resume:\n\n{text}"
                    ),
                },
            ],
            tools: vec![extraction_tool()],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolRef { name: TOOL_NAME },
            },
        };

        debug!(
            "requesting extraction for {} chars of resume text",
            text.len()
        );

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ChatResponse = response.json().await?;
        record_from_response(payload)
    }
}

/// The tool declaration sent with every request: all four fields mandatory.
fn extraction_tool() -> Tool {
    Tool {
        kind: "function",
        function: ToolFunction {
            name: TOOL_NAME,
            description: "Extract applicant details from a resume",
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "email": {"type": "string"},
                    "skills": {"type": "array", "items": {"type": "string"}},
                    "experience_years": {"type": "number"}
                },
                "required": ["name", "email", "skills", "experience_years"]
            }),
        },
    }
}

/// Pull the record out of the first tool call of the first choice.
fn record_from_response(response: ChatResponse) -> Result<ResumeRecord> {
    let call = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.tool_calls.into_iter().next())
        .ok_or(LlmError::MissingToolCall)?;

    let record = serde_json::from_str(&call.function.arguments)?;
    Ok(record)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    tools: Vec<Tool>,
    tool_choice: ToolChoice,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ToolFunction,
}

#[derive(Debug, Serialize)]
struct ToolFunction {
    name: &'static str,
    description: &'static str,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ToolRef,
}

#[derive(Debug, Serialize)]
struct ToolRef {
    name: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: CalledFunction,
}

#[derive(Debug, Deserialize)]
struct CalledFunction {
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
