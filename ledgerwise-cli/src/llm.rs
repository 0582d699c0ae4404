use ledgerwise_finance::preprocess_statement_text;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LlmSection;
use crate::error::AdvisorError;

pub const ADVISOR_PERSONA: &str = "You are an expert financial advisor. Analyze the detailed bank statement data provided below. \
Focus on monthly trends, recurring subscriptions, and unusual expenses. Categorize expenses into fixed and variable costs. \
Provide specific, actionable advice on budgeting and saving money, including concrete steps and strategies. \
If more details are needed, ask clarifying questions.";

pub const QA_PERSONA: &str = "You are a detailed and specific financial advisor.";

/// Decoding settings shared by every request; not configurable.
pub const TEMPERATURE: f32 = 0.2;
pub const MAX_TOKENS: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completions response, reduced to what the advisor reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

impl Completion {
    /// Text of the first choice, trimmed.
    ///
    /// A response without a first choice or without message content is a malformed
    /// reply, reported as `Unexpected` rather than as empty advice.
    pub fn text(&self) -> Result<&str, AdvisorError> {
        let choice = self
            .choices
            .first()
            .ok_or_else(|| AdvisorError::Unexpected("completion response had no choices".to_string()))?;
        let content = choice.message.content.as_deref().ok_or_else(|| {
            AdvisorError::Unexpected("completion choice had no message content".to_string())
        })?;
        Ok(content.trim())
    }

    #[cfg(test)]
    pub fn from_text(text: &str) -> Self {
        Self {
            choices: vec![Choice {
                message: AssistantMessage {
                    content: Some(text.to_string()),
                },
            }],
        }
    }
}

/// Anything that turns a conversation into one completion.
#[allow(async_fn_in_trait)]
pub trait CompletionService {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, AdvisorError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

/// OpenAI chat-completions client. Built once with the API key and shared by the
/// advisory call and the interactive session.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, llm: &LlmSection) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: llm.base_url.trim_end_matches('/').to_string(),
            model: llm.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionService for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, AdvisorError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(model = %self.model, messages = messages.len(), "chat completion request");
        let resp = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(AdvisorError::from_status(status, &txt));
        }

        Ok(resp.json::<Completion>().await?)
    }
}

/// Conversation for the one-shot analysis: advisor persona, then the structured
/// summary followed by the full raw statement text.
pub fn advice_messages(pdf_text: &str) -> Vec<ChatMessage> {
    let structured_summary = preprocess_statement_text(pdf_text).render();
    let user = format!(
        "Here is a structured summary of key financial figures extracted from my bank statements:\n\n\
{structured_summary}\n\n\
Below is the full raw data from the bank statements:\n\n{pdf_text}"
    );
    vec![ChatMessage::system(ADVISOR_PERSONA), ChatMessage::user(user)]
}

pub fn question_messages(question: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(QA_PERSONA), ChatMessage::user(question)]
}

pub async fn get_summary_and_advice(
    service: &impl CompletionService,
    pdf_text: &str,
) -> Result<String, AdvisorError> {
    let messages = advice_messages(pdf_text);
    info!(chars = pdf_text.len(), "requesting statement analysis");
    let completion = service.complete(&messages).await?;
    Ok(completion.text()?.to_string())
}

/// One independent question: fresh persona, no earlier turns.
pub async fn ask_question(
    service: &impl CompletionService,
    question: &str,
) -> Result<String, AdvisorError> {
    let completion = service.complete(&question_messages(question)).await?;
    Ok(completion.text()?.to_string())
}
