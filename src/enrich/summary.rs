// summary.rs
use crate::enrich::{blocking_client, EnrichmentError, OfferSummary, SummaryProvider};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You analyze real estate rental offers. Given an offer description, \
answer with a JSON object holding exactly these keys: \
\"available_from\" (when the property is available, e.g. \"Immediately\", \"From May 1st\", \"Not specified\"), \
\"total_monthly_cost\" (rent plus utilities, e.g. \"3500 PLN\", \"Not specified\"), \
\"key_advantages\" (at most 3, e.g. \"Balcony, Parking, New furniture\"). \
Answer briefly.";

/// Default summarizer: answers with the sentinel triple and never calls
/// out. Swapped for the live provider when an API key is configured.
pub struct NoopSummarizer;

impl SummaryProvider for NoopSummarizer {
    fn summarize(&self, _description: &str) -> Result<OfferSummary, EnrichmentError> {
        Ok(OfferSummary::not_available())
    }
}

pub struct OpenAiSummarizer {
    client: Client,
    api_key: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: impl Into<String>) -> Result<Self, EnrichmentError> {
        Ok(Self {
            client: blocking_client()?,
            api_key: api_key.into(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl SummaryProvider for OpenAiSummarizer {
    fn summarize(&self, description: &str) -> Result<OfferSummary, EnrichmentError> {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: description,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: 0.0,
        };

        let resp = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| EnrichmentError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(EnrichmentError::Api(format!(
                "chat completions HTTP {status}: {body}"
            )));
        }

        let body: ChatResponse = resp
            .json()
            .map_err(|e| EnrichmentError::Parse(e.to_string()))?;

        let content = body
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| EnrichmentError::Parse("no choices in response".to_string()))?;

        serde_json::from_str(content).map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}
