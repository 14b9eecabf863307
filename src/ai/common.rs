use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, trace, warn};

use crate::ai::config::ResponseContract;
use crate::ai::prompts::{response_schema, ClassifierPrompt, SCHEMA_NAME};

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat Completions body for a classifier prompt.
pub fn build_chat_body(model: &str, prompt: &ClassifierPrompt) -> Value {
    let mut body = json!({
        "model": model,
        "temperature": 0,
        "messages": [
            { "role": "system", "content": prompt.system },
            { "role": "user", "content": prompt.user },
        ]
    });
    if prompt.contract == ResponseContract::JsonSchema {
        body["response_format"] = json!({
            "type": "json_schema",
            "json_schema": { "name": SCHEMA_NAME, "schema": response_schema() },
        });
    }
    body
}

/// Send a prepared request with bearer auth, turning non-2xx into an error.
#[instrument(level = "trace", skip(api_key, builder))]
pub async fn send_openai_request(
    api_key: &str,
    builder: reqwest::RequestBuilder,
) -> Result<reqwest::Response> {
    let resp = builder.bearer_auth(api_key).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let err_text = resp.text().await.unwrap_or_default();
        warn!(%status, "OpenAI API error");
        return Err(anyhow!("OpenAI API error {status}: {err_text}"));
    }
    Ok(resp)
}

/// Extract `choices[0].message.content` from a raw response body.
pub fn parse_chat_content(raw: &str) -> Result<String> {
    let chat: ChatResponse = serde_json::from_str(raw)?;
    let content = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("missing chat choice"))?
        .message
        .content
        .ok_or_else(|| anyhow!("chat choice has no content"))?;
    trace!(content = %content, "chat content");
    Ok(content.trim().to_string())
}

/// POST a chat completion and return the message content.
#[instrument(level = "trace", skip(client, api_key, body))]
pub async fn request_chat_content(
    client: &reqwest::Client,
    api_key: &str,
    body: &Value,
    url: &str,
) -> Result<String> {
    debug!(url, "sending chat completion request");

    let builder = client.post(url).json(body);
    let resp = send_openai_request(api_key, builder).await?;

    let raw = resp.text().await?;
    let snippet: String = raw.chars().take(200).collect();
    debug!(snippet = %snippet, "chat response body");
    trace!(raw = %raw, "chat response");
    parse_chat_content(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompts::build_prompt;
    use crate::food::FoodQuery;

    fn prompt(contract: ResponseContract) -> ClassifierPrompt {
        build_prompt(&FoodQuery::parse("תפוח").unwrap(), "", contract)
    }

    #[test]
    fn schema_contract_sets_response_format() {
        let body = build_chat_body("gpt-4o-mini", &prompt(ResponseContract::JsonSchema));
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], SCHEMA_NAME);
        assert_eq!(body["temperature"], 0);
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn other_contracts_omit_response_format() {
        for c in [ResponseContract::JsonInstruction, ResponseContract::FreeText] {
            let body = build_chat_body("m", &prompt(c));
            assert!(body.get("response_format").is_none());
        }
    }

    #[test]
    fn parse_chat_content_trims() {
        let raw = r#"{"choices":[{"message":{"content":"  בורא פרי העץ \n"}}]}"#;
        assert_eq!(parse_chat_content(raw).unwrap(), "בורא פרי העץ");
    }

    #[test]
    fn parse_chat_content_rejects_empty_choices() {
        assert!(parse_chat_content(r#"{"choices":[]}"#).is_err());
        assert!(parse_chat_content(r#"{"choices":[{"message":{"content":null}}]}"#).is_err());
        assert!(parse_chat_content("not json").is_err());
    }
}
