use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

use crate::ai::common::OPENAI_CHAT_URL;

pub const DEFAULT_GPT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Output contract requested from the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseContract {
    /// `response_format: json_schema` with the fixed schema.
    #[default]
    JsonSchema,
    /// Schema described in the system prompt, no `response_format`.
    JsonInstruction,
    /// Natural-language answer containing one literal phrase.
    FreeText,
}

impl ResponseContract {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json_schema" => Some(Self::JsonSchema),
            "json_instruction" | "json" => Some(Self::JsonInstruction),
            "free_text" | "text" => Some(Self::FreeText),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub gpt_model: String,
    pub openai_chat_url: Option<String>,
    pub contract: ResponseContract,
    pub timeout: Duration,
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
        let contract = match env::var("OPENAI_RESPONSE_FORMAT") {
            Ok(name) => match ResponseContract::from_name(&name) {
                Some(c) => c,
                None => bail!("unsupported OPENAI_RESPONSE_FORMAT: {name}"),
            },
            Err(_) => ResponseContract::default(),
        };
        let timeout_secs = match env::var("OPENAI_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid OPENAI_TIMEOUT_SECS: {v}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            api_key,
            gpt_model: env::var("OPENAI_GPT_MODEL")
                .unwrap_or_else(|_| DEFAULT_GPT_MODEL.to_string()),
            openai_chat_url: env::var("OPENAI_CHAT_URL").ok(),
            contract,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn chat_url(&self) -> &str {
        self.openai_chat_url.as_deref().unwrap_or(OPENAI_CHAT_URL)
    }
}
