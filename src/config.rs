use anyhow::{Context, Result};
use std::env;

use crate::ai::config::AiConfig;

#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub ai: AiConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let bot_token = env::var("TELOXIDE_TOKEN").context("TELOXIDE_TOKEN is not set")?;
        let ai = AiConfig::from_env()?;
        Ok(Self { bot_token, ai })
    }
}
