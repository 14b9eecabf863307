use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

pub mod ai;
pub mod commands;
pub mod config;
pub mod food;
mod handlers;
pub mod messages;

pub use ai::blessing::{Blessing, Category};
pub use ai::pipeline::{Decision, Pipeline};
pub use commands::Command;
pub use config::Config;
pub use food::FoodQuery;
pub use handlers::{handle_food_query, help, is_food_query};

use ai::classifier::OpenAiClassifier;

/// Update routing: `/start` and free-text food queries.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(|bot: Bot, msg: Message, cmd: Command| async move {
                    cmd.dispatch(bot, msg).await
                }),
        )
        .branch(
            dptree::entry()
                .filter(is_food_query)
                .endpoint(handle_food_query),
        )
}

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting blessing bot...");

    let config = Config::from_env()?;
    tracing::info!(
        model = %config.ai.gpt_model,
        contract = ?config.ai.contract,
        timeout = ?config.ai.timeout,
        "Classifier configured"
    );

    let classifier = Arc::new(OpenAiClassifier::new(&config.ai)?);
    let pipeline = Pipeline::from_config(classifier, &config.ai);
    let bot = Bot::new(config.bot_token);

    // --- Dispatcher ---
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![pipeline])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
