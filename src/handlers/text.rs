use anyhow::Result;
use teloxide::prelude::*;

use crate::ai::pipeline::Pipeline;
use crate::food::FoodQuery;
use crate::messages::{EMPTY_QUERY, HELP_TEXT};

pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    tracing::debug!(chat_id = msg.chat.id.0, "Sending usage message");
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}

/// Plain text that is not a bot command.
pub fn is_food_query(msg: Message) -> bool {
    msg.text().is_some_and(|t| !t.trim_start().starts_with('/'))
}

pub async fn handle_food_query(bot: Bot, msg: Message, pipeline: Pipeline) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(query) = FoodQuery::parse(text) else {
        tracing::debug!(chat_id = msg.chat.id.0, "Empty query");
        bot.send_message(msg.chat.id, EMPTY_QUERY).await?;
        return Ok(());
    };

    let decision = pipeline.run(&query, "").await;
    bot.send_message(msg.chat.id, decision.reply_text()).await?;
    Ok(())
}
