use anyhow::Result;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::handlers::help;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "show usage instructions.")]
    Start,
}

impl Command {
    pub async fn dispatch(self, bot: Bot, msg: Message) -> Result<()> {
        match self {
            Command::Start => help(bot, msg).await?,
        }
        Ok(())
    }
}
