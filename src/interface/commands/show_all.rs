//! # Show-All Command
//!
//! Handles `server_L` / `show-all`: one reply per saved server, `name: link`.

use async_trait::async_trait;

use crate::application::registry::{CommandContext, CommandHandler};
use crate::domain::errors::CommandError;
use crate::domain::types::Reply;
use crate::strings::messages;

pub struct ShowAllCommand;

#[async_trait]
impl CommandHandler for ShowAllCommand {
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<Vec<Reply>, CommandError> {
        let entries = ctx.store.read().await.entries();
        if entries.is_empty() {
            return Ok(vec![Reply::plain(messages::NO_SERVERS)]);
        }

        Ok(entries
            .iter()
            .map(|entry| Reply::plain(messages::link_line(&entry.name, &entry.link)))
            .collect())
    }
}
