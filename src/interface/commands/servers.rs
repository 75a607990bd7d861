//! # Servers Command
//!
//! Handles `servers`: a numbered list of saved names in a single reply.

use async_trait::async_trait;

use crate::application::registry::{CommandContext, CommandHandler};
use crate::domain::errors::CommandError;
use crate::domain::types::Reply;
use crate::strings::messages;

pub struct ServersCommand;

#[async_trait]
impl CommandHandler for ServersCommand {
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<Vec<Reply>, CommandError> {
        let names = ctx.store.read().await.list_keys();
        if names.is_empty() {
            return Ok(vec![Reply::plain(messages::NO_SERVERS)]);
        }

        let listing = names
            .iter()
            .enumerate()
            .map(|(i, name)| messages::numbered_line(i + 1, name))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(vec![Reply::plain(listing)])
    }
}
