//! # Set Command
//!
//! Handles `set <name> <link>`: stores the link and confirms it.
//! The link is persisted before the confirmation is produced.

use async_trait::async_trait;

use crate::application::parsing::split_command;
use crate::application::registry::{CommandContext, CommandHandler, CommandRegistry};
use crate::domain::errors::CommandError;
use crate::domain::types::Reply;
use crate::strings::{help, logs, messages};

pub struct SetCommand;

#[async_trait]
impl CommandHandler for SetCommand {
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<Vec<Reply>, CommandError> {
        let [name, link] = args else {
            return Err(CommandError::Usage(help::SET_USAGE));
        };
        if name.is_empty() {
            return Err(CommandError::Usage(help::SET_USAGE));
        }
        if !is_reachable(name, ctx.registry) {
            return Ok(vec![Reply::plain(messages::unreachable_name(name))]);
        }

        let mut store = ctx.store.write().await;
        if let Err(e) = store.set(name, link) {
            tracing::error!("{}", logs::store_write_failed(name, &e.to_string()));
            return Err(e.into());
        }
        tracing::info!("{}", logs::store_written(name, ctx.sender));

        Ok(vec![Reply::plain(messages::link_set(name, link))])
    }
}

/// Whether `<prefix><name>` would reach the lookup. Chat clients strip surrounding
/// whitespace, line breaks end the message body, and a first word naming a command is
/// dispatched to that command instead.
pub fn is_reachable(name: &str, registry: &CommandRegistry) -> bool {
    name.trim() == name
        && !name.contains(['\r', '\n'])
        && registry.find(split_command(name).0).is_none()
}
