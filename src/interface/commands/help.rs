//! # Help Command
//!
//! Handles the `help` command.
//! Without arguments it renders every registered command; with one it describes that command.

use async_trait::async_trait;

use crate::application::registry::{CommandContext, CommandHandler, CommandRegistry};
use crate::domain::errors::CommandError;
use crate::domain::types::Reply;
use crate::strings::{help, messages};

pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<Vec<Reply>, CommandError> {
        let reply = match args.first() {
            None => Reply::markdown(summary(ctx.registry, ctx.prefix)),
            Some(name) => match ctx.registry.find(name) {
                Some(spec) => Reply::markdown(help::command_detail(
                    ctx.prefix,
                    spec.name,
                    spec.usage,
                    spec.description,
                )),
                None => Reply::plain(messages::COMMAND_NOT_FOUND),
            },
        };
        Ok(vec![reply])
    }
}

pub fn summary(registry: &CommandRegistry, prefix: &str) -> String {
    let mut lines = vec![help::TITLE.to_string(), help::usage_line(prefix), String::new()];
    lines.extend(
        registry
            .iter()
            .map(|spec| help::command_line(prefix, spec.usage, spec.aliases, spec.description)),
    );
    lines.push(String::new());
    lines.push(help::lookup_hint(prefix));
    lines.join("\n")
}
