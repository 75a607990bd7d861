//! # Command Registry
//!
//! Explicit table of the commands the bot understands. Each entry carries the data the
//! router needs to dispatch (name, aliases, argument range, handler) and the text `help`
//! needs to describe it, so help never special-cases a command.

use async_trait::async_trait;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::store::LinkStore;
use crate::domain::errors::CommandError;
use crate::domain::types::Reply;
use crate::interface::commands;

pub type SharedStore = Arc<RwLock<LinkStore>>;

/// Everything a handler may touch while serving one message.
pub struct CommandContext<'a> {
    pub store: &'a SharedStore,
    pub registry: &'a CommandRegistry,
    pub prefix: &'a str,
    pub sender: &'a str,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs with arguments already checked against `CommandSpec::arity`.
    /// Returns the replies to send, in order.
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<Vec<Reply>, CommandError>;
}

pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: RangeInclusive<usize>,
    /// Syntax without the prefix, e.g. `set <name> <link>`.
    pub usage: &'static str,
    pub description: &'static str,
    pub handler: Box<dyn CommandHandler>,
}

impl CommandSpec {
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }

    pub fn max_args(&self) -> usize {
        *self.arity.end()
    }
}

pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// The built-in command set: `set`, `servers`, `server_L` and `help`.
    pub fn standard() -> Self {
        use crate::strings::help;

        let mut registry = Self::empty();
        registry.register(CommandSpec {
            name: "set",
            aliases: &["set_link"],
            arity: 2..=2,
            usage: help::SET_USAGE,
            description: help::SET_DESCRIPTION,
            handler: Box::new(commands::set::SetCommand),
        });
        registry.register(CommandSpec {
            name: "servers",
            aliases: &[],
            arity: 0..=0,
            usage: help::SERVERS_USAGE,
            description: help::SERVERS_DESCRIPTION,
            handler: Box::new(commands::servers::ServersCommand),
        });
        registry.register(CommandSpec {
            name: "server_L",
            aliases: &["show-all"],
            arity: 0..=0,
            usage: help::SHOW_ALL_USAGE,
            description: help::SHOW_ALL_DESCRIPTION,
            handler: Box::new(commands::show_all::ShowAllCommand),
        });
        registry.register(CommandSpec {
            name: "help",
            aliases: &[],
            arity: 0..=1,
            usage: help::HELP_USAGE,
            description: help::HELP_DESCRIPTION,
            handler: Box::new(commands::help::HelpCommand),
        });
        registry
    }

    pub fn register(&mut self, spec: CommandSpec) {
        self.commands.push(spec);
    }

    /// Finds a command by name or alias. Matching is case-sensitive.
    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|spec| spec.matches(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }
}
