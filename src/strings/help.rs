//! # Help Text
//!
//! Command syntax and descriptions shown by the `help` command.
//! Syntax strings omit the prefix; it is added when the text is rendered.

pub const TITLE: &str = "**🔗 Link Bot Help**";

pub const SET_USAGE: &str = "set <name> <link>";
pub const SET_DESCRIPTION: &str = "Set a custom link for a custom server name.";

pub const SERVERS_USAGE: &str = "servers";
pub const SERVERS_DESCRIPTION: &str = "List the names of all saved servers.";

pub const SHOW_ALL_USAGE: &str = "server_L";
pub const SHOW_ALL_DESCRIPTION: &str = "Show every saved server together with its link.";

pub const HELP_USAGE: &str = "help [command]";
pub const HELP_DESCRIPTION: &str = "Show all commands, or more info on one command.";

pub fn usage_line(prefix: &str) -> String {
    format!("Use: {prefix}command _args_")
}

pub fn command_line(prefix: &str, usage: &str, aliases: &[&str], description: &str) -> String {
    if aliases.is_empty() {
        format!("* {prefix}{usage}: {description}")
    } else {
        format!("* {prefix}{usage} (also: {}): {description}", aliases.join(", "))
    }
}

pub fn lookup_hint(prefix: &str) -> String {
    format!("Type `{prefix}<name>` to get the link saved for a server.")
}

pub fn command_detail(prefix: &str, name: &str, usage: &str, description: &str) -> String {
    format!("**{name}:** {description}\nUsage: `{prefix}{usage}`")
}
