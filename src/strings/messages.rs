//! # Messages
//!
//! Contains constant strings and format functions for user-facing replies.

pub const NO_SERVERS: &str = "No servers found.";
pub const COMMAND_NOT_FOUND: &str = "Command not found.";
pub const STORE_FAILED: &str = "❌ Could not save the link. Please try again later.";

pub fn link_set(name: &str, link: &str) -> String {
    format!("Successfully set {name} link to: {link}")
}

pub fn link_line(name: &str, link: &str) -> String {
    format!("{name}: {link}")
}

pub fn numbered_line(index: usize, name: &str) -> String {
    format!("{index}. {name}")
}

pub fn usage(prefix: &str, syntax: &str) -> String {
    format!("Usage: `{prefix}{syntax}`")
}

pub fn unreachable_name(name: &str) -> String {
    format!(
        "Cannot save '{name}': it could never be looked up (surrounding spaces, line breaks, or a command name)."
    )
}
