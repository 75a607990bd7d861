//! # Log Messages
//!
//! Format functions for operator-facing log lines.

pub const STARTING: &str = "Starting linkbot...";

pub fn config_loaded(path: &str, user: &str) -> String {
    format!("Loaded configuration from {path} for user: {user}")
}

pub fn store_loaded(path: &str, count: usize) -> String {
    format!("Loaded {count} link(s) from {path}")
}

pub fn store_missing(path: &str) -> String {
    format!("Link store {path} not found, starting empty")
}

pub fn store_written(name: &str, sender: &str) -> String {
    format!("Link '{name}' saved by {sender}")
}

pub fn store_write_failed(name: &str, err: &str) -> String {
    format!("Failed to persist link '{name}': {err}")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub fn dispatching(cmd: &str, args: &str, sender: &str) -> String {
    format!("Router dispatching cmd='{cmd}' args='{args}' sender='{sender}'")
}

pub fn lookup_hit(name: &str, sender: &str) -> String {
    format!("Lookup '{name}' for {sender}")
}

pub fn lookup_miss(name: &str) -> String {
    format!("No command or link named '{name}', ignoring")
}

pub fn send_failed(room: &str, err: &str) -> String {
    format!("Failed to send reply to {room}: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("💌 Received invite for room {room_id}")
}

pub fn join_failed(room_id: &str, err: &str) -> String {
    format!("Failed to join room {room_id}: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}
