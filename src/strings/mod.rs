//! # Strings Module
//!
//! Centralizes user-facing replies, help text and log lines.

pub mod help;
pub mod logs;
pub mod messages;
