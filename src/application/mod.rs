//! # Application Layer
//!
//! Contains the core logic of the bot: the link store, the command registry, argument
//! parsing and the router that ties them together.

pub mod parsing;
pub mod registry;
pub mod router;
pub mod store;
