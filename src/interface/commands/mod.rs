//! # Command Handlers
//!
//! One handler per built-in command. Handlers are registered in the command registry and
//! invoked by the Router.

pub mod help;
pub mod servers;
pub mod set;
pub mod show_all;
