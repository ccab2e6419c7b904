// src/commands/mod.rs
mod config;
mod hook;
mod prepare;

pub use config::cmd_config;
pub use hook::cmd_hook;
pub use prepare::{cmd_prepare, Outcome};
