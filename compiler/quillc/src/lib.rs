//! The Quill command-line driver.
//!
//! `quill` runs, checks and formats `.ql` scripts on top of the embedding
//! API in `quill_eval`. The pieces are exposed as a library so the commands
//! can be tested without spawning a process.

pub mod cli;
pub mod commands;
pub mod loader;
mod tracing_setup;

pub use cli::{parse_args, Command, Invocation, Options, UsageError, SCRIPT_EXTENSION};
pub use loader::{LoadError, Script};
pub use tracing_setup::init_tracing;
