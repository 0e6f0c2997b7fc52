//! CLI argument model for the auto-assign agent binary.
//!
//! Every option doubles as a GitHub Actions environment variable so the agent
//! runs unchanged inside a workflow step.

pub mod cli_args;

pub use cli_args::{parse_enabled_unless_false, Cli};
