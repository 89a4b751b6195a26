//! CLI subcommand handlers.

pub mod process;
