//! Subcommand implementations.

pub mod init;
pub mod output;
pub mod run;
