//! Line-oriented shell that drives a [`TripSession`](crate::core::TripSession)
//! from typed commands or a script on stdin.

pub mod commands;
pub mod core;
pub mod output;
pub mod shell;

pub use self::core::{CliMode, CommandError, ShellContext};
pub use shell::run_cli;
