//! Library side of the `mgd77` command: subcommand implementations, table
//! rendering and logging setup.

pub mod commands;
pub mod listing;
pub mod logging;
pub mod summary;
