//! Commands module - one `execute` function per CLI subcommand.

pub mod migrate;
pub mod serve;
