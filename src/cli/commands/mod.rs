//! CLI command implementations

pub mod config;
pub mod log;
pub mod run;
pub mod status;
