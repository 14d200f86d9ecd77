//! wordtally CLI library
//!
//! This library provides the command-line interface for the wordtally
//! parallel word counter.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
