//! tabsmith CLI
//!
//! This crate provides the command-line interface for tabsmith including:
//! - generate: Generate a bash completion script from a command model
//! - init: Write a sample command model
//! - completion: Completion script for tabsmith itself

pub mod commands;

pub use commands::{Cli, Commands};
