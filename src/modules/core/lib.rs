//! Core domain logic for tabsmith
//!
//! This crate contains the command model that completion scripts are
//! generated from, and the error type shared by every tabsmith crate.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::{Result, TabsmithError};
