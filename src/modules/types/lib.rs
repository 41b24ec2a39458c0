//! Type definitions for tabsmith
//!
//! This crate contains the small vocabulary types shared across the tabsmith
//! workspace: the declared value type of an option and the completion policy
//! derived from it.

pub mod policy;
pub mod value_type;

pub use policy::CompletionPolicy;
pub use value_type::ValueType;
