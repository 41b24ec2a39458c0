//! Completion policies for option arguments

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the argument of an argument-taking option is completed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "candidates")]
pub enum CompletionPolicy {
    /// Offer exactly these values
    Enumerated(Vec<String>),
    /// Delegate to the shell's filename completion
    Filename,
    /// Offer nothing
    FreeText,
}

impl fmt::Display for CompletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionPolicy::Enumerated(_) => write!(f, "values"),
            CompletionPolicy::Filename => write!(f, "files"),
            CompletionPolicy::FreeText => write!(f, "free text"),
        }
    }
}

impl CompletionPolicy {
    /// Derive the policy from an option's declared candidates and file flag.
    ///
    /// A closed candidate set wins over filename completion when both are
    /// declared.
    pub fn resolve(candidates: Option<&[String]>, file_valued: bool) -> Self {
        match candidates {
            Some(values) => CompletionPolicy::Enumerated(values.to_vec()),
            None if file_valued => CompletionPolicy::Filename,
            None => CompletionPolicy::FreeText,
        }
    }

    /// Candidate values, if this is a closed set
    pub fn candidates(&self) -> Option<&[String]> {
        match self {
            CompletionPolicy::Enumerated(values) => Some(values),
            _ => None,
        }
    }
}
