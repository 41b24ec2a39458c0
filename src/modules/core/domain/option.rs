//! Option definitions

use serde::{Deserialize, Serialize};
use tabsmith_types::{CompletionPolicy, ValueType};

/// One declared option of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionSpec {
    /// Aliases for this option, e.g. `-h` and `--help`
    pub names: Vec<String>,

    /// Whether the option consumes the following word (false for flags)
    #[serde(default)]
    pub takes_argument: bool,

    /// Closed set of values offered when completing the argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_candidates: Option<Vec<String>>,

    /// Complete the argument as a filename when no closed set is declared
    #[serde(default)]
    pub file_valued: bool,

    /// Human-readable description of this option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSpec {
    fn with_names<I, S>(names: I, takes_argument: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            takes_argument,
            completion_candidates: None,
            file_valued: false,
            description: None,
        }
    }

    /// Create a pure flag
    pub fn flag<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_names(names, false)
    }

    /// Create an option that takes a free-text argument
    pub fn argument<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_names(names, true)
    }

    /// Create an option whose arity and completion follow a declared value type
    pub fn typed<I, S>(names: I, value_type: ValueType) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut option = Self::with_names(names, value_type.takes_argument());
        option.file_valued = value_type.is_file_valued();
        option
    }

    /// Offer a closed set of values for the argument
    pub fn with_candidates<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completion_candidates = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Complete the argument as a filename
    pub fn with_file_completion(mut self) -> Self {
        self.file_valued = true;
        self
    }

    /// Set the description for this option
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Completion policy for the argument, `None` for flags
    pub fn policy(&self) -> Option<CompletionPolicy> {
        self.takes_argument.then(|| {
            CompletionPolicy::resolve(self.completion_candidates.as_deref(), self.file_valued)
        })
    }

    /// Returns true if any alias equals `name`
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}
