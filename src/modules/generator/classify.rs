//! Option classification

use std::collections::HashSet;

use tabsmith_core::{CommandNode, Result, TabsmithError};
use tabsmith_types::CompletionPolicy;

/// An argument-taking option: every alias it answers to, and how its value
/// is completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentOption {
    pub tokens: Vec<String>,
    pub policy: CompletionPolicy,
}

/// The options of one command, split by arity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Aliases of options that take no argument
    pub flag_tokens: Vec<String>,
    /// Aliases of options that consume the following word
    pub arg_tokens: Vec<String>,
    /// Argument-taking options with their completion policy
    pub argument_options: Vec<ArgumentOption>,
}

/// Option classifier
pub struct OptionClassifier;

impl OptionClassifier {
    /// Partition the options of `node` into flags and argument options
    pub fn classify(node: &CommandNode) -> Result<Classification> {
        let mut seen = HashSet::new();
        let mut classification = Classification::default();

        for option in &node.options {
            if option.names.is_empty() {
                return Err(TabsmithError::InvalidCommandModel(format!(
                    "Command '{}' declares an option without names",
                    node.name
                )));
            }

            for name in &option.names {
                check_token(&node.name, "option name", name)?;
                if !seen.insert(name.as_str()) {
                    return Err(TabsmithError::DuplicateOption {
                        command: node.name.clone(),
                        option: name.clone(),
                    });
                }
            }

            match option.policy() {
                None => classification.flag_tokens.extend(option.names.iter().cloned()),
                Some(policy) => {
                    if let Some(values) = policy.candidates() {
                        for value in values {
                            check_token(&node.name, "completion value", value)?;
                        }
                    }
                    classification.arg_tokens.extend(option.names.iter().cloned());
                    classification.argument_options.push(ArgumentOption {
                        tokens: option.names.clone(),
                        policy,
                    });
                }
            }
        }

        Ok(classification)
    }
}

/// Reject tokens that cannot be offered as a single completion word
pub(crate) fn check_token(command: &str, what: &str, token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(TabsmithError::InvalidCommandModel(format!(
            "Command '{}' has an empty {}",
            command, what
        )));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(TabsmithError::InvalidCommandModel(format!(
            "Command '{}' has {} '{}' containing whitespace",
            command,
            what,
            token.escape_debug()
        )));
    }
    Ok(())
}
