//! Command model validation

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tabsmith_core::{CommandNode, OptionSpec, TabsmithError};
use tracing::warn;

/// Regex pattern for command names typed on a command line
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]*$").unwrap());

/// Regex pattern for option aliases: `-x`, `--long-name`, `-Dkey`
static OPTION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^--?[^\s\-]\S*$").unwrap());

/// Command model validator
pub struct ModelValidator {
    /// Whether to validate command names strictly
    strict_names: bool,
}

impl ModelValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self { strict_names: true }
    }

    /// Create a validator with lenient name checking
    pub fn lenient() -> Self {
        Self {
            strict_names: false,
        }
    }

    /// Validate every command of the model
    pub fn validate(&self, model: &CommandNode) -> Result<(), TabsmithError> {
        let mut stack = vec![model];
        while let Some(command) = stack.pop() {
            self.validate_command_name(&command.name)?;
            self.validate_subcommands(command)?;
            self.validate_options(command)?;
            stack.extend(command.subcommands.iter());
        }
        Ok(())
    }

    /// Validate a command name
    fn validate_command_name(&self, name: &str) -> Result<(), TabsmithError> {
        if name.trim().is_empty() {
            return Err(TabsmithError::Validation(
                "Command name cannot be empty".to_string(),
            ));
        }

        if name.chars().any(char::is_whitespace) {
            return Err(TabsmithError::Validation(format!(
                "Invalid command name '{}': must not contain whitespace",
                name
            )));
        }

        if self.strict_names && !NAME_PATTERN.is_match(name) {
            return Err(TabsmithError::Validation(format!(
                "Invalid command name '{}': must start with a letter or digit and contain only letters, digits, '.', '_', '+' or '-'",
                name
            )));
        }

        Ok(())
    }

    fn validate_subcommands(&self, command: &CommandNode) -> Result<(), TabsmithError> {
        let mut names = HashSet::new();
        for subcommand in &command.subcommands {
            if !names.insert(subcommand.name.as_str()) {
                return Err(TabsmithError::Validation(format!(
                    "Duplicate subcommand name '{}' in command '{}'",
                    subcommand.name, command.name
                )));
            }
        }
        Ok(())
    }

    fn validate_options(&self, command: &CommandNode) -> Result<(), TabsmithError> {
        let mut seen = HashSet::new();

        for option in &command.options {
            if option.names.is_empty() {
                return Err(TabsmithError::Validation(format!(
                    "Command '{}' declares an option without names",
                    command.name
                )));
            }

            for name in &option.names {
                if !OPTION_PATTERN.is_match(name) {
                    return Err(TabsmithError::Validation(format!(
                        "Invalid option name '{}' in command '{}': must start with '-' and contain no whitespace",
                        name, command.name
                    )));
                }

                if !seen.insert(name.as_str()) {
                    return Err(TabsmithError::DuplicateOption {
                        command: command.name.clone(),
                        option: name.clone(),
                    });
                }
            }

            self.validate_candidates(command, option)?;
        }

        Ok(())
    }

    fn validate_candidates(
        &self,
        command: &CommandNode,
        option: &OptionSpec,
    ) -> Result<(), TabsmithError> {
        let label = option.names.join("|");

        if !option.takes_argument {
            if option.completion_candidates.is_some() {
                warn!(
                    "Flag '{}' of '{}' declares completion candidates; they are ignored",
                    label, command.name
                );
            }
            if option.file_valued {
                warn!(
                    "Flag '{}' of '{}' is marked file-valued; it is ignored",
                    label, command.name
                );
            }
            return Ok(());
        }

        for candidate in option.completion_candidates.iter().flatten() {
            if candidate.trim().is_empty() {
                return Err(TabsmithError::Validation(format!(
                    "Option '{}' of '{}' has an empty completion candidate",
                    label, command.name
                )));
            }
            if candidate.chars().any(char::is_whitespace) {
                return Err(TabsmithError::Validation(format!(
                    "Completion candidate '{}' of option '{}' in '{}' contains whitespace",
                    candidate, label, command.name
                )));
            }
        }

        Ok(())
    }
}

impl Default for ModelValidator {
    fn default() -> Self {
        Self::new()
    }
}
