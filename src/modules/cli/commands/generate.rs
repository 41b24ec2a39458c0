//! Generate command implementation
//!
//! Loads a command model file and writes the bash completion script for it,
//! optionally together with a sample launcher script for the command.

use clap::{Args, ValueHint};
use std::io::Write;
use std::path::{Path, PathBuf};
use tabsmith_core::TabsmithError;
use tabsmith_parser::{parse_file_with, ModelValidator};
use tracing::{debug, info};

use super::{ensure_writable, write_atomic, BANNER};

/// Generate command arguments
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Command model file (.yaml, .yml or .json)
    #[arg(value_hint = ValueHint::FilePath)]
    pub model: PathBuf,

    /// Name of the command to complete (defaults to the model's name)
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Path of the completion script to write (`-` for stdout)
    ///
    /// Defaults to `<name>_completion` in the current directory.
    #[arg(short = 'o', long = "completion-script", value_hint = ValueHint::FilePath)]
    pub completion_script: Option<PathBuf>,

    /// Also write a sample `<name>` launcher script next to the completion script
    #[arg(short = 'w', long = "write-command-script")]
    pub write_command_script: bool,

    /// Overwrite existing files
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Additional command names to register the completion for
    #[arg(short = 'a', long = "alias", value_name = "ALIAS")]
    pub aliases: Vec<String>,

    /// Accept command names outside the strict naming rules
    #[arg(long)]
    pub lenient: bool,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self) -> Result<(), TabsmithError> {
        info!("Generating completion script from: {}", self.model.display());

        let validator = if self.lenient {
            ModelValidator::lenient()
        } else {
            ModelValidator::new()
        };
        let mut model = parse_file_with(&self.model, &validator)?;
        if let Some(name) = &self.name {
            debug!("Overriding command name '{}' with '{}'", model.name, name);
            model.name = name.clone();
        }

        let aliases = self.registration_aliases(&model.name);
        let script = tabsmith_generator::generate(&aliases, &model, BANNER)?;

        let target = self.completion_target(&model.name)?;
        let command_script = match &target {
            Some(path) => Self::sibling(path, &model.name),
            None => PathBuf::from(&model.name),
        };

        // Refuse before writing anything
        if let Some(path) = &target {
            ensure_writable(path, self.force)?;
        }
        if self.write_command_script {
            ensure_writable(&command_script, self.force)?;
        }

        if self.write_command_script {
            write_atomic(
                &command_script,
                &Self::generate_command_script(&model.name),
                self.force,
                true,
            )?;
            info!("Created: {}", command_script.display());
        }

        match &target {
            Some(path) => {
                write_atomic(path, &script, self.force, false)?;
                info!("Created: {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(script.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    /// Default aliases first, then the extra ones in the order given
    fn registration_aliases(&self, name: &str) -> Vec<String> {
        let mut aliases = vec![
            name.to_string(),
            format!("{}.sh", name),
            format!("{}.bash", name),
        ];
        aliases.extend(self.aliases.iter().cloned());
        aliases
    }

    /// `None` means stdout
    fn completion_target(&self, name: &str) -> Result<Option<PathBuf>, TabsmithError> {
        let target = match &self.completion_script {
            Some(path) if path.as_os_str() == "-" => None,
            Some(path) => Some(path.clone()),
            None => Some(PathBuf::from(format!("{}_completion", file_name(name)?))),
        };
        if self.write_command_script {
            file_name(name)?;
        }
        Ok(target)
    }

    /// `name` is checked by [`file_name`] before it gets here
    fn sibling(path: &Path, name: &str) -> PathBuf {
        match path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Sample launcher the completion script can be tried against
    fn generate_command_script(name: &str) -> String {
        format!(
            r#"#!/usr/bin/env bash
#
# Launcher for `{name}`, generated by {banner}.
# Point APP_HOME at the installation of {name} and adjust the command below.

APP_HOME="${{APP_HOME:-$(cd "$(dirname "${{BASH_SOURCE[0]}}")" && pwd)}}"
exec "${{APP_HOME}}/bin/{name}" "$@"
"#,
            name = name,
            banner = BANNER
        )
    }
}

/// Command name usable as a single path component
fn file_name(name: &str) -> Result<&str, TabsmithError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(TabsmithError::InvalidArgument(format!(
            "Command name '{}' cannot be used as a file name; pass -o",
            name
        )));
    }
    Ok(name)
}
