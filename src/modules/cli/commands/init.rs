//! Init command implementation

use clap::{Args, ValueHint};
use std::path::Path;
use tabsmith_core::TabsmithError;
use tracing::info;

use super::{ensure_writable, write_atomic};

/// Init command arguments
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Command name
    #[arg(default_value = "my-cli")]
    pub name: String,

    /// Output directory
    #[arg(short, long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub output: String,

    /// Overwrite an existing model file
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self) -> Result<(), TabsmithError> {
        info!("Initializing command model: {}", self.name);

        if self.name.is_empty() || self.name.contains(['/', '\\']) {
            return Err(TabsmithError::InvalidArgument(format!(
                "Invalid command name '{}'",
                self.name
            )));
        }

        let model_path = Path::new(&self.output).join(format!("{}.yaml", self.name));
        ensure_writable(&model_path, self.force)?;
        write_atomic(&model_path, &self.generate_model(), self.force, false)?;

        info!("Created: {}", model_path.display());

        println!("\nNext steps:");
        println!("  1. Describe the options and subcommands of `{}` in {}", self.name, model_path.display());
        println!(
            "  2. Run: tabsmith generate {} -o {}_completion",
            model_path.display(),
            self.name
        );
        println!("  3. Source {}_completion from ~/.bashrc", self.name);

        Ok(())
    }

    /// Generate the sample model file content
    fn generate_model(&self) -> String {
        format!(
            r#"# tabsmith command model
#
# Options list their aliases in `names`. `type` is one of boolean, string,
# int, float, host, enum, file, path or directory; options with `values`
# default to enum and offer exactly those values. Subcommands are keyed by
# name and nest to any depth.

name: '{}'
description: Sample command line tool

options:
  - names: -h --help
    description: Show this help message and exit
  - names: -V --version
    description: Print version information and exit
  - names: -v --verbose

subcommands:
  build:
    description: Build a target
    options:
      - names: -o --output
        type: file
      - names: -j --jobs
        type: int
      - names: -p --profile
        values: [dev, release]

  remote:
    description: Manage remotes
    subcommands:
      add:
        options:
          - names: --url
            type: host
      remove:
        options:
          - names: -f --force
"#,
            self.name.replace('\'', "''")
        )
    }
}
