//! Bash completion script generation
//!
//! Turns a [`CommandNode`] tree into a self-contained bash script. Every
//! command gets its own completion function; one entry point function walks
//! the words already typed to find the deepest subcommand and delegates to
//! its function, and a final `complete -F` line registers the entry point
//! for all root aliases.
//!
//! Generation is a pure function of its inputs: no I/O, no shared state, and
//! either a complete script or an error.

pub mod classify;
pub mod dispatch;
pub mod escape;
pub mod function;
pub mod sanitize;
pub mod script;

pub use classify::{ArgumentOption, Classification, OptionClassifier};
pub use dispatch::{DispatchGenerator, EntryFunction};
pub use function::{FunctionGenerator, GeneratedFunction};
pub use sanitize::sanitize;
pub use script::ScriptAssembler;

use tabsmith_core::{CommandNode, Result, TabsmithError};
use tracing::info;

/// Generate the completion script for `model`, registered under `root_aliases`
///
/// `banner` names the generating tool and its version; it only ends up in
/// the header comment.
pub fn generate<S: AsRef<str>>(
    root_aliases: &[S],
    model: &CommandNode,
    banner: &str,
) -> Result<String> {
    let aliases = validate_aliases(root_aliases)?;

    let dispatcher = DispatchGenerator::new();
    dispatcher.entry_identifier(model)?;

    let functions = FunctionGenerator::new().generate(model)?;
    let entry = dispatcher.generate(model, &functions, &aliases)?;
    let script = ScriptAssembler::new(banner).assemble(&model.name, &functions, &entry);

    info!(
        "Generated bash completion for '{}': {} functions, aliases {}",
        model.name,
        functions.len(),
        aliases.join(", ")
    );
    Ok(script)
}

fn validate_aliases<S: AsRef<str>>(root_aliases: &[S]) -> Result<Vec<String>> {
    if root_aliases.is_empty() {
        return Err(TabsmithError::InvalidArgument(
            "At least one root command alias is required".to_string(),
        ));
    }

    let mut aliases: Vec<String> = Vec::with_capacity(root_aliases.len());
    for alias in root_aliases {
        let alias = alias.as_ref();
        if alias.is_empty() || alias.starts_with('-') || alias.chars().any(char::is_whitespace) {
            return Err(TabsmithError::InvalidArgument(format!(
                "Invalid root command alias '{}'",
                alias.escape_debug()
            )));
        }
        if !aliases.iter().any(|a| a == alias) {
            aliases.push(alias.to_string());
        }
    }
    Ok(aliases)
}
