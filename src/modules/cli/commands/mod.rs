//! CLI commands

mod completion;
mod generate;
mod init;

pub use completion::{command_model, CompletionCommand};
pub use generate::GenerateCommand;
pub use init::InitCommand;

use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::Path;
use tabsmith_core::TabsmithError;
use tempfile::NamedTempFile;

/// Tool name and version stamped into generated scripts
pub(crate) const BANNER: &str = concat!("tabsmith ", env!("CARGO_PKG_VERSION"));

/// tabsmith - bash completion scripts for nested command line interfaces
#[derive(Parser, Debug)]
#[command(name = "tabsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a bash completion script from a command model file
    Generate(GenerateCommand),

    /// Write a sample command model file
    Init(InitCommand),

    /// Print the completion script for tabsmith itself
    Completion(CompletionCommand),
}

/// Fail with `FileExists` unless `force` is set or `path` is free
pub(crate) fn ensure_writable(path: &Path, force: bool) -> Result<(), TabsmithError> {
    if !force && path.exists() {
        return Err(TabsmithError::FileExists(path.display().to_string()));
    }
    Ok(())
}

/// Write `contents` to `path` through a temporary file in the same directory
///
/// Without `overwrite` an existing `path` is left untouched and reported as
/// `FileExists`.
pub(crate) fn write_atomic(
    path: &Path,
    contents: &str,
    overwrite: bool,
    executable: bool,
) -> Result<(), TabsmithError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if executable { 0o755 } else { 0o644 };
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = executable;

    let persisted = if overwrite {
        file.persist(path)
    } else {
        file.persist_noclobber(path)
    };
    persisted.map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            TabsmithError::FileExists(path.display().to_string())
        } else {
            TabsmithError::Io(e.error)
        }
    })?;

    Ok(())
}
