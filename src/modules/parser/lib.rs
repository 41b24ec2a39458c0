//! Command model parsing for tabsmith
//!
//! This crate loads command models from YAML or JSON files and validates
//! them before they reach the generator.

pub mod validator;
pub mod yaml;

pub use validator::ModelValidator;
pub use yaml::YamlParser;

use std::path::Path;

use tabsmith_core::{CommandNode, TabsmithError};

/// Serialization format of a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Yaml,
    Json,
}

impl ModelFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ModelFormat::Json,
            _ => ModelFormat::Yaml,
        }
    }
}

/// Parse and strictly validate a model file from a path
pub fn parse_file(path: impl AsRef<Path>) -> Result<CommandNode, TabsmithError> {
    parse_file_with(path, &ModelValidator::new())
}

/// Parse a model file from a path and validate it with `validator`
pub fn parse_file_with(
    path: impl AsRef<Path>,
    validator: &ModelValidator,
) -> Result<CommandNode, TabsmithError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        TabsmithError::Config(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    let model = parse_str(&content, ModelFormat::from_path(path))?;
    validator.validate(&model)?;
    Ok(model)
}

/// Parse and strictly validate a YAML model from a string
pub fn parse_string(content: &str) -> Result<CommandNode, TabsmithError> {
    let model = YamlParser::parse(content)?;

    let validator = ModelValidator::new();
    validator.validate(&model)?;

    Ok(model)
}

fn parse_str(content: &str, format: ModelFormat) -> Result<CommandNode, TabsmithError> {
    match format {
        ModelFormat::Yaml => YamlParser::parse(content),
        ModelFormat::Json => YamlParser::parse_json(content),
    }
}
