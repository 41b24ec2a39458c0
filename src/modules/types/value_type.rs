//! Declared value types for command options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value type an option declares for its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Pure flag, consumes no argument
    Boolean,
    /// Free-form text
    String,
    /// Integer number
    Int,
    /// Floating point number
    Float,
    /// Host name or address
    Host,
    /// One of a closed set of values
    Enum,
    /// Path to a regular file
    File,
    /// Any filesystem path
    Path,
    /// Path to a directory
    Directory,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::String => write!(f, "string"),
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Host => write!(f, "host"),
            ValueType::Enum => write!(f, "enum"),
            ValueType::File => write!(f, "file"),
            ValueType::Path => write!(f, "path"),
            ValueType::Directory => write!(f, "directory"),
        }
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boolean" | "bool" | "flag" => Ok(ValueType::Boolean),
            "string" | "str" | "text" => Ok(ValueType::String),
            "int" | "integer" | "long" => Ok(ValueType::Int),
            "float" | "double" | "number" => Ok(ValueType::Float),
            "host" | "hostname" | "address" => Ok(ValueType::Host),
            "enum" | "choice" => Ok(ValueType::Enum),
            "file" => Ok(ValueType::File),
            "path" => Ok(ValueType::Path),
            "directory" | "dir" => Ok(ValueType::Directory),
            _ => Err(format!("Unknown value type: {}", s)),
        }
    }
}

impl ValueType {
    /// Returns all supported value types
    pub fn all() -> &'static [ValueType] {
        &[
            ValueType::Boolean,
            ValueType::String,
            ValueType::Int,
            ValueType::Float,
            ValueType::Host,
            ValueType::Enum,
            ValueType::File,
            ValueType::Path,
            ValueType::Directory,
        ]
    }

    /// Returns true if an option of this type consumes the following word
    pub fn takes_argument(&self) -> bool {
        !matches!(self, ValueType::Boolean)
    }

    /// Returns true if the argument should be completed as a filename
    pub fn is_file_valued(&self) -> bool {
        matches!(self, ValueType::File | ValueType::Path | ValueType::Directory)
    }
}
