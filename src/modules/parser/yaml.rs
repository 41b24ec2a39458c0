//! YAML/JSON command model parser

use std::str::FromStr;

use serde::Deserialize;
use tabsmith_core::{CommandNode, OptionSpec, TabsmithError};
use tabsmith_types::ValueType;

/// Parser for command model files
pub struct YamlParser;

/// Hand-written model schema: subcommands keyed by name, options typed.
///
/// ```yaml
/// name: demo
/// options:
///   - names: -h --help
///   - names: [-u, --timeUnit]
///     values: [SECONDS, MINUTES]
/// subcommands:
///   sub1:
///     options:
///       - names: --num
///         type: float
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TerseCommand {
    /// Only read at the root; subcommands are named by their key.
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    options: Vec<TerseOption>,

    /// Mapping keeps declaration order.
    #[serde(default)]
    subcommands: serde_yaml::Mapping,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TerseOption {
    names: TerseNames,

    #[serde(rename = "type", default)]
    value_type: Option<String>,

    #[serde(default)]
    values: Option<Vec<serde_yaml::Value>>,

    #[serde(default)]
    description: Option<String>,
}

/// Either a list of aliases or one string of whitespace/comma separated aliases
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TerseNames {
    Many(Vec<String>),
    One(String),
}

impl TerseNames {
    fn into_vec(self) -> Vec<String> {
        match self {
            TerseNames::Many(names) => names,
            TerseNames::One(names) => names
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl YamlParser {
    /// Parse a YAML string into a command model
    pub fn parse(content: &str) -> Result<CommandNode, TabsmithError> {
        // Canonical schema first.
        if let Ok(model) = serde_yaml::from_str::<CommandNode>(content) {
            return Ok(model);
        }

        let terse = serde_yaml::from_str::<TerseCommand>(content)
            .map_err(|e| TabsmithError::Config(format!("YAML parse error: {}", e)))?;
        terse_to_model(terse)
    }

    /// Parse a JSON string into a command model
    pub fn parse_json(content: &str) -> Result<CommandNode, TabsmithError> {
        if let Ok(model) = serde_json::from_str::<CommandNode>(content) {
            return Ok(model);
        }

        let terse = serde_json::from_str::<TerseCommand>(content)
            .map_err(|e| TabsmithError::Config(format!("JSON parse error: {}", e)))?;
        terse_to_model(terse)
    }
}

fn terse_to_model(cfg: TerseCommand) -> Result<CommandNode, TabsmithError> {
    let name = cfg
        .name
        .clone()
        .ok_or_else(|| TabsmithError::Config("Model is missing 'name'".to_string()))?;
    terse_to_command(name, cfg)
}

fn terse_to_command(name: String, cfg: TerseCommand) -> Result<CommandNode, TabsmithError> {
    let mut command = CommandNode::new(name);
    command.description = cfg.description;

    for option in cfg.options {
        command.options.push(terse_to_option(&command.name, option)?);
    }

    for (key, value) in cfg.subcommands {
        let sub_name = match key {
            serde_yaml::Value::String(s) => s,
            other => yaml_scalar_to_string(other).ok_or_else(|| {
                TabsmithError::Config(format!(
                    "Command '{}' has a subcommand without a name",
                    command.name
                ))
            })?,
        };

        let sub = match value {
            serde_yaml::Value::Null => TerseCommand::default(),
            other => serde_yaml::from_value::<TerseCommand>(other).map_err(|e| {
                TabsmithError::Config(format!(
                    "Invalid subcommand '{} {}': {}",
                    command.name, sub_name, e
                ))
            })?,
        };
        if sub.name.is_some() {
            return Err(TabsmithError::Config(format!(
                "Subcommand '{} {}' is named by its key and cannot set 'name'",
                command.name, sub_name
            )));
        }

        command.subcommands.push(terse_to_command(sub_name, sub)?);
    }

    Ok(command)
}

fn terse_to_option(command: &str, option: TerseOption) -> Result<OptionSpec, TabsmithError> {
    let names = option.names.into_vec();
    let label = names.join("|");

    let value_type = match (&option.value_type, &option.values) {
        (Some(t), _) => ValueType::from_str(t).map_err(|e| {
            TabsmithError::Config(format!("Option '{}' of '{}': {}", label, command, e))
        })?,
        (None, Some(_)) => ValueType::Enum,
        (None, None) => ValueType::Boolean,
    };

    let mut spec = OptionSpec::typed(names, value_type);
    spec.description = option.description;

    if let Some(values) = option.values {
        if !value_type.takes_argument() {
            return Err(TabsmithError::Config(format!(
                "Option '{}' of '{}' is a flag and cannot declare values",
                label, command
            )));
        }
        spec = spec.with_candidates(values.into_iter().filter_map(yaml_scalar_to_string));
    }

    Ok(spec)
}

fn yaml_scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s),
        other => serde_yaml::to_string(&other)
            .ok()
            .map(|s| s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsmith_types::CompletionPolicy;

    #[test]
    fn test_parse_canonical_model() {
        let yaml = r#"
name: demo
options:
  - names: ["-h", "--help"]
subcommands:
  - name: sub1
    options:
      - names: ["--num"]
        takes_argument: true
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.name, "demo");
        assert_eq!(model.options[0].names, vec!["-h", "--help"]);
        assert_eq!(model.subcommands[0].name, "sub1");
        assert!(model.subcommands[0].options[0].takes_argument);
    }

    #[test]
    fn test_parse_terse_model() {
        let yaml = r#"
name: picocompletion-demo
options:
  - names: -V --version
  - names: -h, --help
subcommands:
  sub1:
    description: First level subcommand 1
    options:
      - names: --num
        type: float
  sub2:
    options:
      - names: [--directory, -d]
        type: dir
    subcommands:
      subsub1:
        options:
          - names: [-h, --host]
            type: host
      subsub2:
        options:
          - names: [-u, --timeUnit]
            values: [SECONDS, MINUTES]
      subsub3:
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.name, "picocompletion-demo");
        assert_eq!(model.options[0].names, vec!["-V", "--version"]);
        assert_eq!(model.options[1].names, vec!["-h", "--help"]);
        assert!(!model.options[1].takes_argument);

        let sub1 = model.find_subcommand("sub1").unwrap();
        assert_eq!(sub1.description.as_deref(), Some("First level subcommand 1"));
        assert_eq!(sub1.options[0].policy(), Some(CompletionPolicy::FreeText));

        let sub2 = model.find_subcommand("sub2").unwrap();
        assert_eq!(sub2.options[0].policy(), Some(CompletionPolicy::Filename));
        assert_eq!(
            sub2.subcommand_names().collect::<Vec<_>>(),
            vec!["subsub1", "subsub2", "subsub3"]
        );

        let subsub2 = sub2.find_subcommand("subsub2").unwrap();
        assert_eq!(
            subsub2.options[0].policy(),
            Some(CompletionPolicy::Enumerated(vec![
                "SECONDS".to_string(),
                "MINUTES".to_string()
            ]))
        );
        assert!(sub2.find_subcommand("subsub3").unwrap().is_leaf());
    }

    #[test]
    fn test_parse_terse_preserves_declaration_order() {
        let yaml = r#"
name: order
subcommands:
  zeta:
  alpha:
  mid:
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(
            model.subcommand_names().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn test_parse_numeric_values() {
        let yaml = r#"
name: level
options:
  - names: --level
    values: [1, 2, 3]
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(
            model.options[0].completion_candidates,
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn test_parse_json_model() {
        let json = r#"{
  "name": "demo",
  "options": [{ "names": "-t --timeout", "type": "int" }],
  "subcommands": { "sub1": null }
}"#;
        let model = YamlParser::parse_json(json).unwrap();
        assert_eq!(model.options[0].names, vec!["-t", "--timeout"]);
        assert!(model.options[0].takes_argument);
        assert_eq!(model.subcommands[0].name, "sub1");
    }

    #[test]
    fn test_parse_rejects_bad_models() {
        assert!(YamlParser::parse("invalid: yaml: content: [").is_err());
        assert!(YamlParser::parse("options: []").is_err());

        let unknown_type = r#"
name: demo
options:
  - names: --when
    type: timestamp
"#;
        let err = YamlParser::parse(unknown_type).unwrap_err();
        assert!(err.to_string().contains("Unknown value type"));

        let flag_with_values = r#"
name: demo
options:
  - names: --on
    type: boolean
    values: [yes, no]
"#;
        assert!(YamlParser::parse(flag_with_values).is_err());

        let named_subcommand = r#"
name: demo
subcommands:
  sub:
    name: other
"#;
        assert!(YamlParser::parse(named_subcommand).is_err());
    }
}
