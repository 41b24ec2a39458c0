//! Per-command completion functions

use std::collections::HashSet;

use tabsmith_core::{CommandNode, Result, TabsmithError};
use tabsmith_types::CompletionPolicy;
use tracing::debug;

use crate::classify::{check_token, ArgumentOption, OptionClassifier};
use crate::escape::{case_pattern, comment, compgen_words};
use crate::sanitize::sanitize;

/// Prefix of every per-command function name
pub const FUNCTION_PREFIX: &str = "_tabsmith";

/// A direct subcommand as seen from its parent's function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcommand {
    pub name: String,
    pub identifier: String,
}

/// Everything needed to render the completion function of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    /// Shell function name
    pub identifier: String,
    /// Raw command names from the root down to this command
    pub path: Vec<String>,
    pub description: Option<String>,
    pub flag_tokens: Vec<String>,
    pub arg_tokens: Vec<String>,
    pub argument_options: Vec<ArgumentOption>,
    pub subcommands: Vec<Subcommand>,
}

impl GeneratedFunction {
    /// Command line that invokes this command, e.g. `demo sub2 subsub1`
    pub fn display_path(&self) -> String {
        self.path.join(" ")
    }

    /// Every word offered when no option value is being completed
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.flag_tokens
            .iter()
            .chain(self.arg_tokens.iter())
            .map(String::as_str)
            .chain(self.subcommands.iter().map(|s| s.name.as_str()))
    }

    /// Append the shell source of this function to `out`
    pub fn render(&self, out: &mut String) {
        let subcommand_names: Vec<&str> =
            self.subcommands.iter().map(|s| s.name.as_str()).collect();

        out.push_str(&format!(
            "# Generates completions for the options and subcommands of the `{}` command.\n",
            comment(&self.display_path())
        ));
        if let Some(description) = &self.description {
            out.push_str(&format!("# {}\n", comment(description)));
        }
        out.push_str(&format!("function {}() {{\n", self.identifier));
        out.push_str("  # Get completion data\n");
        out.push_str("  local CURR_WORD=${COMP_WORDS[COMP_CWORD]}\n");
        out.push_str("  local PREV_WORD=${COMP_WORDS[COMP_CWORD-1]}\n");
        out.push('\n');
        out.push_str(&format!("  local COMMANDS={}\n", compgen_words(&subcommand_names)));
        out.push_str(&format!("  local FLAG_OPTS={}\n", compgen_words(&self.flag_tokens)));
        out.push_str(&format!("  local ARG_OPTS={}\n", compgen_words(&self.arg_tokens)));

        if !self.argument_options.is_empty() {
            out.push('\n');
            out.push_str("  case \"${PREV_WORD}\" in\n");
            for option in &self.argument_options {
                out.push_str(&format!("    {})\n", case_pattern(&option.tokens)));
                match &option.policy {
                    CompletionPolicy::Enumerated(values) => {
                        out.push_str(&format!(
                            "      mapfile -t COMPREPLY < <(compgen -W {} -- \"${{CURR_WORD}}\") # values\n",
                            compgen_words(values)
                        ));
                    }
                    CompletionPolicy::Filename => {
                        out.push_str("      compopt -o filenames 2>/dev/null\n");
                        out.push_str(
                            "      mapfile -t COMPREPLY < <(compgen -f -- \"${CURR_WORD}\") # files\n",
                        );
                    }
                    CompletionPolicy::FreeText => {
                        out.push_str("      COMPREPLY=() # free text\n");
                    }
                }
                out.push_str("      return 0\n");
                out.push_str("      ;;\n");
            }
            out.push_str("  esac\n");
        }

        out.push('\n');
        out.push_str(
            "  mapfile -t COMPREPLY < <(compgen -W \"${FLAG_OPTS} ${ARG_OPTS} ${COMMANDS}\" -- \"${CURR_WORD}\")\n",
        );
        out.push_str("}\n");
    }
}

/// Builds one [`GeneratedFunction`] per command of a tree
pub struct FunctionGenerator {
    prefix: String,
}

impl FunctionGenerator {
    /// Create a generator using the default function prefix
    pub fn new() -> Self {
        Self::with_prefix(FUNCTION_PREFIX)
    }

    /// Create a generator using a custom function prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Shell function name for the command at `path`
    pub fn identifier<S: AsRef<str>>(&self, path: &[S]) -> Result<String> {
        Ok(format!("{}{}", self.prefix, sanitize(path)?))
    }

    /// Generate functions for `root` and every command below it, root first,
    /// depth first, in declaration order
    pub fn generate(&self, root: &CommandNode) -> Result<Vec<GeneratedFunction>> {
        let mut functions = Vec::with_capacity(root.node_count());
        let mut stack: Vec<(&CommandNode, Vec<String>)> = vec![(root, vec![root.name.clone()])];

        while let Some((node, path)) = stack.pop() {
            check_token(&node.name, "command name", &node.name)?;
            let mut sibling_names = HashSet::new();
            for subcommand in &node.subcommands {
                check_token(&node.name, "subcommand name", &subcommand.name)?;
                if !sibling_names.insert(subcommand.name.as_str()) {
                    return Err(TabsmithError::InvalidCommandModel(format!(
                        "Command '{}' declares subcommand '{}' more than once",
                        node.name, subcommand.name
                    )));
                }
            }

            let classification = OptionClassifier::classify(node)?;

            let mut subcommands = Vec::with_capacity(node.subcommands.len());
            for subcommand in &node.subcommands {
                let mut child_path = path.clone();
                child_path.push(subcommand.name.clone());
                subcommands.push(Subcommand {
                    name: subcommand.name.clone(),
                    identifier: self.identifier(&child_path)?,
                });
            }

            let function = GeneratedFunction {
                identifier: self.identifier(&path)?,
                path: path.clone(),
                description: node.description.clone(),
                flag_tokens: classification.flag_tokens,
                arg_tokens: classification.arg_tokens,
                argument_options: classification.argument_options,
                subcommands,
            };
            debug!(
                "Generated completion function {} for '{}'",
                function.identifier,
                function.display_path()
            );
            functions.push(function);

            for subcommand in node.subcommands.iter().rev() {
                let mut child_path = path.clone();
                child_path.push(subcommand.name.clone());
                stack.push((subcommand, child_path));
            }
        }

        Ok(functions)
    }
}

impl Default for FunctionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsmith_core::OptionSpec;
    use tabsmith_types::ValueType;

    fn nested() -> CommandNode {
        CommandNode::new("demo")
            .with_option(OptionSpec::flag(["-V", "--version"]))
            .with_option(OptionSpec::flag(["-h", "--help"]))
            .with_subcommand(
                CommandNode::new("sub1")
                    .with_option(OptionSpec::typed(["--num"], ValueType::Float))
                    .with_option(OptionSpec::typed(["--str"], ValueType::String)),
            )
            .with_subcommand(
                CommandNode::new("sub2")
                    .with_option(OptionSpec::typed(["--num2"], ValueType::Int))
                    .with_option(OptionSpec::typed(["--directory", "-d"], ValueType::File))
                    .with_subcommand(
                        CommandNode::new("subsub1")
                            .with_option(OptionSpec::typed(["-h", "--host"], ValueType::Host)),
                    )
                    .with_subcommand(CommandNode::new("subsub2")),
            )
    }

    #[test]
    fn test_generate_order_is_root_first_depth_first() {
        let functions = FunctionGenerator::new().generate(&nested()).unwrap();
        let paths: Vec<String> = functions.iter().map(|f| f.display_path()).collect();
        assert_eq!(
            paths,
            vec![
                "demo",
                "demo sub1",
                "demo sub2",
                "demo sub2 subsub1",
                "demo sub2 subsub2"
            ]
        );
    }

    #[test]
    fn test_generate_links_subcommand_identifiers() {
        let functions = FunctionGenerator::new().generate(&nested()).unwrap();
        let sub2 = &functions[2];
        assert_eq!(sub2.identifier, "_tabsmith_4_demo_4_sub2");
        assert_eq!(
            sub2.subcommands,
            vec![
                Subcommand {
                    name: "subsub1".to_string(),
                    identifier: "_tabsmith_4_demo_4_sub2_7_subsub1".to_string(),
                },
                Subcommand {
                    name: "subsub2".to_string(),
                    identifier: "_tabsmith_4_demo_4_sub2_7_subsub2".to_string(),
                },
            ]
        );
        assert_eq!(functions[3].identifier, sub2.subcommands[0].identifier);
    }

    #[test]
    fn test_candidates_union() {
        let functions = FunctionGenerator::new().generate(&nested()).unwrap();
        assert_eq!(
            functions[0].candidates().collect::<Vec<_>>(),
            vec!["-V", "--version", "-h", "--help", "sub1", "sub2"]
        );
        assert_eq!(
            functions[2].candidates().collect::<Vec<_>>(),
            vec!["--num2", "--directory", "-d", "subsub1", "subsub2"]
        );
    }

    #[test]
    fn test_render_value_branches() {
        let functions = FunctionGenerator::new().generate(&nested()).unwrap();
        let mut out = String::new();
        functions[2].render(&mut out);

        assert!(out.contains("function _tabsmith_4_demo_4_sub2() {\n"));
        assert!(out.contains("  local COMMANDS='subsub1 subsub2'\n"));
        assert!(out.contains("  local FLAG_OPTS=''\n"));
        assert!(out.contains("  local ARG_OPTS='--num2 --directory -d'\n"));
        assert!(out.contains("    '--num2')\n      COMPREPLY=() # free text\n"));
        assert!(out.contains(
            "    '--directory'|'-d')\n      compopt -o filenames 2>/dev/null\n"
        ));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_render_leaf_has_no_case_block() {
        let functions = FunctionGenerator::new()
            .generate(&CommandNode::new("bare"))
            .unwrap();
        let mut out = String::new();
        functions[0].render(&mut out);

        assert!(!out.contains("case"));
        assert!(out.contains("  local COMMANDS=''\n  local FLAG_OPTS=''\n  local ARG_OPTS=''\n"));
    }

    #[test]
    fn test_generate_rejects_duplicate_siblings() {
        let root = CommandNode::new("demo")
            .with_subcommand(CommandNode::new("sub"))
            .with_subcommand(CommandNode::new("sub"));
        assert!(matches!(
            FunctionGenerator::new().generate(&root),
            Err(TabsmithError::InvalidCommandModel(_))
        ));
    }

    #[test]
    fn test_generate_handles_deep_trees() {
        let mut node = CommandNode::new("level0");
        for depth in (1..200).rev() {
            node = CommandNode::new(format!("level{}", depth)).with_subcommand(node);
        }
        let root = CommandNode::new("deep").with_subcommand(node);

        let functions = FunctionGenerator::new().generate(&root).unwrap();
        assert_eq!(functions.len(), 201);
        assert_eq!(functions.last().unwrap().path.len(), 201);
    }
}
