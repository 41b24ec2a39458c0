//! Entry point function and `complete` registration

use tabsmith_core::{CommandNode, Result, TabsmithError};

use crate::escape::{case_pattern, comment, shell_word};
use crate::function::GeneratedFunction;
use crate::sanitize::{encode_segment, sanitize};

/// Prefix of the entry point function name
pub const ENTRY_PREFIX: &str = "_complete";

/// Subcommand transitions available from one command's function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Function active before the word is consumed
    pub from: String,
    /// `(subcommand name, function reached)` pairs
    pub targets: Vec<(String, String)>,
}

/// The generated entry point bound to the root command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunction {
    pub identifier: String,
    /// Function of the root command, active when no subcommand was typed
    pub root: String,
    pub transitions: Vec<Transition>,
    pub aliases: Vec<String>,
}

impl EntryFunction {
    /// Append the entry point function to `out`
    pub fn render(&self, out: &mut String) {
        out.push_str("# Bash completion entry point function.\n");
        out.push_str(&format!(
            "# {} walks the subcommands typed so far and delegates to the\n",
            self.identifier
        ));
        out.push_str("# completion function of the deepest subcommand reached.\n");
        out.push_str(&format!("function {}() {{\n", self.identifier));
        out.push_str(&format!("  local node={}\n", self.root));
        out.push_str("  local i\n");
        out.push_str("  for (( i = 1; i < COMP_CWORD; i++ )); do\n");
        out.push_str("    case ${node} in\n");
        for transition in &self.transitions {
            out.push_str(&format!("      {})\n", transition.from));
            out.push_str("        case \"${COMP_WORDS[i]}\" in\n");
            for (name, target) in &transition.targets {
                out.push_str(&format!(
                    "          {}) node={} ;;\n",
                    case_pattern(&[name]),
                    target
                ));
            }
            out.push_str("          *) break ;;\n");
            out.push_str("        esac\n");
            out.push_str("        ;;\n");
        }
        out.push_str("      *)\n");
        out.push_str("        break\n");
        out.push_str("        ;;\n");
        out.push_str("    esac\n");
        out.push_str("  done\n");
        out.push('\n');
        out.push_str("  \"${node}\"\n");
        out.push_str("}\n");
    }

    /// Append the `complete` registration for every alias to `out`
    pub fn render_registration(&self, out: &mut String) {
        let quoted: Vec<String> = self
            .aliases
            .iter()
            .map(|a| format!("`{}`", comment(a)))
            .collect();

        out.push_str("# Define a completion specification (a compspec) for the\n");
        out.push_str(&format!("# {} {}.\n", join_english(&quoted), plural(quoted.len())));
        out.push_str(&format!(
            "# Shell function `{}` generates the completions for the current word.\n",
            self.identifier
        ));
        out.push_str("# `-o default` falls back to the default Bash and Readline filename\n");
        out.push_str("# completions when the function generated no matches.\n");

        let words: Vec<String> = self
            .aliases
            .iter()
            .map(|a| shell_word(a).into_owned())
            .collect();
        out.push_str(&format!(
            "complete -F {} -o default {}\n",
            self.identifier,
            words.join(" ")
        ));
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "command"
    } else {
        "commands"
    }
}

fn join_english(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Builds the entry point that mirrors the command hierarchy
pub struct DispatchGenerator {
    prefix: String,
}

impl DispatchGenerator {
    /// Create a generator using the default entry point prefix
    pub fn new() -> Self {
        Self {
            prefix: ENTRY_PREFIX.to_string(),
        }
    }

    /// Shell function name of the entry point for `root`
    pub fn entry_identifier(&self, root: &CommandNode) -> Result<String> {
        if encode_segment(&root.name).is_empty() {
            return Err(TabsmithError::InvalidCommandModel(
                "Root command name yields an empty identifier".to_string(),
            ));
        }
        Ok(format!("{}{}", self.prefix, sanitize(&[root.name.as_str()])?))
    }

    /// Build the entry point for `root` from its already generated functions
    ///
    /// `functions` must start with the root's function, as produced by
    /// [`crate::FunctionGenerator::generate`].
    pub fn generate(
        &self,
        root: &CommandNode,
        functions: &[GeneratedFunction],
        aliases: &[String],
    ) -> Result<EntryFunction> {
        let identifier = self.entry_identifier(root)?;
        let root_function = functions.first().ok_or_else(|| {
            TabsmithError::Internal("No completion function for the root command".to_string())
        })?;

        let transitions = functions
            .iter()
            .filter(|f| !f.subcommands.is_empty())
            .map(|f| Transition {
                from: f.identifier.clone(),
                targets: f
                    .subcommands
                    .iter()
                    .map(|s| (s.name.clone(), s.identifier.clone()))
                    .collect(),
            })
            .collect();

        Ok(EntryFunction {
            identifier,
            root: root_function.identifier.clone(),
            transitions,
            aliases: aliases.to_vec(),
        })
    }
}

impl Default for DispatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionGenerator;

    fn aliases(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_entry_identifier() {
        let generator = DispatchGenerator::new();
        assert_eq!(
            generator.entry_identifier(&CommandNode::new("demo")).unwrap(),
            "_complete_4_demo"
        );
        assert_eq!(
            generator.entry_identifier(&CommandNode::new("cmd.sh")).unwrap(),
            "_complete_9_cmd_2e_sh"
        );
        assert!(matches!(
            generator.entry_identifier(&CommandNode::new("")),
            Err(TabsmithError::InvalidCommandModel(_))
        ));
    }

    #[test]
    fn test_transitions_mirror_hierarchy() {
        let root = CommandNode::new("demo")
            .with_subcommand(CommandNode::new("sub1"))
            .with_subcommand(CommandNode::new("sub2").with_subcommand(CommandNode::new("subsub1")));
        let functions = FunctionGenerator::new().generate(&root).unwrap();
        let entry = DispatchGenerator::new()
            .generate(&root, &functions, &aliases(&["demo"]))
            .unwrap();

        assert_eq!(entry.root, "_tabsmith_4_demo");
        assert_eq!(entry.transitions.len(), 2);
        assert_eq!(entry.transitions[0].from, "_tabsmith_4_demo");
        assert_eq!(
            entry.transitions[1].targets,
            vec![(
                "subsub1".to_string(),
                "_tabsmith_4_demo_4_sub2_7_subsub1".to_string()
            )]
        );

        let mut out = String::new();
        entry.render(&mut out);
        assert!(out.contains("  local node=_tabsmith_4_demo\n"));
        assert!(out.contains("          'sub1') node=_tabsmith_4_demo_4_sub1 ;;\n"));
        assert!(out.contains("      _tabsmith_4_demo_4_sub2)\n"));
        assert!(out.contains("  \"${node}\"\n"));
    }

    #[test]
    fn test_registration_lists_every_alias_once() {
        let root = CommandNode::new("cmd");
        let functions = FunctionGenerator::new().generate(&root).unwrap();
        let entry = DispatchGenerator::new()
            .generate(&root, &functions, &aliases(&["cmd", "cmd.sh"]))
            .unwrap();

        let mut out = String::new();
        entry.render_registration(&mut out);
        let lines: Vec<&str> = out.lines().filter(|l| l.starts_with("complete ")).collect();
        assert_eq!(lines, vec!["complete -F _complete_3_cmd -o default cmd cmd.sh"]);
        assert!(out.contains("# `cmd` and `cmd.sh` commands.\n"));
    }

    #[test]
    fn test_join_english() {
        assert_eq!(join_english(&aliases(&["a"])), "a");
        assert_eq!(join_english(&aliases(&["a", "b", "c"])), "a, b, and c");
    }
}
