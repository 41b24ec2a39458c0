//! Command tree

use serde::{Deserialize, Serialize};

use super::OptionSpec;

/// One command or subcommand, together with everything nested below it
///
/// Subcommands are kept in declaration order so that generated output is
/// reproducible; sibling names are expected to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandNode {
    /// Token the user types to invoke this command
    pub name: String,

    /// Human-readable description of this command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared options, in declaration order
    #[serde(default)]
    pub options: Vec<OptionSpec>,

    /// Nested subcommands, in declaration order
    #[serde(default)]
    pub subcommands: Vec<CommandNode>,
}

impl CommandNode {
    /// Create a new command with no options and no subcommands
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            options: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    /// Set the description for this command
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an option to this command
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Add a subcommand to this command
    pub fn with_subcommand(mut self, subcommand: CommandNode) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Find a direct subcommand by name
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandNode> {
        self.subcommands.iter().find(|c| c.name == name)
    }

    /// Find the option declaring the given alias
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.has_name(name))
    }

    /// Names of the direct subcommands, in declaration order
    pub fn subcommand_names(&self) -> impl Iterator<Item = &str> {
        self.subcommands.iter().map(|c| c.name.as_str())
    }

    /// Returns true if this command has neither options nor subcommands
    pub fn is_leaf(&self) -> bool {
        self.options.is_empty() && self.subcommands.is_empty()
    }

    /// Number of commands in this tree, including this one
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.subcommands.iter());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> CommandNode {
        CommandNode::new("demo")
            .with_option(OptionSpec::flag(["-h", "--help"]))
            .with_subcommand(
                CommandNode::new("sub1").with_option(OptionSpec::argument(["--num"])),
            )
            .with_subcommand(
                CommandNode::new("sub2")
                    .with_subcommand(CommandNode::new("subsub1"))
                    .with_subcommand(CommandNode::new("subsub2")),
            )
    }

    #[test]
    fn test_command_new() {
        let command = CommandNode::new("demo");
        assert_eq!(command.name, "demo");
        assert!(command.is_leaf());
        assert_eq!(command.node_count(), 1);
    }

    #[test]
    fn test_command_lookup() {
        let command = demo();
        assert!(command.find_subcommand("sub2").is_some());
        assert!(command.find_subcommand("subsub1").is_none());
        assert!(command.find_option("-h").is_some());
        assert!(command.find_option("--num").is_none());
        assert_eq!(
            command.subcommand_names().collect::<Vec<_>>(),
            vec!["sub1", "sub2"]
        );
        assert_eq!(command.node_count(), 5);
    }

    #[test]
    fn test_command_serde() {
        let command = demo();
        let json = serde_json::to_string(&command).unwrap();
        assert!(json.contains("\"name\":\"subsub2\""));

        let parsed: CommandNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, command);
    }
}
