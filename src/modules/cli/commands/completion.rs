//! Shell completions for tabsmith itself.
//!
//! Bash completion goes through the tabsmith generator, fed with a command
//! model read off the clap definition of the CLI. Other shells are handled by
//! `clap_complete`.

use clap::{Args, Command, CommandFactory, ValueHint};
use clap_complete::{generate, Shell};
use std::io::Write;
use tabsmith_core::{CommandNode, OptionSpec, TabsmithError};
use tracing::debug;

use super::BANNER;

const BIN_NAME: &str = "tabsmith";

/// Generate shell completion scripts.
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Shell to generate completions for (e.g. bash, zsh)
    #[arg(value_enum, default_value_t = Shell::Bash)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub fn execute(&self) -> Result<(), TabsmithError> {
        let mut cmd = crate::Cli::command();
        let mut stdout = std::io::stdout().lock();

        match self.shell {
            Shell::Bash => {
                let model = command_model(&mut cmd);
                let script = tabsmith_generator::generate(&[BIN_NAME], &model, BANNER)?;
                stdout.write_all(script.as_bytes())?;
            }
            shell => generate(shell, &mut cmd, BIN_NAME, &mut stdout),
        }

        stdout.flush()?;
        Ok(())
    }
}

/// Command model of a clap command tree
///
/// Hidden arguments and subcommands are left out, as are positionals since
/// they have no option name to complete after.
pub fn command_model(cmd: &mut Command) -> CommandNode {
    // Adds the generated help/version arguments and the help subcommand
    cmd.build();
    command_node(cmd)
}

fn command_node(cmd: &Command) -> CommandNode {
    let mut node = CommandNode::new(cmd.get_name());
    node.description = cmd.get_about().map(|about| about.to_string());

    for arg in cmd.get_arguments() {
        if arg.is_positional() || arg.is_hide_set() {
            continue;
        }

        let mut names: Vec<String> = Vec::new();
        if let Some(shorts) = arg.get_short_and_visible_aliases() {
            names.extend(shorts.into_iter().map(|c| format!("-{}", c)));
        }
        if let Some(longs) = arg.get_long_and_visible_aliases() {
            names.extend(longs.into_iter().map(|l| format!("--{}", l)));
        }
        if names.is_empty() {
            continue;
        }

        let mut option = if arg.get_action().takes_values() {
            let values: Vec<String> = arg
                .get_possible_values()
                .into_iter()
                .filter(|v| !v.is_hide_set())
                .map(|v| v.get_name().to_string())
                .collect();
            let option = OptionSpec::argument(names);
            if !values.is_empty() {
                option.with_candidates(values)
            } else if matches!(
                arg.get_value_hint(),
                ValueHint::FilePath | ValueHint::DirPath | ValueHint::AnyPath | ValueHint::ExecutablePath
            ) {
                option.with_file_completion()
            } else {
                option
            }
        } else {
            OptionSpec::flag(names)
        };
        if let Some(help) = arg.get_help() {
            option = option.with_description(help.to_string());
        }
        node.options.push(option);
    }

    for subcommand in cmd.get_subcommands() {
        if subcommand.is_hide_set() {
            continue;
        }
        node.subcommands.push(command_node(subcommand));
    }

    debug!(
        "Read {} options and {} subcommands of '{}'",
        node.options.len(),
        node.subcommands.len(),
        node.name
    );
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsmith_types::CompletionPolicy;

    #[test]
    fn test_command_model_of_cli() {
        let mut cmd = crate::Cli::command();
        let model = command_model(&mut cmd);

        assert_eq!(model.name, "tabsmith");
        let subcommands: Vec<&str> = model.subcommand_names().collect();
        assert!(subcommands.contains(&"generate"));
        assert!(subcommands.contains(&"init"));
        assert!(subcommands.contains(&"completion"));

        assert!(model.find_option("--help").is_some());
        assert!(!model.find_option("--verbose").unwrap().takes_argument);
    }

    #[test]
    fn test_command_model_value_policies() {
        let mut cmd = crate::Cli::command();
        let model = command_model(&mut cmd);

        let generate = model.find_subcommand("generate").unwrap();
        let output = generate.find_option("--completion-script").unwrap();
        assert_eq!(output.names, vec!["-o", "--completion-script"]);
        assert_eq!(output.policy(), Some(CompletionPolicy::Filename));
        assert_eq!(
            generate.find_option("-n").unwrap().policy(),
            Some(CompletionPolicy::FreeText)
        );
        assert!(generate.find_option("--force").unwrap().policy().is_none());

        let init = model.find_subcommand("init").unwrap();
        assert_eq!(
            init.find_option("--output").unwrap().policy(),
            Some(CompletionPolicy::Filename)
        );
    }

    #[test]
    fn test_command_model_skips_hidden_and_positional() {
        let mut cmd = Command::new("tool")
            .arg(clap::Arg::new("input"))
            .arg(clap::Arg::new("secret").long("secret").hide(true))
            .arg(
                clap::Arg::new("mode")
                    .long("mode")
                    .value_parser(["fast", "slow"]),
            )
            .subcommand(Command::new("internal").hide(true))
            .subcommand(Command::new("run"));
        let model = command_model(&mut cmd);

        assert!(model.find_option("--secret").is_none());
        assert!(model.options.iter().all(|o| !o.names.is_empty()));
        assert_eq!(
            model.find_option("--mode").unwrap().policy(),
            Some(CompletionPolicy::Enumerated(vec![
                "fast".to_string(),
                "slow".to_string()
            ]))
        );
        assert!(model.find_subcommand("internal").is_none());
        assert!(model.find_subcommand("run").is_some());
    }

    #[test]
    fn test_bash_completion_script() {
        let mut cmd = crate::Cli::command();
        let model = command_model(&mut cmd);
        let script = tabsmith_generator::generate(&[BIN_NAME], &model, BANNER).unwrap();

        assert!(script.contains("function _tabsmith_8_tabsmith_8_generate()"));
        assert!(script.ends_with("complete -F _complete_8_tabsmith -o default tabsmith\n"));
    }
}
