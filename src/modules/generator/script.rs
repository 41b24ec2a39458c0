//! Final script assembly

use crate::dispatch::EntryFunction;
use crate::escape::comment;
use crate::function::GeneratedFunction;

/// Concatenates the banner, the generated functions and the registration
pub struct ScriptAssembler<'a> {
    banner: &'a str,
}

impl<'a> ScriptAssembler<'a> {
    /// Create an assembler stamping `banner` (tool name and version) into the header
    pub fn new(banner: &'a str) -> Self {
        Self { banner }
    }

    /// Produce the complete script text
    pub fn assemble(
        &self,
        command: &str,
        functions: &[GeneratedFunction],
        entry: &EntryFunction,
    ) -> String {
        let mut out = String::with_capacity(2048 + functions.len() * 1024);
        self.header(command, &mut out);

        for function in functions {
            out.push('\n');
            function.render(&mut out);
        }

        out.push('\n');
        entry.render(&mut out);

        out.push('\n');
        entry.render_registration(&mut out);
        out
    }

    fn header(&self, command: &str, out: &mut String) {
        let command = comment(command);
        let title = format!("{} Bash Completion", command);

        out.push_str("#!/usr/bin/env bash\n");
        out.push_str("#\n");
        out.push_str(&format!("# {}\n", title));
        out.push_str(&format!("# {}\n", "=".repeat(title.chars().count())));
        out.push_str("#\n");
        out.push_str(&format!(
            "# Bash completion support for the `{}` command,\n",
            command
        ));
        out.push_str(&format!("# generated by {}.\n", comment(self.banner)));
        out.push_str("#\n");
        out.push_str("# Installation\n");
        out.push_str("# ------------\n");
        out.push_str("#\n");
        out.push_str("# 1. Source this file from ~/.bashrc, or place it in a bash-completion\n");
        out.push_str("#    directory such as /etc/bash_completion.d or\n");
        out.push_str("#    /usr/share/bash-completion/completions.\n");
        out.push_str("#\n");
        out.push_str(&format!(
            "# 2. Open a new bash console, and type `{} [TAB][TAB]`\n",
            command
        ));
        out.push_str("#\n");
        out.push_str("# Documentation\n");
        out.push_str("# -------------\n");
        out.push_str("# Bash calls the entry point function whenever [TAB] or [TAB][TAB] is\n");
        out.push_str(&format!(
            "# pressed after '{} (..)'. It finds the deepest subcommand typed so far and\n",
            command
        ));
        out.push_str("# lets that subcommand's function write the possible completions to the\n");
        out.push_str("# COMPREPLY variable.\n");
        out.push_str("#\n");
        out.push('\n');
        out.push_str("# Enable programmable completion facilities\n");
        out.push_str("shopt -s progcomp\n");
    }
}
