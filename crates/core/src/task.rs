// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task specification: one command to run, with its guards and options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::words;

/// The command in its resolved shape: a raw string destined for a shell, or
/// a literal argument vector passed straight to process creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandForm {
    /// Free-form string, interpreted by a shell (`use_shell` only).
    Raw(String),
    /// Argument vector; argv\[0\] is the program.
    Argv(Vec<String>),
}

/// One unit of work: the command plus idempotency guards, watched paths,
/// and execution options. Deserialized from the caller's JSON document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSpec {
    /// Free-form command string. Mutually exclusive with `argv`.
    #[serde(default, alias = "_raw_params")]
    pub cmd: Option<String>,

    /// Command as an explicit argument vector. Mutually exclusive with `cmd`.
    #[serde(default)]
    pub argv: Option<Vec<String>>,

    /// Hand the raw command string to a shell instead of spawning argv
    /// directly. Opt-in escape hatch; the default path never touches a shell.
    #[serde(default, alias = "_uses_shell")]
    pub use_shell: bool,

    /// Legacy interpreter override. Honored only together with `use_shell`;
    /// otherwise ignored with a warning.
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Working directory for the child process. Relative guard patterns and
    /// watched paths resolve against it.
    #[serde(default)]
    pub chdir: Option<PathBuf>,

    /// Skip execution when this glob matches at least one existing path.
    #[serde(default)]
    pub creates: Option<String>,

    /// Skip execution when this glob matches no existing path.
    #[serde(default)]
    pub removes: Option<String>,

    /// Paths to snapshot before and after execution for change detection.
    #[serde(default, alias = "modifies")]
    pub watch: Vec<String>,

    /// Data written to the child's stdin.
    #[serde(default)]
    pub stdin: Option<String>,

    /// Append a newline to the stdin data.
    #[serde(default = "default_true")]
    pub stdin_add_newline: bool,

    /// Strip trailing carriage returns and newlines from captured output.
    #[serde(default = "default_true", alias = "strip_empty_ends")]
    pub strip_trailing_newlines: bool,

    /// Expand `~` and `$VAR` references in argv elements before spawning.
    /// Never applies in shell mode.
    #[serde(default = "default_true")]
    pub expand_argument_vars: bool,

    /// Dry-run: report what would happen without launching the program.
    #[serde(default)]
    pub check_mode: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TaskSpec {
    fn default() -> Self {
        Self {
            cmd: None,
            argv: None,
            use_shell: false,
            executable: None,
            chdir: None,
            creates: None,
            removes: None,
            watch: Vec::new(),
            stdin: None,
            stdin_add_newline: true,
            strip_trailing_newlines: true,
            expand_argument_vars: true,
            check_mode: false,
        }
    }
}

impl TaskSpec {
    /// Spec running `cmd` as a free-form string.
    pub fn raw(cmd: impl Into<String>) -> Self {
        Self {
            cmd: Some(cmd.into()),
            ..Self::default()
        }
    }

    /// Spec running an explicit argument vector.
    pub fn command<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: Some(argv.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Resolve the command into its canonical [`CommandForm`].
    ///
    /// Exactly one of `cmd`/`argv` must carry a command; a blank free-form
    /// string and an empty argv both count as absent. A free-form command
    /// without `use_shell` is split into words here, so shell-free execution
    /// always ends up with a literal argument vector.
    pub fn resolve_form(&self) -> Result<CommandForm, ValidationError> {
        let raw = self.cmd.as_deref().filter(|s| !s.is_empty());
        let argv = self.argv.as_deref().filter(|v| !v.is_empty());

        // A whitespace-only free-form command carries no command, but it
        // still collides with argv if both were supplied.
        if raw.map_or(true, |s| s.trim().is_empty()) && argv.is_none() {
            return Err(ValidationError::NoCommand);
        }
        if raw.is_some() && argv.is_some() {
            return Err(ValidationError::BothForms);
        }

        match (raw, argv) {
            (_, Some(argv)) => Ok(CommandForm::Argv(argv.to_vec())),
            (Some(raw), None) if self.use_shell => Ok(CommandForm::Raw(raw.to_string())),
            (Some(raw), None) => Ok(CommandForm::Argv(words::split(raw)?)),
            (None, None) => Err(ValidationError::NoCommand),
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
