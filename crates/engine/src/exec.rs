// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child process execution with captured output and timing.

use std::path::Path;
use std::process::Stdio;

use chrono::{DateTime, Local};
use errand_core::{CommandForm, TaskSpec};
use tokio::io::AsyncWriteExt;

/// Default interpreter for shell-mode commands.
const DEFAULT_SHELL: &str = "/bin/sh";

/// Errors that can occur launching the target program.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Program not found or not launchable.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The child's stdin pipe could not be written.
    #[error("failed to write stdin to `{command}`: {source}")]
    Stdin {
        command: String,
        source: std::io::Error,
    },
}

/// Fully resolved program invocation: what actually gets spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Launch {
    pub program: String,
    pub args: Vec<String>,
}

/// Raw captured outcome of one child process.
#[derive(Debug)]
pub(crate) struct CaptureOutput {
    pub rc: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// Build the concrete invocation from the resolved command form.
///
/// Shell mode hands the raw string to `sh -c` (or the legacy `executable`
/// override). Argv mode spawns argv\[0\] directly, optionally expanding
/// `~` and `$VAR` references in each element first; expansion never
/// applies in shell mode, where the shell itself does that work.
pub(crate) fn build_launch(form: &CommandForm, spec: &TaskSpec) -> Launch {
    match form {
        CommandForm::Raw(raw) => shell_launch(raw, spec),
        // An argv handed over with shell mode still goes through the
        // shell: each element is quoted and the vector joined back into
        // one command line.
        CommandForm::Argv(argv) if spec.use_shell => {
            shell_launch(&errand_core::words::join(argv), spec)
        }
        CommandForm::Argv(argv) => {
            let argv: Vec<String> = if spec.expand_argument_vars {
                argv.iter().map(|arg| expand_arg(arg)).collect()
            } else {
                argv.clone()
            };
            // Validation guarantees a non-empty argv.
            let (program, args) = match argv.split_first() {
                Some((program, rest)) => (program.clone(), rest.to_vec()),
                None => (String::new(), Vec::new()),
            };
            Launch { program, args }
        }
    }
}

/// Wrap a command line in the shell (or the legacy `executable` override).
fn shell_launch(command_line: &str, spec: &TaskSpec) -> Launch {
    let shell = spec
        .executable
        .as_ref()
        .map_or_else(|| DEFAULT_SHELL.to_string(), |p| p.display().to_string());
    Launch {
        program: shell,
        args: vec!["-c".to_string(), command_line.to_string()],
    }
}

/// Expand `~` and environment variables in one argument.
///
/// Undefined variables are left in place rather than erased, so a literal
/// `$DOES_NOT_EXIST` survives the trip to the program untouched.
fn expand_arg(arg: &str) -> String {
    shellexpand::full_with_context_no_errors(
        arg,
        || std::env::var("HOME").ok(),
        |name| std::env::var(name).ok(),
    )
    .into_owned()
}

/// Stdin bytes for the child, with the optional trailing newline applied.
pub(crate) fn stdin_payload(spec: &TaskSpec) -> Option<Vec<u8>> {
    spec.stdin.as_ref().map(|s| {
        let mut data = s.clone().into_bytes();
        if spec.stdin_add_newline {
            data.push(b'\n');
        }
        data
    })
}

/// Spawn the program and wait for it to finish, capturing both output
/// streams. The start/end timestamps bracket only the spawn-to-exit
/// window. A process killed by a signal reports rc -1.
pub(crate) async fn execute(
    launch: &Launch,
    chdir: Option<&Path>,
    stdin: Option<Vec<u8>>,
) -> Result<CaptureOutput, ExecError> {
    let cmd_span = tracing::info_span!(
        "errand.exec",
        cmd = %launch.program,
        args = ?launch.args,
        rc = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    let mut process = tokio::process::Command::new(&launch.program);
    process.args(&launch.args);
    if let Some(dir) = chdir {
        process.current_dir(dir);
    }
    process.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    process.stdout(Stdio::piped());
    process.stderr(Stdio::piped());

    let start = Local::now();
    let mut child = process.spawn().map_err(|source| ExecError::Spawn {
        command: launch.program.clone(),
        source,
    })?;

    if let Some(data) = stdin {
        if let Some(mut handle) = child.stdin.take() {
            let write_result = handle.write_all(&data).await;
            drop(handle); // close pipe to signal EOF
            if let Err(source) = write_result {
                // A child that exits without reading its input is not an
                // error; anything else is.
                if source.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(ExecError::Stdin {
                        command: launch.program.clone(),
                        source,
                    });
                }
            }
        }
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|source| ExecError::Spawn {
            command: launch.program.clone(),
            source,
        })?;
    let end = Local::now();

    let rc = output.status.code().unwrap_or(-1);
    cmd_span.record("rc", rc);
    cmd_span.record(
        "duration_ms",
        (end - start).num_milliseconds(),
    );

    Ok(CaptureOutput {
        rc,
        stdout: output.stdout,
        stderr: output.stderr,
        start,
        end,
    })
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
