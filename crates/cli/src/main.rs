// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! errand: run one command as a unit of work.
//!
//! Reads a JSON task document (file argument or stdin), executes it, and
//! prints the JSON result document on stdout. Logging goes to stderr so
//! the result stream stays parseable.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use errand_core::TaskSpec;
use errand_engine::{run, ExecutionResult};
use tracing_subscriber::EnvFilter;

/// The launched command exited non-zero.
const EXIT_FAILED: u8 = 1;
/// The invocation itself could not run (bad input, unusable directory,
/// snapshot failure, unlaunchable program).
const EXIT_FATAL: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "errand",
    version,
    about = "Execute one command with idempotency guards and file-change detection"
)]
struct Cli {
    /// JSON task document; stdin when omitted.
    args_file: Option<PathBuf>,

    /// Pretty-print the result document.
    #[arg(long)]
    pretty: bool,

    /// Force check mode regardless of the document's setting.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let document = match read_document(cli.args_file.as_deref()) {
        Ok(document) => document,
        Err(message) => return fatal(&message, None, cli.pretty),
    };
    let mut spec: TaskSpec = match serde_json::from_str(&document) {
        Ok(spec) => spec,
        Err(e) => return fatal(&format!("invalid task document: {e}"), Some(256), cli.pretty),
    };
    if cli.check {
        spec.check_mode = true;
    }

    match run(&spec).await {
        Ok(result) => emit(&result, cli.pretty),
        Err(e) => fatal(&e.to_string(), e.rc(), cli.pretty),
    }
}

/// Read the task document from the args file or stdin.
fn read_document(args_file: Option<&Path>) -> Result<String, String> {
    match args_file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("unable to read {}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("unable to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Print the result document; exit status reflects the child's outcome.
fn emit(result: &ExecutionResult, pretty: bool) -> ExitCode {
    println!("{}", render(result, pretty));
    if result.failed {
        ExitCode::from(EXIT_FAILED)
    } else {
        ExitCode::SUCCESS
    }
}

/// Print a failure document for an invocation that never produced a
/// result, mirroring the result shape as far as it goes.
fn fatal(msg: &str, rc: Option<i32>, pretty: bool) -> ExitCode {
    tracing::error!(msg, "task aborted");
    let document = serde_json::json!({
        "failed": true,
        "changed": false,
        "rc": rc,
        "msg": msg,
    });
    println!("{}", render(&document, pretty));
    ExitCode::from(EXIT_FATAL)
}

fn render<T: serde::Serialize>(value: &T, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|_| String::from("{}"))
}
