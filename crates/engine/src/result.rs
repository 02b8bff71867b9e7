// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The result record returned for every invocation.

use errand_core::CommandForm;
use errand_fs::DiffRecord;
use serde::Serialize;

/// Outcome of one task invocation. Constructed once, immutable after
/// return; serializes to the caller-facing JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    /// Whether the target system was (or would have been) mutated. When
    /// watched paths are configured this reflects actual detected changes.
    pub changed: bool,
    /// Deliberate no-op outcome. Mutually exclusive with `changed`.
    pub skipped: bool,
    /// Child return code; 0 is synthesized for skips and simulations.
    pub rc: Option<i32>,
    /// The resolved command: argument vector, or raw string in shell mode.
    pub cmd: CommandForm,
    pub stdout: String,
    pub stderr: String,
    pub stdout_lines: Vec<String>,
    pub stderr_lines: Vec<String>,
    /// Execution start, `2017-09-29 22:03:48.083128` form.
    pub start: Option<String>,
    /// Execution end, same form.
    pub end: Option<String>,
    /// Elapsed wall clock, `0:00:00.001529` form.
    pub delta: Option<String>,
    pub msg: String,
    /// Derived from a non-zero return code.
    pub failed: bool,
    /// One record per watched path that actually changed.
    pub diff: Vec<DiffRecord>,
}

impl ExecutionResult {
    /// Fresh record with nothing run yet.
    pub(crate) fn new(cmd: CommandForm) -> Self {
        Self {
            changed: false,
            skipped: false,
            rc: None,
            cmd,
            stdout: String::new(),
            stderr: String::new(),
            stdout_lines: Vec::new(),
            stderr_lines: Vec::new(),
            start: None,
            end: None,
            delta: None,
            msg: String::new(),
            failed: false,
            diff: Vec::new(),
        }
    }

    /// Derive the convenience fields and the failure classification.
    ///
    /// A non-zero return code makes the result failed and replaces the
    /// message with the standard notice; the data fields stay populated so
    /// the caller can inspect the cause.
    pub(crate) fn finalize(mut self) -> Self {
        self.stdout_lines = split_lines(&self.stdout);
        self.stderr_lines = split_lines(&self.stderr);
        self.failed = self.rc.is_some_and(|rc| rc != 0);
        if self.failed {
            self.msg = "non-zero return code".to_string();
        }
        self
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(ToString::to_string).collect()
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
