// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Idempotency gate: `creates`/`removes` glob checks.
//!
//! Evaluated against the live filesystem immediately before execution. A
//! window remains between this check and the command actually running;
//! callers relying on the guards accept that race.

use std::path::Path;

use errand_core::ValidationError;

/// Decision to skip execution, with the reason rendered for the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipDecision {
    /// Human-readable reason ("Did not run command since 'x' exists").
    pub msg: String,
    /// Legacy stdout note kept for callers that read it there.
    pub stdout_note: String,
}

/// Evaluate the guards. `creates` is checked first and wins when both
/// would trigger; `removes` skips only when nothing matches. `None` means
/// execution must proceed.
///
/// Relative patterns resolve against `cwd` when one is supplied (the
/// task's `chdir`); otherwise the process working directory applies.
/// `check_mode` only changes the wording of the reported reason.
pub fn evaluate(
    creates: Option<&str>,
    removes: Option<&str>,
    cwd: Option<&Path>,
    check_mode: bool,
) -> Result<Option<SkipDecision>, ValidationError> {
    let shoulda = if check_mode { "Would" } else { "Did" };

    if let Some(pattern) = creates {
        if any_match(pattern, cwd)? {
            return Ok(Some(SkipDecision {
                msg: format!("{shoulda} not run command since '{pattern}' exists"),
                stdout_note: format!("skipped, since {pattern} exists"),
            }));
        }
    }

    if let Some(pattern) = removes {
        if !any_match(pattern, cwd)? {
            return Ok(Some(SkipDecision {
                msg: format!("{shoulda} not run command since '{pattern}' does not exist"),
                stdout_note: format!("skipped, since {pattern} does not exist"),
            }));
        }
    }

    Ok(None)
}

/// True when the pattern matches at least one existing path.
fn any_match(pattern: &str, cwd: Option<&Path>) -> Result<bool, ValidationError> {
    let full_pattern = match cwd {
        Some(cwd) if !Path::new(pattern).is_absolute() => {
            cwd.join(pattern).to_string_lossy().into_owned()
        }
        _ => pattern.to_string(),
    };

    let mut paths = glob::glob(&full_pattern).map_err(|e| ValidationError::Glob {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    // Unreadable candidates count as matches for existence purposes.
    Ok(paths.next().is_some())
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
