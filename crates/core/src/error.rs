// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input validation errors.
//!
//! Validation failures are fatal and reported before any filesystem or
//! process action is attempted.

use crate::words::SplitError;
use thiserror::Error;

/// Errors raised while validating a task specification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither a free-form command nor an argv list was supplied.
    #[error("no command given")]
    NoCommand,

    /// Both a free-form command and an argv list were supplied.
    #[error("only command or argv can be given, not both")]
    BothForms,

    /// The free-form command could not be split into words.
    #[error("unable to split command: {0}")]
    Split(#[from] SplitError),

    /// A `creates`/`removes` guard pattern has invalid glob syntax.
    #[error("invalid glob pattern `{pattern}`: {message}")]
    Glob {
        /// The offending pattern as supplied.
        pattern: String,
        /// Description of the syntax problem.
        message: String,
    },
}
