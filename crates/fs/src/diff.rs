// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Before/after comparison of file snapshots.

use serde::Serialize;

use crate::snapshot::{ContentDescriptor, FileSnapshot, PresenceState};
use crate::stat::StatEntry;

/// One side of a change record.
///
/// When presence changed between the two snapshots, only `state` and `path`
/// are populated; structural fields from a snapshot that has no counterpart
/// are discarded rather than compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSide {
    pub state: PresenceState,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<Vec<StatEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentDescriptor>,
}

impl DiffSide {
    fn full(path: &str, snap: &FileSnapshot) -> Self {
        match snap {
            FileSnapshot::Absent => Self::state_only(path, PresenceState::Absent),
            FileSnapshot::Present { chain, content } => Self {
                state: PresenceState::Present,
                path: path.to_string(),
                stat: Some(chain.clone()),
                content: Some(content.clone()),
            },
        }
    }

    fn state_only(path: &str, state: PresenceState) -> Self {
        Self {
            state,
            path: path.to_string(),
            stat: None,
            content: None,
        }
    }
}

/// A detected change on one watched path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    pub path: String,
    pub before: DiffSide,
    pub after: DiffSide,
}

/// Compare two snapshots of the same logical path.
///
/// Structural equality over the full snapshot shape; `None` means no
/// change. A presence change collapses both sides to state and path only.
pub fn diff(path: &str, before: &FileSnapshot, after: &FileSnapshot) -> Option<DiffRecord> {
    if before == after {
        return None;
    }

    let (before, after) = if before.state() != after.state() {
        (
            DiffSide::state_only(path, before.state()),
            DiffSide::state_only(path, after.state()),
        )
    } else {
        (DiffSide::full(path, before), DiffSide::full(path, after))
    };

    Some(DiffRecord {
        path: path.to_string(),
        before,
        after,
    })
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
