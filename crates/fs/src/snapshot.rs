// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time snapshots of filesystem paths.
//!
//! [`snapshot`] never errors on a missing path (that is the absent state);
//! it errors on symlink cycles and on existing paths it cannot read.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::error::SnapshotError;
use crate::stat::{FileTypeTag, StatEntry};

/// Whether a path existed at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceState {
    Absent,
    Present,
}

/// Comparable description of a path's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDescriptor {
    /// Decoded text of a regular file.
    Text(String),
    /// Content withheld: the bytes were not valid UTF-8. The digest still
    /// allows change detection without carrying the payload.
    Binary {
        /// SHA-1 digest of the raw bytes, lowercase hex.
        sha1: String,
    },
    /// Immediate entry names of a directory, in the order the OS returned
    /// them.
    Listing(Vec<String>),
    /// Content withheld: device, fifo, socket, or other special file.
    Special,
}

impl Serialize for ContentDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Binary { sha1 } => serializer
                .serialize_str(&format!("content omitted, binary file. sha1sum: {sha1}")),
            Self::Listing(entries) => entries.serialize(serializer),
            Self::Special => serializer.serialize_str("content omitted, special file."),
        }
    }
}

/// Immutable state of one path at an instant.
///
/// The stat chain has more than one entry only when the path is a symlink;
/// each later entry describes the next link target, ending at the first
/// non-symlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSnapshot {
    Absent,
    Present {
        chain: Vec<StatEntry>,
        content: ContentDescriptor,
    },
}

impl FileSnapshot {
    pub fn state(&self) -> PresenceState {
        match self {
            Self::Absent => PresenceState::Absent,
            Self::Present { .. } => PresenceState::Present,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl Serialize for FileSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("state", &PresenceState::Absent)?;
                map.end()
            }
            Self::Present { chain, content } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("state", &PresenceState::Present)?;
                map.serialize_entry("stat", chain)?;
                map.serialize_entry("content", content)?;
                map.end()
            }
        }
    }
}

/// Snapshot `path`, resolving it against `cwd` when relative.
///
/// Symlinks are followed link by link; relative targets resolve against the
/// link's parent directory. Revisiting a path within one chain is a fatal
/// cycle error. A dangling link target snapshots as absent, same as a
/// missing path.
pub async fn snapshot(path: &Path, cwd: &Path) -> Result<FileSnapshot, SnapshotError> {
    let origin = normalize(&cwd.join(path));

    let mut chain: Vec<StatEntry> = Vec::new();
    let mut seen: Vec<PathBuf> = vec![origin.clone()];
    let mut current = origin.clone();

    loop {
        let meta = match tokio::fs::symlink_metadata(&current).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FileSnapshot::Absent),
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: current,
                    source,
                })
            }
        };
        chain.push(StatEntry::from_metadata(&current, &meta));
        if !meta.file_type().is_symlink() {
            break;
        }

        let target = tokio::fs::read_link(&current)
            .await
            .map_err(|source| SnapshotError::Io {
                path: current.clone(),
                source,
            })?;
        let next = if target.is_absolute() {
            normalize(&target)
        } else {
            let parent = current.parent().unwrap_or(Path::new("/"));
            normalize(&parent.join(target))
        };
        if seen.contains(&next) {
            seen.push(next);
            return Err(SnapshotError::CyclicSymlink { chain: seen });
        }
        seen.push(next.clone());
        current = next;
    }

    let final_type = chain.last().map(|entry| entry.file_type);
    let content = match final_type {
        Some(FileTypeTag::Regular) => read_content(&origin).await?,
        Some(FileTypeTag::Directory) => read_listing(&origin).await?,
        _ => ContentDescriptor::Special,
    };

    Ok(FileSnapshot::Present { chain, content })
}

/// Read a regular file, decoding to text or hashing undecodable bytes.
async fn read_content(path: &Path) -> Result<ContentDescriptor, SnapshotError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(ContentDescriptor::Text(text)),
        Err(e) => Ok(ContentDescriptor::Binary {
            sha1: format!("{:x}", Sha1::digest(e.as_bytes())),
        }),
    }
}

/// List a directory's immediate entries in OS order.
async fn read_listing(path: &Path) -> Result<ContentDescriptor, SnapshotError> {
    let io_err = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(path).await.map_err(&io_err)?;
    while let Some(entry) = dir.next_entry().await.map_err(&io_err)? {
        entries.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(ContentDescriptor::Listing(entries))
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component, without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
