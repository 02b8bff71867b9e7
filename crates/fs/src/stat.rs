// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable stat records for a single path.

use std::fs::Metadata;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::Path;

use nix::unistd::{Gid, Group, Uid, User};
use serde::Serialize;

const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFREG: u32 = 0o100000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

/// Coarse file type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileTypeTag {
    #[serde(rename = "regular file")]
    Regular,
    #[serde(rename = "directory")]
    Directory,
    #[serde(rename = "character device")]
    CharDevice,
    #[serde(rename = "block device")]
    BlockDevice,
    #[serde(rename = "FIFO/pipe")]
    Fifo,
    #[serde(rename = "symlink")]
    Symlink,
    #[serde(rename = "socket")]
    Socket,
    #[serde(rename = "unknown")]
    Unknown,
}

impl FileTypeTag {
    /// Classify from a (non-following) stat result.
    pub fn from_file_type(ft: &std::fs::FileType) -> Self {
        if ft.is_file() {
            Self::Regular
        } else if ft.is_dir() {
            Self::Directory
        } else if ft.is_symlink() {
            Self::Symlink
        } else if ft.is_char_device() {
            Self::CharDevice
        } else if ft.is_block_device() {
            Self::BlockDevice
        } else if ft.is_fifo() {
            Self::Fifo
        } else if ft.is_socket() {
            Self::Socket
        } else {
            Self::Unknown
        }
    }
}

/// Stat of one path, with everything rendered for humans: owner and group by
/// name, an ls-style mode string, and a binary-unit size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    /// Absolute path this entry describes.
    pub path: String,
    /// Owning user name, or the numeric uid when unresolvable.
    pub owner: String,
    /// Owning group name, or the numeric gid when unresolvable.
    pub group: String,
    /// File type classification.
    pub file_type: FileTypeTag,
    /// Permission string, e.g. `-rw-r--r--`.
    pub mode: String,
    /// Size with a binary-multiple unit, e.g. `4.00 KiB`.
    pub size: String,
}

impl StatEntry {
    /// Build an entry from a path and its (non-following) metadata.
    pub fn from_metadata(path: &Path, meta: &Metadata) -> Self {
        Self {
            path: path.display().to_string(),
            owner: owner_name(meta.uid()),
            group: group_name(meta.gid()),
            file_type: FileTypeTag::from_file_type(&meta.file_type()),
            mode: mode_string(meta.mode()),
            size: human_size(meta.len()),
        }
    }
}

/// Resolve a uid to a user name, falling back to the numeric id.
fn owner_name(uid: u32) -> String {
    User::from_uid(Uid::from_raw(uid))
        .ok()
        .flatten()
        .map_or_else(|| uid.to_string(), |u| u.name)
}

/// Resolve a gid to a group name, falling back to the numeric id.
fn group_name(gid: u32) -> String {
    Group::from_gid(Gid::from_raw(gid))
        .ok()
        .flatten()
        .map_or_else(|| gid.to_string(), |g| g.name)
}

/// Render `st_mode` as an ls-style string: type character plus three
/// permission triplets, with setuid/setgid/sticky folded into the
/// execute positions.
pub fn mode_string(mode: u32) -> String {
    let type_ch = match mode & S_IFMT {
        S_IFREG => '-',
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        S_IFIFO => 'p',
        S_IFSOCK => 's',
        _ => '?',
    };

    let mut out = String::with_capacity(10);
    out.push(type_ch);
    for (read, write, exec, special, lower, upper) in [
        (0o400, 0o200, 0o100, S_ISUID, 's', 'S'),
        (0o040, 0o020, 0o010, S_ISGID, 's', 'S'),
        (0o004, 0o002, 0o001, S_ISVTX, 't', 'T'),
    ] {
        out.push(if mode & read != 0 { 'r' } else { '-' });
        out.push(if mode & write != 0 { 'w' } else { '-' });
        out.push(match (mode & exec != 0, mode & special != 0) {
            (true, false) => 'x',
            (true, true) => lower,
            (false, true) => upper,
            (false, false) => '-',
        });
    }
    out
}

/// Render a byte count with a binary-multiple unit.
///
/// Sizes below 1024 stay in bytes; everything else is divided down through
/// KiB..PiB and rendered with two decimals.
pub fn human_size(size: u64) -> String {
    if size < 1024 {
        return format!("{size} bytes");
    }
    let mut current = size as f64;
    let mut unit = "KiB";
    for suffix in ["KiB", "MiB", "GiB", "TiB", "PiB"] {
        unit = suffix;
        current /= 1024.0;
        if current < 1024.0 {
            break;
        }
    }
    format!("{current:.2} {unit}")
}

#[cfg(test)]
#[path = "stat_tests.rs"]
mod tests;
