// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for spec tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub use errand_core::TaskSpec;
pub use errand_engine::{run, ExecutionResult};

/// Scratch directory for one scenario.
pub struct Project {
    _root: TempDir,
    path: PathBuf,
}

impl Project {
    pub fn empty() -> Self {
        let root = TempDir::new().unwrap();
        let path = root.path().canonicalize().unwrap();
        Self { _root: root, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of `name` inside the project, as a string.
    pub fn loc(&self, name: &str) -> String {
        self.path.join(name).display().to_string()
    }

    /// Create `name` with `contents`, returning its absolute path string.
    pub fn file(&self, name: &str, contents: &str) -> String {
        let full = self.path.join(name);
        std::fs::write(&full, contents).unwrap();
        full.display().to_string()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path.join(name).exists()
    }
}

/// Run a spec that must produce a result.
pub async fn run_ok(spec: &TaskSpec) -> ExecutionResult {
    run(spec).await.unwrap()
}
