// crates/infratest-terraform/src/stage.rs
// ============================================================================
// Module: Template Staging
// Description: Isolated per-deployment template copies.
// Purpose: Give every scenario its own mutable template workspace.
// Dependencies: infratest-core, tempfile
// ============================================================================

//! ## Overview
//! Concurrent scenarios must never share mutable template state, so each
//! deployment stages its own copy of the template tree into a private
//! temporary directory. Local engine state is excluded from the copy:
//! `.terraform/`, state files, and `.git/` stay behind, so a staged copy
//! starts clean regardless of what the source directory has accumulated.
//! The copy is removed when the staged template is dropped.
//! Invariants:
//! - Staged copies are disjoint directories; mutating one never affects the
//!   source or another copy.
//! - `.terraform/` and `*.tfstate*` never appear in a staged copy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use infratest_core::StageError;
use tempfile::TempDir;

// ============================================================================
// SECTION: Staged Template
// ============================================================================

/// Isolated copy of a template tree, removed on drop.
#[derive(Debug)]
pub struct StagedTemplate {
    /// Root of the staged copy.
    root: PathBuf,
    /// Owning temporary directory; dropping it removes the copy.
    workspace: TempDir,
}

impl StagedTemplate {
    /// Stages an isolated copy of the template at `source`.
    ///
    /// # Errors
    ///
    /// Returns [`StageError`] when the source is not a readable directory or
    /// the copy cannot be created.
    pub fn stage(source: &Path) -> Result<Self, StageError> {
        if !source.is_dir() {
            return Err(StageError::SourceUnavailable {
                path: source.display().to_string(),
                reason: "not a directory".to_owned(),
            });
        }
        let workspace = tempfile::Builder::new()
            .prefix("infratest-stage-")
            .tempdir()
            .map_err(|error| StageError::CopyFailed {
                path: source.display().to_string(),
                reason: error.to_string(),
            })?;
        let root = workspace.path().join("template");
        copy_tree(source, &root)?;
        Ok(Self { root, workspace })
    }

    /// Returns the root of the staged copy.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns the owning workspace directory.
    #[must_use]
    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }
}

// ============================================================================
// SECTION: Tree Copy
// ============================================================================

/// Recursively copies a template tree, excluding local engine state.
fn copy_tree(source: &Path, dest: &Path) -> Result<(), StageError> {
    let copy_failed = |path: &Path, error: std::io::Error| StageError::CopyFailed {
        path: path.display().to_string(),
        reason: error.to_string(),
    };
    fs::create_dir_all(dest).map_err(|error| copy_failed(dest, error))?;
    let entries = fs::read_dir(source).map_err(|error| copy_failed(source, error))?;
    for entry in entries {
        let entry = entry.map_err(|error| copy_failed(source, error))?;
        let name = entry.file_name();
        if excluded(&name) {
            continue;
        }
        let from = entry.path();
        let to = dest.join(&name);
        let file_type = entry
            .file_type()
            .map_err(|error| copy_failed(&from, error))?;
        if file_type.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|error| copy_failed(&from, error))?;
        }
    }
    Ok(())
}

/// Returns whether a directory entry is local engine state to leave behind.
fn excluded(name: &OsStr) -> bool {
    if name == ".terraform" || name == ".git" {
        return true;
    }
    let text = name.to_string_lossy();
    text.ends_with(".tfstate") || text.contains(".tfstate.")
}
