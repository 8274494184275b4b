//! Change-set computation between two tree snapshots.
//!
//! Classifies path-level differences into added and non-added files and
//! accumulates the changed-line count under the edit-cost rule: a deletion
//! run counts its old-side length, an insertion run its new-side length,
//! and a replacement run its new-side length only.

use std::collections::BTreeSet;

use serde::Serialize;

use revmate_core::{FileChange, Result};

use crate::repo::RepoBackend;

/// Derived summary of one tree-to-tree diff. Immutable once computed.
///
/// # Examples
///
/// ```
/// use revmate_analysis::diffstat::ChangeSet;
/// use revmate_core::{ChangeKind, FileChange, LineEdit};
///
/// let changes = vec![FileChange {
///     path: "src/lib.rs".into(),
///     kind: ChangeKind::Modified,
///     edits: vec![LineEdit { old_lines: 3, new_lines: 8 }],
/// }];
/// let set = ChangeSet::from_changes(&changes);
/// assert_eq!(set.changed_lines, 8);
/// assert!(set.non_added_files.contains("src/lib.rs"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    /// Paths introduced by the new tree.
    pub added_files: BTreeSet<String>,
    /// Paths that existed before: modified, deleted, or renamed. Downstream
    /// attribution only considers these.
    pub non_added_files: BTreeSet<String>,
    /// Total changed-line cost across all files, added files included.
    pub changed_lines: u64,
}

impl ChangeSet {
    /// Summarize a list of path-level differences.
    pub fn from_changes(changes: &[FileChange]) -> Self {
        let mut set = ChangeSet::default();
        for change in changes {
            if change.kind.is_non_added() {
                set.non_added_files.insert(change.path.clone());
            } else {
                set.added_files.insert(change.path.clone());
            }
            set.changed_lines += change.changed_lines();
        }
        set
    }
}

/// Compute the [`ChangeSet`] between two tree snapshots.
///
/// # Errors
///
/// Returns [`RevmateError::Repository`](revmate_core::RevmateError::Repository)
/// if a snapshot cannot be read, or
/// [`RevmateError::Diff`](revmate_core::RevmateError::Diff) if the backend
/// cannot produce a diff for the pair.
pub fn compute_change_set(
    backend: &dyn RepoBackend,
    old_tree: &str,
    new_tree: &str,
) -> Result<ChangeSet> {
    let changes = backend.diff_trees(old_tree, new_tree)?;
    Ok(ChangeSet::from_changes(&changes))
}
