//! Depth-bounded first-parent walk attributing files to recent modifiers.
//!
//! Starting at the head commit, the walk follows only first-parent links
//! and credits each target file to the most recent commits that touched it
//! as a non-added change, up to a per-file cap. Merge commits are noted but
//! still walked through their first parent; blacklisted authors are skipped
//! without stopping the walk; the walk ends early once every target file is
//! saturated.

use std::collections::BTreeSet;

use revmate_core::{CommitRef, Result, TraceSink, WalkConfig};

use crate::repo::{FirstParentWalk, RepoBackend};

/// Attribution list for a single file, nearest ancestor first.
#[derive(Debug, Clone)]
pub struct FileAttribution {
    /// File path relative to the repository root.
    pub path: String,
    /// Commits that most recently modified the file, capped.
    pub commits: Vec<CommitRef>,
}

/// Per-file attribution lists, in first-attribution order.
///
/// Rebuilt fresh for every analysis run; never mutated afterwards.
///
/// # Examples
///
/// ```
/// use revmate_analysis::blame::AttributionTable;
///
/// let table = AttributionTable::default();
/// assert!(table.is_empty());
/// assert!(table.commits_for("src/lib.rs").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributionTable {
    entries: Vec<FileAttribution>,
}

impl AttributionTable {
    /// The attribution list recorded for `path`, if any.
    pub fn commits_for(&self, path: &str) -> Option<&[CommitRef]> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.commits.as_slice())
    }

    /// Iterate files in first-attribution order.
    pub fn iter(&self) -> impl Iterator<Item = &FileAttribution> {
        self.entries.iter()
    }

    /// Number of files with at least one attribution.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn append(&mut self, path: &str, commit: CommitRef) {
        match self.entries.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => entry.commits.push(commit),
            None => self.entries.push(FileAttribution {
                path: path.to_string(),
                commits: vec![commit],
            }),
        }
    }

    fn count_for(&self, path: &str) -> usize {
        self.commits_for(path).map_or(0, <[CommitRef]>::len)
    }

    /// Whether every target file holds exactly `cap` entries.
    ///
    /// Vacuously true for an empty target set, which stops the walk at its
    /// first visit.
    fn is_saturated(&self, targets: &BTreeSet<String>, cap: usize) -> bool {
        targets.iter().all(|path| self.count_for(path) == cap)
    }
}

/// Walk history from `head` and attribute each target file to its most
/// recent non-added modifiers.
///
/// The head commit itself is visited first and attributes like any other
/// commit; ranking later removes the head author.
///
/// # Errors
///
/// Returns [`RevmateError::Repository`](revmate_core::RevmateError::Repository)
/// or [`RevmateError::Diff`](revmate_core::RevmateError::Diff) on backend
/// read failure.
pub fn attribute(
    backend: &dyn RepoBackend,
    head: &CommitRef,
    target_files: &BTreeSet<String>,
    config: &WalkConfig,
    trace: &dyn TraceSink,
) -> Result<AttributionTable> {
    let mut table = AttributionTable::default();

    for visited in FirstParentWalk::new(backend, &head.id, config.max_depth) {
        let commit = visited?;
        trace.line(&format!(
            "traversing commit {} by {}",
            commit.short_id(),
            commit.author.email
        ));
        if commit.is_merge() {
            // Diagnostic only: the first parent is still followed and the
            // commit still attributes.
            trace.line("skipping merge commit");
        }

        if is_blacklisted(&commit, &config.author_blacklist_prefixes) {
            trace.line("  skipping, author is blacklisted");
            continue;
        }

        if table.is_saturated(target_files, config.per_file_cap) {
            trace.line("stopping the history walk, attribution saturated");
            break;
        }

        let Some(parent_id) = commit.first_parent_id() else {
            break;
        };
        let parent = backend.lookup(parent_id)?;

        for change in backend.diff_trees(&parent.tree_id, &commit.tree_id)? {
            if !change.kind.is_non_added() {
                continue;
            }
            if !target_files.contains(&change.path) {
                continue;
            }
            if table.count_for(&change.path) >= config.per_file_cap {
                continue;
            }
            trace.line(&format!("  file {} edited", change.path));
            table.append(&change.path, commit.clone());
        }
    }

    Ok(table)
}

fn is_blacklisted(commit: &CommitRef, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| commit.author.email.starts_with(prefix.as_str()))
}
