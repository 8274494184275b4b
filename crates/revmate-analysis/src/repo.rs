//! Repository backend abstraction and its git2 implementation.
//!
//! The analysis never touches a repository directly; it goes through
//! [`RepoBackend`], which resolves revisions, looks up commits, and
//! produces tree-to-tree diffs with line-level edit runs. [`GitBackend`]
//! implements the contract over a local git repository.

use std::collections::HashMap;
use std::path::Path;

use git2::{Delta, DiffOptions, Oid, Repository};

use revmate_core::{Author, ChangeKind, CommitRef, FileChange, LineEdit, Result, RevmateError};

/// Capabilities the analysis requires from a version-control backend.
///
/// All calls are blocking; one analysis run uses one backend handle from a
/// single thread of control.
pub trait RepoBackend {
    /// Resolve a revision spec (e.g. `"HEAD"`) to a commit.
    fn resolve(&self, revspec: &str) -> Result<CommitRef>;

    /// Look up a commit by its full id.
    fn lookup(&self, id: &str) -> Result<CommitRef>;

    /// Compute path-level differences between two tree snapshots,
    /// including per-file line-level edit runs.
    fn diff_trees(&self, old_tree: &str, new_tree: &str) -> Result<Vec<FileChange>>;
}

/// Depth-bounded ancestry iterator following only first-parent links.
///
/// Yields the starting commit first, then each first parent in turn. The
/// iteration ends after a parentless commit has been yielded, or once
/// `max_depth` commits have been produced. A backend failure is yielded
/// once and ends the iteration.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use revmate_analysis::repo::{FirstParentWalk, GitBackend, RepoBackend};
///
/// let backend = GitBackend::open(Path::new(".")).unwrap();
/// let head = backend.resolve("HEAD").unwrap();
/// for commit in FirstParentWalk::new(&backend, &head.id, 10) {
///     println!("{}", commit.unwrap().short_id());
/// }
/// ```
pub struct FirstParentWalk<'a> {
    backend: &'a dyn RepoBackend,
    next_id: Option<String>,
    remaining: usize,
}

impl<'a> FirstParentWalk<'a> {
    /// Start a walk at `head_id`, visiting at most `max_depth` commits.
    pub fn new(backend: &'a dyn RepoBackend, head_id: &str, max_depth: usize) -> Self {
        Self {
            backend,
            next_id: Some(head_id.to_string()),
            remaining: max_depth,
        }
    }
}

impl Iterator for FirstParentWalk<'_> {
    type Item = Result<CommitRef>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next_id.take()?;
        match self.backend.lookup(&id) {
            Ok(commit) => {
                self.remaining -= 1;
                self.next_id = commit.first_parent_id().map(String::from);
                Some(Ok(commit))
            }
            Err(err) => {
                self.remaining = 0;
                Some(Err(err))
            }
        }
    }
}

/// [`RepoBackend`] implementation over a local git repository.
///
/// Diffs are plain tree-to-tree comparisons without rename detection, so a
/// moved file surfaces as a deletion plus an addition.
pub struct GitBackend {
    repo: Repository,
}

impl GitBackend {
    /// Open the repository at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RevmateError::Repository`] if the path does not hold a
    /// git repository.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)
            .map_err(|e| RevmateError::Repository(format!("failed to open repository: {e}")))?;
        Ok(Self { repo })
    }

    fn commit_ref(commit: &git2::Commit<'_>) -> CommitRef {
        let author = commit.author();
        CommitRef {
            id: commit.id().to_string(),
            author: Author::new(
                author.name().unwrap_or("unknown"),
                author.email().unwrap_or("unknown"),
            ),
            parent_ids: commit.parent_ids().map(|oid| oid.to_string()).collect(),
            tree_id: commit.tree_id().to_string(),
        }
    }

    fn find_tree(&self, id: &str) -> Result<git2::Tree<'_>> {
        let oid = Oid::from_str(id)
            .map_err(|e| RevmateError::Repository(format!("invalid tree id '{id}': {e}")))?;
        self.repo
            .find_tree(oid)
            .map_err(|e| RevmateError::Repository(format!("failed to read tree {id}: {e}")))
    }
}

impl RepoBackend for GitBackend {
    fn resolve(&self, revspec: &str) -> Result<CommitRef> {
        let object = self
            .repo
            .revparse_single(revspec)
            .map_err(|e| RevmateError::Repository(format!("failed to resolve '{revspec}': {e}")))?;
        let commit = object.peel_to_commit().map_err(|e| {
            RevmateError::Repository(format!("'{revspec}' is not a commit: {e}"))
        })?;
        Ok(Self::commit_ref(&commit))
    }

    fn lookup(&self, id: &str) -> Result<CommitRef> {
        let oid = Oid::from_str(id)
            .map_err(|e| RevmateError::Repository(format!("invalid commit id '{id}': {e}")))?;
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|e| RevmateError::Repository(format!("failed to find commit {id}: {e}")))?;
        Ok(Self::commit_ref(&commit))
    }

    fn diff_trees(&self, old_tree: &str, new_tree: &str) -> Result<Vec<FileChange>> {
        let old = self.find_tree(old_tree)?;
        let new = self.find_tree(new_tree)?;

        let mut diff_opts = DiffOptions::new();
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&old), Some(&new), Some(&mut diff_opts))
            .map_err(|e| RevmateError::Diff(format!("failed to compute diff: {e}")))?;

        let mut changes: Vec<FileChange> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for delta in diff.deltas() {
            let (path, kind) = match delta.status() {
                Delta::Added => (delta_path(&delta, Side::New), ChangeKind::Added),
                Delta::Deleted => (delta_path(&delta, Side::Old), ChangeKind::Deleted),
                Delta::Renamed => (delta_path(&delta, Side::New), ChangeKind::Renamed),
                _ => (delta_path(&delta, Side::New), ChangeKind::Modified),
            };
            if path.is_empty() {
                continue;
            }
            index.insert(path.clone(), changes.len());
            changes.push(FileChange {
                path,
                kind,
                edits: Vec::new(),
            });
        }

        // Record (file, hunk, origin) events, then rebuild edit runs below.
        // A run is a maximal block of changed lines; its old side comes
        // before its new side within a hunk.
        let mut events: Vec<(usize, u32, char)> = Vec::new();
        diff.foreach(
            &mut |_delta, _progress| true,
            None,
            None,
            Some(&mut |delta, hunk, line| {
                let path = match delta.status() {
                    Delta::Deleted => delta_path(&delta, Side::Old),
                    _ => delta_path(&delta, Side::New),
                };
                if let (Some(&idx), Some(hunk)) = (index.get(&path), hunk) {
                    events.push((idx, hunk.old_start(), line.origin()));
                }
                true
            }),
        )
        .map_err(|e| RevmateError::Diff(format!("failed to iterate diff lines: {e}")))?;

        apply_edit_runs(&mut changes, &events);
        Ok(changes)
    }
}

enum Side {
    Old,
    New,
}

fn delta_path(delta: &git2::DiffDelta<'_>, side: Side) -> String {
    let file = match side {
        Side::Old => delta.old_file(),
        Side::New => delta.new_file(),
    };
    file.path()
        .unwrap_or(Path::new(""))
        .to_string_lossy()
        .to_string()
}

/// Fold per-line events into [`LineEdit`] runs on each change.
fn apply_edit_runs(changes: &mut [FileChange], events: &[(usize, u32, char)]) {
    let mut current: Option<(usize, u32)> = None;
    let mut pending = LineEdit {
        old_lines: 0,
        new_lines: 0,
    };

    let flush = |changes: &mut [FileChange], current: Option<(usize, u32)>, pending: &mut LineEdit| {
        if pending.old_lines > 0 || pending.new_lines > 0 {
            if let Some((idx, _)) = current {
                changes[idx].edits.push(*pending);
            }
            *pending = LineEdit {
                old_lines: 0,
                new_lines: 0,
            };
        }
    };

    for &(idx, hunk_start, origin) in events {
        let key = (idx, hunk_start);
        if current != Some(key) {
            flush(changes, current, &mut pending);
            current = Some(key);
        }
        match origin {
            '+' => pending.new_lines += 1,
            '-' => {
                // New side already accumulated: the previous run is done.
                if pending.new_lines > 0 {
                    flush(changes, current, &mut pending);
                }
                pending.old_lines += 1;
            }
            _ => flush(changes, current, &mut pending),
        }
    }
    flush(changes, current, &mut pending);
}
