//! In-memory repository backend for unit tests.

use std::collections::HashMap;

use revmate_core::{Author, ChangeKind, CommitRef, FileChange, LineEdit, Result, RevmateError};

use crate::repo::RepoBackend;

/// Scripted [`RepoBackend`] over synthetic commits and diffs.
///
/// Commits are registered with [`add_commit`](MemBackend::add_commit); each
/// gets a derived tree id so diffs can be recorded per commit pair with
/// [`record_diff`](MemBackend::record_diff). Unrecorded diffs resolve to an
/// empty change list.
pub struct MemBackend {
    head: Option<String>,
    commits: HashMap<String, CommitRef>,
    diffs: HashMap<(String, String), Vec<FileChange>>,
    fail_diffs: bool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self {
            head: None,
            commits: HashMap::new(),
            diffs: HashMap::new(),
            fail_diffs: false,
        }
    }

    /// Register a commit. The first registered commit becomes HEAD unless
    /// [`set_head`](MemBackend::set_head) overrides it.
    pub fn add_commit(&mut self, id: &str, author: (&str, &str), parents: &[&str]) {
        if self.head.is_none() {
            self.head = Some(id.to_string());
        }
        self.commits.insert(
            id.to_string(),
            CommitRef {
                id: id.to_string(),
                author: Author::new(author.0, author.1),
                parent_ids: parents.iter().map(|p| p.to_string()).collect(),
                tree_id: tree_id(id),
            },
        );
    }

    pub fn set_head(&mut self, id: &str) {
        self.head = Some(id.to_string());
    }

    /// Record the diff between two commits' trees.
    pub fn record_diff(&mut self, old_commit: &str, new_commit: &str, changes: Vec<FileChange>) {
        self.diffs
            .insert((tree_id(old_commit), tree_id(new_commit)), changes);
    }

    /// Make every subsequent `diff_trees` call fail.
    pub fn fail_diffs(&mut self) {
        self.fail_diffs = true;
    }
}

impl RepoBackend for MemBackend {
    fn resolve(&self, revspec: &str) -> Result<CommitRef> {
        if revspec == "HEAD" {
            let head = self
                .head
                .as_deref()
                .ok_or_else(|| RevmateError::Repository("no HEAD".into()))?;
            return self.lookup(head);
        }
        self.lookup(revspec)
    }

    fn lookup(&self, id: &str) -> Result<CommitRef> {
        self.commits
            .get(id)
            .cloned()
            .ok_or_else(|| RevmateError::Repository(format!("unknown commit {id}")))
    }

    fn diff_trees(&self, old_tree: &str, new_tree: &str) -> Result<Vec<FileChange>> {
        if self.fail_diffs {
            return Err(RevmateError::Diff("scripted diff failure".into()));
        }
        Ok(self
            .diffs
            .get(&(old_tree.to_string(), new_tree.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

fn tree_id(commit_id: &str) -> String {
    format!("tree-{commit_id}")
}

/// A modified file with a single replace run.
pub fn modified(path: &str, old_lines: u32, new_lines: u32) -> FileChange {
    FileChange {
        path: path.into(),
        kind: ChangeKind::Modified,
        edits: vec![LineEdit {
            old_lines,
            new_lines,
        }],
    }
}

/// An added file with a single insert run.
pub fn added(path: &str, lines: u32) -> FileChange {
    FileChange {
        path: path.into(),
        kind: ChangeKind::Added,
        edits: vec![LineEdit {
            old_lines: 0,
            new_lines: lines,
        }],
    }
}

/// A deleted file with a single delete run.
pub fn deleted(path: &str, lines: u32) -> FileChange {
    FileChange {
        path: path.into(),
        kind: ChangeKind::Deleted,
        edits: vec![LineEdit {
            old_lines: lines,
            new_lines: 0,
        }],
    }
}
