use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A commit author identity.
///
/// Authors are compared by email throughout revmate; the name is carried
/// for display only.
///
/// # Examples
///
/// ```
/// use revmate_core::Author;
///
/// let author = Author::new("Alice", "alice@example.com");
/// assert_eq!(author.to_string(), "Alice <alice@example.com>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Email address, the identity key.
    pub email: String,
}

impl Author {
    /// Create an author from name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// An immutable reference to a commit, supplied by the repository backend.
///
/// # Examples
///
/// ```
/// use revmate_core::{Author, CommitRef};
///
/// let commit = CommitRef {
///     id: "a3f8c1d2e4b5".into(),
///     author: Author::new("Alice", "alice@example.com"),
///     parent_ids: vec!["9b2e7f10aa34".into()],
///     tree_id: "5c6d7e8f9a0b".into(),
/// };
/// assert!(!commit.is_merge());
/// assert!(!commit.is_root());
/// assert_eq!(commit.first_parent_id(), Some("9b2e7f10aa34"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRef {
    /// Full commit id.
    pub id: String,
    /// Author identity.
    pub author: Author,
    /// Parent commit ids, in parent order.
    pub parent_ids: Vec<String>,
    /// Id of the tree snapshot this commit points at.
    pub tree_id: String,
}

impl CommitRef {
    /// Whether this commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }

    /// Whether this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }

    /// The first parent id, if any. Ancestry walks follow only this link.
    pub fn first_parent_id(&self) -> Option<&str> {
        self.parent_ids.first().map(String::as_str)
    }

    /// Abbreviated id for trace lines.
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }
}

/// Classification of a path-level difference.
///
/// # Examples
///
/// ```
/// use revmate_core::ChangeKind;
///
/// assert_eq!(ChangeKind::Added.to_string(), "added");
/// assert!(!ChangeKind::Added.is_non_added());
/// assert!(ChangeKind::Deleted.is_non_added());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// New file with no old-side content.
    Added,
    /// Existing file changed in place.
    Modified,
    /// File removed.
    Deleted,
    /// File moved to a new path.
    Renamed,
}

impl ChangeKind {
    /// Whether this change lands in the non-added bucket.
    ///
    /// Everything except [`ChangeKind::Added`] does; downstream attribution
    /// only distinguishes added from not-added.
    pub fn is_non_added(self) -> bool {
        !matches!(self, ChangeKind::Added)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Modified => write!(f, "modified"),
            ChangeKind::Deleted => write!(f, "deleted"),
            ChangeKind::Renamed => write!(f, "renamed"),
        }
    }
}

/// One run of a line-level edit script: `old_lines` replaced by
/// `new_lines`.
///
/// A run with `old_lines == 0` is an insertion, `new_lines == 0` a
/// deletion, and both non-zero a replacement. The changed-line cost of a
/// replacement is its new-side length only; this asymmetry matches an edit
/// cost, not a diff line count.
///
/// # Examples
///
/// ```
/// use revmate_core::LineEdit;
///
/// assert_eq!(LineEdit { old_lines: 0, new_lines: 7 }.changed_lines(), 7);
/// assert_eq!(LineEdit { old_lines: 4, new_lines: 0 }.changed_lines(), 4);
/// assert_eq!(LineEdit { old_lines: 9, new_lines: 3 }.changed_lines(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEdit {
    /// Lines on the old side of the run.
    pub old_lines: u32,
    /// Lines on the new side of the run.
    pub new_lines: u32,
}

impl LineEdit {
    /// Changed-line cost of this run.
    pub fn changed_lines(self) -> u64 {
        if self.new_lines > 0 {
            u64::from(self.new_lines)
        } else {
            u64::from(self.old_lines)
        }
    }
}

/// A single path-level difference between two tree snapshots.
///
/// # Examples
///
/// ```
/// use revmate_core::{ChangeKind, FileChange, LineEdit};
///
/// let change = FileChange {
///     path: "src/main.rs".into(),
///     kind: ChangeKind::Modified,
///     edits: vec![
///         LineEdit { old_lines: 2, new_lines: 5 },
///         LineEdit { old_lines: 3, new_lines: 0 },
///     ],
/// };
/// assert_eq!(change.lines_inserted(), 5);
/// assert_eq!(change.lines_deleted(), 5);
/// assert_eq!(change.changed_lines(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Path relative to the repository root. Deleted files keep their old
    /// path.
    pub path: String,
    /// Classification of the change.
    pub kind: ChangeKind,
    /// Line-level edit runs for this file.
    pub edits: Vec<LineEdit>,
}

impl FileChange {
    /// Total new-side lines across all edit runs.
    pub fn lines_inserted(&self) -> u64 {
        self.edits.iter().map(|e| u64::from(e.new_lines)).sum()
    }

    /// Total old-side lines across all edit runs.
    pub fn lines_deleted(&self) -> u64 {
        self.edits.iter().map(|e| u64::from(e.old_lines)).sum()
    }

    /// Changed-line cost of this file under the edit-cost rule.
    pub fn changed_lines(&self) -> u64 {
        self.edits.iter().map(|e| e.changed_lines()).sum()
    }
}

/// Output format for CLI subcommands.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing.
///
/// # Examples
///
/// ```
/// use revmate_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report (default).
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown-formatted report.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
