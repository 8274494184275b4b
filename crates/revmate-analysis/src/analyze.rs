//! Orchestration of one analysis run.
//!
//! Sequences head/parent resolution, diff stats, effort estimation, the
//! attribution walk, and reviewer ranking for a single head commit. The
//! analysis is an advisory sidecar: every backend failure is caught, traced,
//! and mapped to a skipped outcome instead of failing the caller.

use std::fmt;

use serde::Serialize;

use revmate_core::{Result, RevmateConfig, TraceSink};

use crate::blame;
use crate::diffstat;
use crate::effort;
use crate::rank::{self, RankedReviewer};
use crate::repo::RepoBackend;

/// Immutable result of a completed analysis run.
///
/// # Examples
///
/// ```
/// use revmate_analysis::analyze::ReviewReport;
///
/// let report = ReviewReport {
///     changed_lines: 300,
///     sessions_count: 1,
///     session_length: 60,
///     reviewers_count: 2,
///     ranked_reviewers: vec![],
/// };
/// assert_eq!(report.reviewers_count, 2);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    /// Changed-line cost of the head-vs-parent diff.
    pub changed_lines: u64,
    /// Suggested number of review sessions.
    pub sessions_count: u64,
    /// Suggested session length in minutes.
    pub session_length: u64,
    /// Minimum number of reviewers to invite.
    pub reviewers_count: u64,
    /// Suggested reviewers, most experienced in the touched area first.
    pub ranked_reviewers: Vec<RankedReviewer>,
}

/// Why an analysis run produced no report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The run was not triggered by the watched upstream event.
    NotTriggered,
    /// The head commit has no parents.
    RootCommit,
    /// The head commit has more than one parent; a single-parent diff is
    /// not meaningful.
    MergeCommit,
    /// The head-vs-parent diff changed no lines.
    EmptyChange,
    /// A backend read failed; the failure was traced and swallowed.
    BackendFailure,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotTriggered => write!(f, "not triggered by the watched event"),
            SkipReason::RootCommit => write!(f, "head commit has no parents"),
            SkipReason::MergeCommit => write!(f, "head commit is a merge"),
            SkipReason::EmptyChange => write!(f, "no lines changed"),
            SkipReason::BackendFailure => write!(f, "repository backend failure"),
        }
    }
}

/// Outcome of one analysis run: a report, or a non-fatal skip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum AnalysisOutcome {
    /// Analysis completed.
    Report(ReviewReport),
    /// Analysis was short-circuited; the host proceeds as if the feature
    /// were absent.
    Skipped {
        /// Why no report was produced.
        reason: SkipReason,
    },
}

impl AnalysisOutcome {
    /// The report, if the analysis completed.
    pub fn report(&self) -> Option<&ReviewReport> {
        match self {
            AnalysisOutcome::Report(report) => Some(report),
            AnalysisOutcome::Skipped { .. } => None,
        }
    }

    fn skipped(reason: SkipReason) -> Self {
        AnalysisOutcome::Skipped { reason }
    }
}

/// Analyze the commit at `revspec` against its first parent.
///
/// `triggered` is the host-supplied answer to "was this run caused by the
/// expected upstream event"; untriggered runs are skipped without touching
/// the repository. This function never returns an error: backend failures
/// are written to `trace` and reported as
/// [`SkipReason::BackendFailure`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use revmate_analysis::analyze::analyze;
/// use revmate_analysis::repo::GitBackend;
/// use revmate_core::{NullTrace, RevmateConfig};
///
/// let backend = GitBackend::open(Path::new(".")).unwrap();
/// let outcome = analyze(&backend, &RevmateConfig::default(), true, "HEAD", &NullTrace);
/// if let Some(report) = outcome.report() {
///     println!("{} changed lines", report.changed_lines);
/// }
/// ```
pub fn analyze(
    backend: &dyn RepoBackend,
    config: &RevmateConfig,
    triggered: bool,
    revspec: &str,
    trace: &dyn TraceSink,
) -> AnalysisOutcome {
    if !triggered {
        trace.line("not triggered by the watched event, skipping analysis");
        return AnalysisOutcome::skipped(SkipReason::NotTriggered);
    }

    match run(backend, config, revspec, trace) {
        Ok(outcome) => outcome,
        Err(err) => {
            trace.line(&format!("analysis abandoned: {err}"));
            AnalysisOutcome::skipped(SkipReason::BackendFailure)
        }
    }
}

fn run(
    backend: &dyn RepoBackend,
    config: &RevmateConfig,
    revspec: &str,
    trace: &dyn TraceSink,
) -> Result<AnalysisOutcome> {
    let head = backend.resolve(revspec)?;
    trace.line(&format!("head: {}", head.id));

    let Some(parent_id) = head.first_parent_id() else {
        trace.line("no parents detected, skipping analysis");
        return Ok(AnalysisOutcome::skipped(SkipReason::RootCommit));
    };
    if head.is_merge() {
        trace.line("merge commit detected, skipping analysis");
        return Ok(AnalysisOutcome::skipped(SkipReason::MergeCommit));
    }

    let parent = backend.lookup(parent_id)?;
    trace.line(&format!("parent: {}", parent.id));

    let change_set = diffstat::compute_change_set(backend, &parent.tree_id, &head.tree_id)?;
    trace.line(&format!("commit changed {} lines", change_set.changed_lines));
    if change_set.changed_lines == 0 {
        trace.line("empty change, skipping analysis");
        return Ok(AnalysisOutcome::skipped(SkipReason::EmptyChange));
    }

    let effort = effort::estimate(change_set.changed_lines)?;
    trace.line(&format!(
        "review time: {} session(s) of {} minutes",
        effort.sessions_count, effort.session_length
    ));
    trace.line(&format!(
        "minimum number of reviewers: {}",
        effort.reviewers_count
    ));

    let table = blame::attribute(
        backend,
        &head,
        &change_set.non_added_files,
        &config.walk,
        trace,
    )?;
    let ranked_reviewers = rank::rank(&table, &head.author);

    Ok(AnalysisOutcome::Report(ReviewReport {
        changed_lines: change_set.changed_lines,
        sessions_count: effort.sessions_count,
        session_length: effort.session_length,
        reviewers_count: effort.reviewers_count,
        ranked_reviewers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{modified, MemBackend};
    use revmate_core::{MemoryTrace, NullTrace};

    fn skip_reason(outcome: &AnalysisOutcome) -> Option<SkipReason> {
        match outcome {
            AnalysisOutcome::Skipped { reason } => Some(*reason),
            AnalysisOutcome::Report(_) => None,
        }
    }

    #[test]
    fn untriggered_run_skips_without_touching_the_backend() {
        // An empty backend would fail any resolve; the skip happens first.
        let backend = MemBackend::new();
        let outcome = analyze(
            &backend,
            &RevmateConfig::default(),
            false,
            "HEAD",
            &NullTrace,
        );
        assert_eq!(skip_reason(&outcome), Some(SkipReason::NotTriggered));
    }

    #[test]
    fn root_head_skips_without_error() {
        let mut backend = MemBackend::new();
        backend.add_commit("c1", ("Alice", "alice@example.com"), &[]);
        let outcome = analyze(
            &backend,
            &RevmateConfig::default(),
            true,
            "HEAD",
            &NullTrace,
        );
        assert_eq!(skip_reason(&outcome), Some(SkipReason::RootCommit));
    }

    #[test]
    fn merge_head_skips_without_error() {
        let mut backend = MemBackend::new();
        backend.add_commit("m", ("Alice", "alice@example.com"), &["c1", "c2"]);
        backend.add_commit("c1", ("Bob", "bob@example.com"), &[]);
        backend.add_commit("c2", ("Carol", "carol@example.com"), &[]);
        let outcome = analyze(
            &backend,
            &RevmateConfig::default(),
            true,
            "HEAD",
            &NullTrace,
        );
        assert_eq!(skip_reason(&outcome), Some(SkipReason::MergeCommit));
    }

    #[test]
    fn unresolvable_head_becomes_a_traced_backend_failure() {
        let backend = MemBackend::new();
        let trace = MemoryTrace::default();
        let outcome = analyze(&backend, &RevmateConfig::default(), true, "HEAD", &trace);
        assert_eq!(skip_reason(&outcome), Some(SkipReason::BackendFailure));
        assert!(trace
            .lines()
            .iter()
            .any(|l| l.starts_with("analysis abandoned:")));
    }

    #[test]
    fn diff_failure_becomes_a_backend_failure_outcome() {
        let mut backend = MemBackend::new();
        backend.add_commit("c2", ("Alice", "alice@example.com"), &["c1"]);
        backend.add_commit("c1", ("Bob", "bob@example.com"), &[]);
        backend.fail_diffs();
        let outcome = analyze(
            &backend,
            &RevmateConfig::default(),
            true,
            "HEAD",
            &NullTrace,
        );
        assert_eq!(skip_reason(&outcome), Some(SkipReason::BackendFailure));
    }

    #[test]
    fn empty_diff_skips_before_estimation() {
        let mut backend = MemBackend::new();
        backend.add_commit("c2", ("Alice", "alice@example.com"), &["c1"]);
        backend.add_commit("c1", ("Bob", "bob@example.com"), &[]);
        // No diff recorded: the pair resolves to zero changes.
        let outcome = analyze(
            &backend,
            &RevmateConfig::default(),
            true,
            "HEAD",
            &NullTrace,
        );
        assert_eq!(skip_reason(&outcome), Some(SkipReason::EmptyChange));
    }

    /// End-to-end over a synthetic ten-commit linear history: 300 changed
    /// lines across three modified files, default cap of four per file.
    #[test]
    fn linear_history_end_to_end() {
        let mut backend = MemBackend::new();
        let alice = ("Alice", "alice@example.com");
        let bob = ("Bob", "bob@example.com");
        let carol = ("Carol", "carol@example.com");
        let dave = ("Dave", "dave@example.com");

        backend.add_commit("c10", alice, &["c9"]);
        backend.add_commit("c9", bob, &["c8"]);
        backend.add_commit("c8", carol, &["c7"]);
        backend.add_commit("c7", alice, &["c6"]);
        backend.add_commit("c6", bob, &["c5"]);
        backend.add_commit("c5", dave, &["c4"]);
        backend.add_commit("c4", bob, &["c3"]);
        backend.add_commit("c3", alice, &["c2"]);
        backend.add_commit("c2", alice, &["c1"]);
        backend.add_commit("c1", alice, &[]);
        backend.set_head("c10");

        // Head diff: three modified files, 100 changed lines each
        backend.record_diff(
            "c9",
            "c10",
            vec![
                modified("f1.rs", 50, 100),
                modified("f2.rs", 50, 100),
                modified("f3.rs", 50, 100),
            ],
        );
        backend.record_diff(
            "c8",
            "c9",
            vec![modified("f1.rs", 1, 2), modified("f2.rs", 1, 2)],
        );
        backend.record_diff("c7", "c8", vec![modified("f1.rs", 1, 2)]);
        backend.record_diff("c6", "c7", vec![modified("f2.rs", 1, 2)]);
        backend.record_diff("c5", "c6", vec![modified("f3.rs", 1, 2)]);
        backend.record_diff("c4", "c5", vec![modified("f1.rs", 1, 2)]);
        backend.record_diff("c3", "c4", vec![modified("f1.rs", 1, 2)]);

        let outcome = analyze(
            &backend,
            &RevmateConfig::default(),
            true,
            "HEAD",
            &NullTrace,
        );
        let report = outcome.report().expect("analysis should complete");

        // 300 lines: 60 minutes, one session, two reviewers
        assert_eq!(report.changed_lines, 300);
        assert_eq!(report.sessions_count, 1);
        assert_eq!(report.session_length, 60);
        assert_eq!(report.reviewers_count, 2);

        // Head author Alice authored attributing commits but is excluded
        let emails: Vec<&str> = report
            .ranked_reviewers
            .iter()
            .map(|r| r.author.email.as_str())
            .collect();
        assert_eq!(
            emails,
            vec!["bob@example.com", "carol@example.com", "dave@example.com"]
        );
        // Bob: c9 on f1 + c9 on f2 + c6 on f3 (c4 on f1 is over the cap)
        assert_eq!(report.ranked_reviewers[0].attributions, 3);
        assert_eq!(report.ranked_reviewers[1].attributions, 1);
        assert_eq!(report.ranked_reviewers[2].attributions, 1);

        // No author exceeds 4 attributions per file by construction;
        // the report caps at 3 files * 4 commits in total
        let total: usize = report
            .ranked_reviewers
            .iter()
            .map(|r| r.attributions)
            .sum();
        assert!(total <= 12);
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = ReviewReport {
            changed_lines: 10,
            sessions_count: 1,
            session_length: 5,
            reviewers_count: 2,
            ranked_reviewers: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("changedLines").is_some());
        assert!(json.get("rankedReviewers").is_some());
        assert!(json.get("changed_lines").is_none());
    }
}
