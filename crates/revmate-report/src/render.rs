//! Text and Markdown renderers for the review report.

use std::fmt::Write;

use revmate_analysis::analyze::ReviewReport;
use revmate_core::ReportConfig;

/// Render the report as a plain-text block.
///
/// Session wording drops the session count when there is a single session;
/// the size commentary switches at `config.size_threshold` changed lines.
///
/// # Examples
///
/// ```
/// use revmate_analysis::analyze::ReviewReport;
/// use revmate_core::ReportConfig;
/// use revmate_report::render_text;
///
/// let report = ReviewReport {
///     changed_lines: 40,
///     sessions_count: 1,
///     session_length: 10,
///     reviewers_count: 2,
///     ranked_reviewers: vec![],
/// };
/// let text = render_text(&report, &ReportConfig::default());
/// assert!(text.contains("This commit changed 40 lines."));
/// assert!(text.contains("reasonable size"));
/// ```
pub fn render_text(report: &ReviewReport, config: &ReportConfig) -> String {
    let mut out = String::new();
    out.push_str(" -----------------------------------------------------------\n\n");
    out.push_str(" REVIEW PLAN\n\n");
    let _ = writeln!(out, " This commit changed {} lines.\n", report.changed_lines);

    // Size commentary, Cohen 2006
    if report.changed_lines <= config.size_threshold {
        out.push_str(" This is a reasonable size of a commit.\n\n");
    } else {
        out.push_str(" This may be too large for an effective review.\n");
        out.push_str(" A complete read-through of the change before the actual review will help to maximize\n");
        out.push_str(" the review effort.\n\n");
    }

    // Length of the review, Dunsmore 2000
    out.push_str(" It is suggested to perform the review in ");
    if report.sessions_count > 1 {
        let _ = write!(out, "{} sessions of ", report.sessions_count);
    }
    let _ = writeln!(out, "about {} minutes.\n", report.session_length);

    let _ = writeln!(
        out,
        " A minimum of {} reviewers should be invited.\n",
        report.reviewers_count
    );

    out.push_str(" Here is a list of developers sorted by experience in the area:\n\n");
    for reviewer in &report.ranked_reviewers {
        let _ = writeln!(out, " {} {}", reviewer.attributions, reviewer.author.email);
    }

    out
}

/// Render the report as Markdown.
pub fn render_markdown(report: &ReviewReport, config: &ReportConfig) -> String {
    let mut out = String::new();
    out.push_str("# Review Plan\n\n");
    let _ = writeln!(out, "This commit changed **{} lines**.\n", report.changed_lines);

    if report.changed_lines <= config.size_threshold {
        out.push_str("This is a reasonable size of a commit.\n\n");
    } else {
        out.push_str(
            "This may be too large for an effective review. A complete read-through of the \
             change before the actual review will help to maximize the review effort.\n\n",
        );
    }

    if report.sessions_count > 1 {
        let _ = writeln!(
            out,
            "Suggested review: {} sessions of about {} minutes.\n",
            report.sessions_count, report.session_length
        );
    } else {
        let _ = writeln!(
            out,
            "Suggested review: one session of about {} minutes.\n",
            report.session_length
        );
    }

    let _ = writeln!(
        out,
        "A minimum of **{} reviewers** should be invited.\n",
        report.reviewers_count
    );

    if !report.ranked_reviewers.is_empty() {
        out.push_str("Developers sorted by experience in the area:\n\n");
        out.push_str("| Attributions | Developer |\n");
        out.push_str("|---:|---|\n");
        for reviewer in &report.ranked_reviewers {
            let _ = writeln!(
                out,
                "| {} | {} |",
                reviewer.attributions, reviewer.author.email
            );
        }
    }

    out
}
