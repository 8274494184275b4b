//! Reviewer ranking from attribution counts.
//!
//! Flattens the per-file attribution lists into a per-author occurrence
//! count, drops the head author, and orders the rest by experience in the
//! touched area.

use std::collections::HashMap;

use serde::Serialize;

use revmate_core::Author;

use crate::blame::AttributionTable;

/// A suggested reviewer with their attribution count.
///
/// # Examples
///
/// ```
/// use revmate_analysis::rank::RankedReviewer;
/// use revmate_core::Author;
///
/// let reviewer = RankedReviewer {
///     author: Author::new("Bob", "bob@example.com"),
///     attributions: 3,
/// };
/// assert_eq!(reviewer.attributions, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedReviewer {
    /// The suggested reviewer.
    pub author: Author,
    /// Number of (file, commit) attribution pairs credited to them.
    pub attributions: usize,
}

/// Rank attributed authors by occurrence count, descending.
///
/// Every (file, commit) pair counts one occurrence for the commit's
/// author, keyed by email. Occurrences of `exclude` (the head author) are
/// dropped entirely. The sort is stable, so authors with equal counts keep
/// the order in which they were first encountered. The full sequence is
/// returned, untruncated.
pub fn rank(table: &AttributionTable, exclude: &Author) -> Vec<RankedReviewer> {
    let mut order: Vec<Author> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for entry in table.iter() {
        for commit in &entry.commits {
            let author = &commit.author;
            if author.email == exclude.email {
                continue;
            }
            if !counts.contains_key(&author.email) {
                order.push(author.clone());
            }
            *counts.entry(author.email.clone()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<RankedReviewer> = order
        .into_iter()
        .map(|author| {
            let attributions = counts[&author.email];
            RankedReviewer {
                author,
                attributions,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.attributions.cmp(&a.attributions));
    ranked
}
