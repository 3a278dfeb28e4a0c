use std::collections::BTreeMap;

use crate::types::{ClassifiedCommit, CommitRecord, RebaseSummary, RebasedCommit};
use crate::window::DateWindow;

// Recorded-vs-authored divergence beyond this marks a rewritten commit;
// ordinary commit latency stays well under a day.
const REBASE_THRESHOLD_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Default, Clone)]
pub struct Classified {
    pub commits: Vec<ClassifiedCommit>,
    pub rebase_summaries: Vec<RebaseSummary>,
}

/// Partition raw commits against the window. Authored-in-window commits
/// are kept individually; commits only recorded in the window after a
/// rewrite fold into one summary per recorded calendar date; everything
/// else is dropped.
#[must_use]
pub fn classify(records: &[CommitRecord], window: &DateWindow) -> Classified {
    let mut commits = Vec::new();
    let mut batches: BTreeMap<String, Vec<&CommitRecord>> = BTreeMap::new();

    for record in records {
        let author_in_range = window.contains(record.author_ts);
        let commit_in_range = window.contains(record.commit_ts);
        let rebased = (record.commit_ts - record.author_ts).abs() > REBASE_THRESHOLD_SECS;

        if author_in_range {
            commits.push(ClassifiedCommit {
                record: record.clone(),
                rebased,
                author_in_range,
                commit_in_range,
            });
        } else if rebased && commit_in_range {
            batches
                .entry(record.commit_date.clone())
                .or_default()
                .push(record);
        }
    }

    let rebase_summaries = batches
        .into_iter()
        .map(|(commit_date, batch)| summarize(commit_date, &batch))
        .collect();

    Classified {
        commits,
        rebase_summaries,
    }
}

fn summarize(commit_date: String, batch: &[&CommitRecord]) -> RebaseSummary {
    // Zero-padded ISO dates order correctly as strings.
    let first_author_date = batch
        .iter()
        .map(|r| r.author_date.as_str())
        .min()
        .unwrap_or_default()
        .to_string();
    let last_author_date = batch
        .iter()
        .map(|r| r.author_date.as_str())
        .max()
        .unwrap_or_default()
        .to_string();
    // A rewrite stamps the whole batch close together; any member's
    // recorded time stands in for all of them.
    let commit_time = batch
        .first()
        .map(|r| r.commit_time.clone())
        .unwrap_or_default();
    RebaseSummary {
        commit_date,
        commit_time,
        count: u64::try_from(batch.len()).unwrap_or(u64::MAX),
        first_author_date,
        last_author_date,
        commits: batch
            .iter()
            .map(|r| RebasedCommit {
                hash: r.hash.clone(),
                date: r.author_date.clone(),
                message: r.message.clone(),
            })
            .collect(),
    }
}
