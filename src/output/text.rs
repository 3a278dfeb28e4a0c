use std::fmt::Write as _;

use crate::types::{ClassifiedCommit, RebaseSummary, RepoActivity, ReportData};

#[must_use]
pub fn format_text(data: &ReportData) -> String {
    let mut out = String::new();
    let author = if data.author.is_empty() {
        "all authors".to_string()
    } else {
        data.author.clone()
    };
    let _ = writeln!(out, "activity {}..{} ({author})", data.since, data.until);

    if data.repos.is_empty() {
        out.push_str("\nno activity found\n");
        return out;
    }

    for repo in &data.repos {
        out.push('\n');
        out.push_str(&repo_heading(repo, data.multi_root));
        out.push('\n');
        for commit in &repo.commits {
            out.push_str(&commit_row(commit));
            out.push('\n');
        }
        for summary in &repo.rebase_summaries {
            out.push_str(&summary_row(summary));
            out.push('\n');
        }
    }
    out
}

fn repo_heading(repo: &RepoActivity, show_root: bool) -> String {
    if show_root {
        format!("{} ({})", repo.repo, repo.root_display)
    } else {
        repo.repo.clone()
    }
}

fn commit_row(commit: &ClassifiedCommit) -> String {
    let record = &commit.record;
    let mut row = format!(
        "  {}  {} {}  {}",
        record.hash, record.author_date, record.author_time, record.message
    );
    if commit.rebased {
        let _ = write!(row, " (recorded {})", record.commit_date);
    }
    row
}

fn summary_row(summary: &RebaseSummary) -> String {
    let authored = if summary.first_author_date == summary.last_author_date {
        summary.first_author_date.clone()
    } else {
        format!("{}..{}", summary.first_author_date, summary.last_author_date)
    };
    let noun = if summary.count == 1 { "commit" } else { "commits" };
    format!(
        "  rebased {} at {}: {} {noun} originally authored {authored}",
        summary.commit_date, summary.commit_time, summary.count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommitRecord;

    fn record(hash: &str) -> CommitRecord {
        CommitRecord {
            hash: hash.to_string(),
            message: "Fix retry loop".to_string(),
            author_date: "2025-01-15".to_string(),
            author_ts: 1_736_946_000,
            author_time: "13:00".to_string(),
            commit_date: "2025-01-18".to_string(),
            commit_ts: 1_737_205_200,
            commit_time: "14:30".to_string(),
        }
    }

    #[test]
    fn renders_commits_and_rebase_annotations() {
        let data = ReportData {
            since: "2025-01-10".to_string(),
            until: "2025-01-20".to_string(),
            author: "Alice".to_string(),
            repos: vec![RepoActivity {
                repo: "alpha".to_string(),
                path: "/src/alpha".to_string(),
                root_display: "~/src".to_string(),
                root_full: "/home/alice/src".to_string(),
                commits: vec![ClassifiedCommit {
                    record: record("a1b2c3d"),
                    rebased: true,
                    author_in_range: true,
                    commit_in_range: true,
                }],
                rebase_summaries: vec![RebaseSummary {
                    commit_date: "2025-01-18".to_string(),
                    commit_time: "14:30".to_string(),
                    count: 2,
                    first_author_date: "2025-01-01".to_string(),
                    last_author_date: "2025-01-02".to_string(),
                    commits: Vec::new(),
                }],
            }],
            multi_root: false,
        };

        let out = format_text(&data);
        assert!(out.contains("activity 2025-01-10..2025-01-20 (Alice)"));
        assert!(out.contains("alpha\n"));
        assert!(out.contains("a1b2c3d  2025-01-15 13:00  Fix retry loop (recorded 2025-01-18)"));
        assert!(out.contains(
            "rebased 2025-01-18 at 14:30: 2 commits originally authored 2025-01-01..2025-01-02"
        ));
    }

    #[test]
    fn empty_report_says_so() {
        let data = ReportData {
            since: "2025-01-10".to_string(),
            until: "2025-01-20".to_string(),
            ..ReportData::default()
        };
        let out = format_text(&data);
        assert!(out.contains("all authors"));
        assert!(out.contains("no activity found"));
    }
}
