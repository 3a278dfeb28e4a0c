use std::fmt::Write as _;

use tabled::{builder::Builder, settings::Style};

use crate::types::{RepoActivity, ReportData};

#[must_use]
pub fn format_markdown(data: &ReportData) -> String {
    let mut out = String::new();
    let author = if data.author.is_empty() {
        "all authors".to_string()
    } else {
        data.author.clone()
    };
    let _ = writeln!(out, "# Activity {}..{} ({author})", data.since, data.until);

    if data.repos.is_empty() {
        out.push_str("\nNo activity found.\n");
        return out;
    }

    for repo in &data.repos {
        out.push('\n');
        if data.multi_root {
            let _ = writeln!(out, "## {} ({})", repo.repo, repo.root_display);
        } else {
            let _ = writeln!(out, "## {}", repo.repo);
        }
        if !repo.commits.is_empty() {
            out.push('\n');
            out.push_str(&commit_table(repo));
            out.push('\n');
        }
        if !repo.rebase_summaries.is_empty() {
            out.push('\n');
            out.push_str(&rebase_table(repo));
            out.push('\n');
        }
    }
    out
}

fn commit_table(repo: &RepoActivity) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Hash", "Date", "Time", "Message"]);
    for commit in &repo.commits {
        let record = &commit.record;
        let message = if commit.rebased {
            format!("{} (recorded {})", record.message, record.commit_date)
        } else {
            record.message.clone()
        };
        builder.push_record([
            record.hash.clone(),
            record.author_date.clone(),
            record.author_time.clone(),
            message,
        ]);
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    table.to_string()
}

fn rebase_table(repo: &RepoActivity) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Recorded", "Time", "Commits", "Authored"]);
    for summary in &repo.rebase_summaries {
        let authored = if summary.first_author_date == summary.last_author_date {
            summary.first_author_date.clone()
        } else {
            format!("{}..{}", summary.first_author_date, summary.last_author_date)
        };
        builder.push_record([
            summary.commit_date.clone(),
            summary.commit_time.clone(),
            summary.count.to_string(),
            authored,
        ]);
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassifiedCommit, CommitRecord, RebaseSummary};

    #[test]
    fn renders_markdown_tables_per_repo() {
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
                    record: CommitRecord {
                        hash: "a1b2c3d".to_string(),
                        message: "Fix retry loop".to_string(),
                        author_date: "2025-01-15".to_string(),
                        author_ts: 1_736_946_000,
                        author_time: "13:00".to_string(),
                        commit_date: "2025-01-15".to_string(),
                        commit_ts: 1_736_946_000,
                        commit_time: "13:00".to_string(),
                    },
                    rebased: false,
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

        let out = format_markdown(&data);
        assert!(out.contains("# Activity 2025-01-10..2025-01-20 (Alice)"));
        assert!(out.contains("## alpha"));
        assert!(out.contains("| Hash"));
        assert!(out.contains("a1b2c3d"));
        assert!(out.contains("| Recorded"));
        assert!(out.contains("2025-01-01..2025-01-02"));
    }
}
