use serde::Serialize;

/// One parsed line of `git log` output, both timestamps retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    // Calendar date (YYYY-MM-DD) and clock time (HH:MM) as stamped by git
    pub author_date: String,
    pub author_ts: i64,
    pub author_time: String,
    pub commit_date: String,
    pub commit_ts: i64,
    pub commit_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCommit {
    #[serde(flatten)]
    pub record: CommitRecord,
    pub rebased: bool,
    pub author_in_range: bool,
    pub commit_in_range: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebasedCommit {
    pub hash: String,
    // Date the work was originally authored
    pub date: String,
    pub message: String,
}

/// One batch of commits whose recorded timestamps landed on the same
/// calendar date after history was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebaseSummary {
    pub commit_date: String,
    pub commit_time: String,
    pub count: u64,
    pub first_author_date: String,
    pub last_author_date: String,
    pub commits: Vec<RebasedCommit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoActivity {
    pub repo: String,
    pub path: String,
    // Root as passed on CLI (e.g., "~/src")
    pub root_display: String,
    // Expanded root path for JSON (e.g., "/home/user/src")
    pub root_full: String,
    pub commits: Vec<ClassifiedCommit>,
    pub rebase_summaries: Vec<RebaseSummary>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ReportData {
    pub since: String,
    pub until: String,
    pub author: String,
    pub repos: Vec<RepoActivity>,
    #[serde(skip)]
    pub multi_root: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub roots: Vec<std::path::PathBuf>,
    pub days: u32,
    pub since: Option<String>,
    pub until: Option<String>,
    pub author: Option<String>,
    pub ignore_file: String,
    pub debug: bool,
}
