use std::path::Path;

use crate::types::CommitRecord;

use super::GitRunner;

// One fixed field (hash) ahead of the subject, six fixed fields behind it.
const LOG_FORMAT: &str = "--format=%h|%s|%ad|%at|%aI|%cd|%ct|%cI";
const TAIL_FIELDS: usize = 6;

/// Author and commit timestamps of the most recent commit, if any.
#[must_use]
pub(crate) fn head_commit_times(repo: &Path, git: &dyn GitRunner) -> Option<(i64, i64)> {
    let out = git.run_git(repo, &["log", "-1", "--format=%at|%ct"]).ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&out.stdout);
    let line = text.lines().next()?.trim();
    let (author, commit) = line.split_once('|')?;
    Some((author.parse().ok()?, commit.parse().ok()?))
}

/// All commits across all branches, optionally narrowed to an author pattern.
#[must_use]
pub(crate) fn author_commits(
    repo: &Path,
    git: &dyn GitRunner,
    author: Option<&str>,
) -> Vec<CommitRecord> {
    let author_arg;
    let mut args = vec!["log", "--all", "--date=short", LOG_FORMAT];
    if let Some(pattern) = author {
        author_arg = format!("--author={pattern}");
        args.insert(2, &author_arg);
    }
    let Ok(out) = git.run_git(repo, &args) else {
        return Vec::new();
    };
    if !out.status.success() {
        return Vec::new();
    }
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .filter_map(parse_log_line)
        .collect()
}

/// The configured user name, used as the default author pattern.
#[must_use]
pub(crate) fn default_author(git: &dyn GitRunner) -> Option<String> {
    let out = git
        .run_git(Path::new("."), &["config", "user.name"])
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if name.is_empty() { None } else { Some(name) }
}

// The subject may itself contain `|`; rejoin everything between the fixed
// head and tail fields.
pub(crate) fn parse_log_line(line: &str) -> Option<CommitRecord> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 2 + TAIL_FIELDS {
        return None;
    }
    let hash = parts.first()?.trim();
    if hash.is_empty() {
        return None;
    }
    let tail = &parts[parts.len() - TAIL_FIELDS..];
    let message = parts[1..parts.len() - TAIL_FIELDS].join("|");
    Some(CommitRecord {
        hash: hash.to_string(),
        message,
        author_date: tail[0].to_string(),
        author_ts: tail[1].trim().parse().ok()?,
        author_time: time_of_day(tail[2])?,
        commit_date: tail[3].to_string(),
        commit_ts: tail[4].trim().parse().ok()?,
        commit_time: time_of_day(tail[5])?,
    })
}

// HH:MM out of an ISO-8601 timestamp like 2025-01-15T13:45:02+02:00.
fn time_of_day(iso: &str) -> Option<String> {
    iso.get(11..16).map(ToString::to_string)
}
