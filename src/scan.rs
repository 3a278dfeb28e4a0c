use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rayon::prelude::*;

use crate::git::{GitRunner, head_commit_times};
use crate::pattern::{IgnorePattern, matches_any};
use crate::system::FsOps;
use crate::window::DateWindow;

struct ScanContext<'a> {
    root: &'a Path,
    window: &'a DateWindow,
    patterns: &'a [IgnorePattern],
    fs: &'a dyn FsOps,
    git: &'a dyn GitRunner,
    // Canonical paths already entered; first writer wins on symlink cycles.
    visited: Mutex<HashSet<PathBuf>>,
    debug: bool,
}

/// Find repositories under `root` whose most recent commit has either
/// timestamp inside `window`. Branches fan out concurrently; results
/// accumulate per branch and merge on the way back up.
#[must_use]
pub fn scan_root(
    root: &Path,
    window: &DateWindow,
    patterns: &[IgnorePattern],
    fs: &dyn FsOps,
    git: &dyn GitRunner,
    debug: bool,
) -> Vec<PathBuf> {
    let ctx = ScanContext {
        root,
        window,
        patterns,
        fs,
        git,
        visited: Mutex::new(HashSet::new()),
        debug,
    };
    let mut repos = walk(&ctx, root);
    repos.sort_unstable();
    repos
}

fn walk(ctx: &ScanContext<'_>, dir: &Path) -> Vec<PathBuf> {
    let canonical = match std::fs::canonicalize(dir) {
        Ok(canonical) => canonical,
        Err(err) => {
            if err.kind() != ErrorKind::PermissionDenied {
                eprintln!("[warn] cannot resolve {}: {err}", dir.display());
            }
            return Vec::new();
        }
    };

    {
        let Ok(mut visited) = ctx.visited.lock() else {
            return Vec::new();
        };
        if !visited.insert(canonical) {
            if ctx.debug {
                eprintln!("[debug] already visited: {}", dir.display());
            }
            return Vec::new();
        }
    }

    if let Ok(rel) = dir.strip_prefix(ctx.root)
        && !rel.as_os_str().is_empty()
    {
        let rel = rel_slash(rel);
        if matches_any(&rel, ctx.patterns) {
            if ctx.debug {
                eprintln!("[debug] ignored: {rel}");
            }
            return Vec::new();
        }
    }

    if ctx.fs.is_repo(dir) {
        // Repository boundaries are opaque; never descend into one.
        let active = head_commit_times(dir, ctx.git).is_some_and(|(author_ts, commit_ts)| {
            ctx.window.contains(author_ts) || ctx.window.contains(commit_ts)
        });
        if active {
            if ctx.debug {
                eprintln!("[debug] active repo: {}", dir.display());
            }
            return vec![dir.to_path_buf()];
        }
        return Vec::new();
    }

    subdirs(dir)
        .into_par_iter()
        .map(|child| walk(ctx, &child))
        .reduce(Vec::new, |mut acc, mut found| {
            acc.append(&mut found);
            acc
        })
}

// Immediate non-hidden subdirectories; enumeration failures prune the
// branch rather than aborting the scan.
fn subdirs(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() != ErrorKind::PermissionDenied {
                eprintln!("[warn] cannot list {}: {err}", dir.display());
            }
            return Vec::new();
        }
    };
    let mut out = Vec::new();
    for entry in entries.flatten() {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            out.push(path);
        }
    }
    out
}

fn rel_slash(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(all(test, unix))]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Output};

    use chrono::{Local, LocalResult, TimeZone, Utc};
    use tempfile::tempdir;

    use super::*;
    use crate::system::DefaultFsOps;
    use crate::window::resolve;

    struct StubGit {
        times: HashMap<PathBuf, (i64, i64)>,
    }

    impl GitRunner for StubGit {
        fn run_git(&self, repo: &Path, args: &[&str]) -> std::io::Result<Output> {
            assert_eq!(args, &["log", "-1", "--format=%at|%ct"]);
            match self.times.get(repo) {
                Some((author_ts, commit_ts)) => {
                    Ok(output(0, &format!("{author_ts}|{commit_ts}\n")))
                }
                None => Ok(output(1 << 8, "")),
            }
        }
    }

    fn output(raw_status: i32, stdout: &str) -> Output {
        Output {
            status: ExitStatus::from_raw(raw_status),
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        }
    }

    fn window_jan_10_to_20() -> DateWindow {
        let now = match Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => panic!("fixed now must exist"),
        };
        resolve(7, Some("2025-01-10"), Some("2025-01-20"), now).expect("window")
    }

    fn mid_window_ts() -> i64 {
        match Utc.with_ymd_and_hms(2025, 1, 15, 13, 0, 0) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp(),
            LocalResult::None => panic!("fixed timestamp must exist"),
        }
    }

    fn stale_ts() -> i64 {
        match Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp(),
            LocalResult::None => panic!("fixed timestamp must exist"),
        }
    }

    fn make_repo(path: &Path) {
        fs::create_dir_all(path.join(".git")).expect("create repo marker");
    }

    #[test]
    fn finds_active_repos_and_skips_stale_ones() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        make_repo(&root.join("alpha"));
        make_repo(&root.join("nested/beta"));
        make_repo(&root.join("stale"));

        let t = mid_window_ts();
        let git = StubGit {
            times: HashMap::from([
                (root.join("alpha"), (t, t)),
                (root.join("nested/beta"), (t, t)),
                (root.join("stale"), (stale_ts(), stale_ts())),
            ]),
        };

        let repos = scan_root(root, &window_jan_10_to_20(), &[], &DefaultFsOps, &git, false);
        assert_eq!(repos.len(), 2);
        assert!(repos.contains(&root.join("alpha")));
        assert!(repos.contains(&root.join("nested/beta")));
    }

    #[test]
    fn either_timestamp_in_window_counts_as_active() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        make_repo(&root.join("rewritten"));

        let git = StubGit {
            times: HashMap::from([(root.join("rewritten"), (stale_ts(), mid_window_ts()))]),
        };

        let repos = scan_root(root, &window_jan_10_to_20(), &[], &DefaultFsOps, &git, false);
        assert_eq!(repos, vec![root.join("rewritten")]);
    }

    #[test]
    fn never_descends_into_a_found_repository() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        make_repo(&root.join("outer"));
        make_repo(&root.join("outer/inner"));

        let t = mid_window_ts();
        let git = StubGit {
            times: HashMap::from([
                (root.join("outer"), (t, t)),
                (root.join("outer/inner"), (t, t)),
            ]),
        };

        let repos = scan_root(root, &window_jan_10_to_20(), &[], &DefaultFsOps, &git, false);
        assert_eq!(repos, vec![root.join("outer")]);
    }

    #[test]
    fn ignore_patterns_prune_whole_branches() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        make_repo(&root.join("vendor/lib"));
        make_repo(&root.join("kept"));

        let t = mid_window_ts();
        let git = StubGit {
            times: HashMap::from([
                (root.join("vendor/lib"), (t, t)),
                (root.join("kept"), (t, t)),
            ]),
        };
        let patterns = vec![IgnorePattern::compile("vendor/").expect("pattern")];

        let repos = scan_root(
            root,
            &window_jan_10_to_20(),
            &patterns,
            &DefaultFsOps,
            &git,
            false,
        );
        assert_eq!(repos, vec![root.join("kept")]);
    }

    #[test]
    fn hidden_directories_are_never_entered() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        make_repo(&root.join(".cache/hidden"));
        make_repo(&root.join("visible"));

        let t = mid_window_ts();
        let git = StubGit {
            times: HashMap::from([
                (root.join(".cache/hidden"), (t, t)),
                (root.join("visible"), (t, t)),
            ]),
        };

        let repos = scan_root(root, &window_jan_10_to_20(), &[], &DefaultFsOps, &git, false);
        assert_eq!(repos, vec![root.join("visible")]);
    }

    #[test]
    fn symlink_cycles_terminate_without_duplicates() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        make_repo(&root.join("project"));
        fs::create_dir_all(root.join("loopdir")).expect("create dir");
        std::os::unix::fs::symlink(root, root.join("loopdir/back")).expect("symlink");

        let t = mid_window_ts();
        let git = StubGit {
            times: HashMap::from([(root.join("project"), (t, t))]),
        };

        let repos = scan_root(root, &window_jan_10_to_20(), &[], &DefaultFsOps, &git, false);
        assert_eq!(repos, vec![root.join("project")]);
    }
}
