use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::{ThreadPoolBuilder, prelude::*};

use crate::classify::classify;
use crate::git::{GitRunner, author_commits, default_author};
use crate::pattern::load_ignore_file;
use crate::scan::scan_root;
use crate::system::FsOps;
use crate::types::{Options, RepoActivity, ReportData};
use crate::window::DateWindow;

pub fn collect_report_data(
    opts: &Options,
    window: &DateWindow,
    fs: &dyn FsOps,
    git: &dyn GitRunner,
) -> ReportData {
    let default_root = PathBuf::from("~/src");
    let roots: Vec<PathBuf> = if opts.roots.is_empty() {
        vec![default_root]
    } else {
        opts.roots.clone()
    };

    let mut rooted: Vec<(String, PathBuf)> = Vec::new();
    for root in &roots {
        let root_display = root.to_string_lossy().to_string();
        let expanded = fs.expand_tilde(root);
        let root_full = if expanded.is_absolute() {
            expanded
        } else {
            match env::current_dir() {
                Ok(cwd) => cwd.join(expanded),
                Err(_) => expanded,
            }
        };
        rooted.push((root_display, root_full));
    }

    let author = opts.author.clone().or_else(|| default_author(git));

    let mut found: Vec<(String, String, PathBuf)> = Vec::new();
    for (root_display, root_full) in &rooted {
        let patterns = load_ignore_file(&root_full.join(&opts.ignore_file));
        let repos = scan_root(root_full, window, &patterns, fs, git, opts.debug);

        if opts.debug {
            eprintln!(
                "[debug] root_display={} root_full={} patterns={} repos_found={}",
                root_display,
                root_full.display(),
                patterns.len(),
                repos.len()
            );
        }

        for repo in repos {
            found.push((
                root_display.clone(),
                root_full.display().to_string(),
                repo,
            ));
        }
    }

    ReportData {
        since: window.since_label.to_string(),
        until: window.until_label.to_string(),
        author: author.clone().unwrap_or_default(),
        repos: classify_repos(found, window, git, author.as_deref()),
        multi_root: rooted.len() > 1,
    }
}

fn classify_repos(
    found: Vec<(String, String, PathBuf)>,
    window: &DateWindow,
    git: &dyn GitRunner,
    author: Option<&str>,
) -> Vec<RepoActivity> {
    if found.is_empty() {
        return Vec::new();
    }

    let progress = ProgressBar::new(found.len() as u64);
    let style =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message("reading commit logs");

    let worker = || {
        found
            .into_par_iter()
            .filter_map(|(root_display, root_full, path)| {
                let activity =
                    analyze_repo(&path, root_display, root_full, window, git, author);
                progress.inc(1);
                activity
            })
            .collect::<Vec<_>>()
    };

    let mut entries = match ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build()
    {
        Ok(pool) => pool.install(worker),
        Err(err) => {
            eprintln!("[warn] could not size thread pool ({err}); using default");
            worker()
        }
    };
    progress.finish_and_clear();

    entries.sort_by(|a, b| (&a.root_display, &a.repo).cmp(&(&b.root_display, &b.repo)));
    entries
}

fn analyze_repo(
    path: &Path,
    root_display: String,
    root_full: String,
    window: &DateWindow,
    git: &dyn GitRunner,
    author: Option<&str>,
) -> Option<RepoActivity> {
    let records = author_commits(path, git, author);
    let classified = classify(&records, window);
    if classified.commits.is_empty() && classified.rebase_summaries.is_empty() {
        return None;
    }
    let repo = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Some(RepoActivity {
        repo,
        path: path.display().to_string(),
        root_display,
        root_full,
        commits: classified.commits,
        rebase_summaries: classified.rebase_summaries,
    })
}
