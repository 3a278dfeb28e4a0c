#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

mod types;
mod system;
mod git;
mod config;
mod pattern;
mod window;
mod scan;
mod classify;
mod report;
pub mod output;

pub use classify::{Classified, classify};
pub use config::{ConfigError, FileConfig, load_config};
pub use git::{DefaultGitRunner, GitRunner};
pub use pattern::{IgnorePattern, PatternError, load_ignore_file, matches_any};
pub use report::collect_report_data;
pub use scan::scan_root;
pub use system::{Clock, DefaultClock, DefaultFsOps, FsOps};
pub use types::{
    ClassifiedCommit, CommitRecord, Options, RebaseSummary, RebasedCommit, RepoActivity,
    ReportData,
};
pub use window::{DateWindow, WindowError, resolve};
