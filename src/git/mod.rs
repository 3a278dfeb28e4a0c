mod log;
mod runner;

pub use runner::{DefaultGitRunner, GitRunner};

pub(crate) use log::{author_commits, default_author, head_commit_times};
