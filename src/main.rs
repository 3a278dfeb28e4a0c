#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Local, Utc};
use standup::{
    Clock, DefaultClock, DefaultFsOps, DefaultGitRunner, FileConfig, Options,
    collect_report_data, load_config,
    output::{format_markdown, format_text, to_json},
    resolve,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Parser, Debug)]
#[command(version, about = "Report recent git activity under roots, standup style.")]
struct Args {
    /// Root directories to scan (default: ~/src)
    roots: Vec<PathBuf>,

    /// Days to look back when --since is not given (default: 7)
    #[arg(long)]
    days: Option<u32>,

    /// Window start as YYYY-MM-DD (start of day)
    #[arg(long)]
    since: Option<String>,

    /// Window end as YYYY-MM-DD (end of day; default: now)
    #[arg(long)]
    until: Option<String>,

    /// Author pattern (default: git config user.name)
    #[arg(long)]
    author: Option<String>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the ignore file looked up at each scan root
    #[arg(long)]
    ignore_file: Option<String>,

    /// Print debug info while scanning
    #[arg(long)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => FileConfig::default(),
    };

    // CLI wins over file config, file config over built-in defaults.
    let opts = Options {
        roots: if args.roots.is_empty() {
            file_config.roots.clone()
        } else {
            args.roots.clone()
        },
        days: args.days.or(file_config.days).unwrap_or(7),
        since: args.since.clone(),
        until: args.until.clone(),
        author: args.author.clone().or_else(|| file_config.author.clone()),
        ignore_file: args
            .ignore_file
            .clone()
            .or_else(|| file_config.ignore_file.clone())
            .unwrap_or_else(|| ".standupignore".to_string()),
        debug: args.debug,
    };

    let clock = DefaultClock;
    let now_utc: DateTime<Utc> = clock.now().into();
    let now_local = now_utc.with_timezone(&Local);
    let window = match resolve(
        opts.days,
        opts.since.as_deref(),
        opts.until.as_deref(),
        now_local,
    ) {
        Ok(window) => window,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let fs = DefaultFsOps;
    let git = DefaultGitRunner;
    let data = collect_report_data(&opts, &window, &fs, &git);
    let out = match args.output {
        OutputFormat::Text => format_text(&data),
        OutputFormat::Json => to_json(&data),
        OutputFormat::Markdown => format_markdown(&data),
    };
    println!("{out}");
    ExitCode::SUCCESS
}
