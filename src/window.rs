use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, TimeZone};

/// The inclusive instant range all activity decisions are made against.
#[derive(Debug, Clone, Copy)]
pub struct DateWindow {
    pub since: DateTime<Local>,
    pub until: DateTime<Local>,
    pub since_label: NaiveDate,
    pub until_label: NaiveDate,
}

impl DateWindow {
    #[must_use]
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.since.timestamp() && ts <= self.until.timestamp()
    }
}

#[derive(Debug)]
pub enum WindowError {
    InvalidDate { value: String },
    DateOutOfRange { value: String },
    InvalidRange { since: NaiveDate, until: NaiveDate },
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { value } => {
                write!(f, "invalid date '{value}': expected a real calendar date as YYYY-MM-DD")
            }
            Self::DateOutOfRange { value } => {
                write!(f, "date '{value}' does not map to a local timestamp")
            }
            Self::InvalidRange { since, until } => {
                write!(f, "invalid range: since {since} is later than until {until}")
            }
        }
    }
}

impl std::error::Error for WindowError {}

/// Resolve a lookback-days count or explicit since/until dates into a
/// concrete window. An explicit `until` date means end-of-day; an explicit
/// `since` date means start-of-day; `since` otherwise defaults to exactly
/// `days` * 24h before `until`.
///
/// # Errors
/// `InvalidDate` when a supplied string is not a strict `YYYY-MM-DD`
/// calendar date, `DateOutOfRange` when a date has no local timestamp,
/// and `InvalidRange` when the resolved since is later than until.
pub fn resolve(
    days: u32,
    since: Option<&str>,
    until: Option<&str>,
    now: DateTime<Local>,
) -> Result<DateWindow, WindowError> {
    let until_instant = match until {
        Some(value) => end_of_day(parse_strict_date(value)?, value)?,
        None => now,
    };
    let since_instant = match since {
        Some(value) => start_of_day(parse_strict_date(value)?, value)?,
        None => until_instant - Duration::days(i64::from(days)),
    };

    let window = DateWindow {
        since: since_instant,
        until: until_instant,
        since_label: since_instant.date_naive(),
        until_label: until_instant.date_naive(),
    };
    if window.since > window.until {
        return Err(WindowError::InvalidRange {
            since: window.since_label,
            until: window.until_label,
        });
    }
    Ok(window)
}

// Strict calendar parse: chrono rejects impossible dates (2025-02-30),
// and the round-trip comparison rejects silently-tolerated forms such as
// unpadded months (2025-2-3).
fn parse_strict_date(value: &str) -> Result<NaiveDate, WindowError> {
    let parsed =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| WindowError::InvalidDate {
            value: value.to_string(),
        })?;
    if parsed.format("%Y-%m-%d").to_string() != value {
        return Err(WindowError::InvalidDate {
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

fn start_of_day(date: NaiveDate, value: &str) -> Result<DateTime<Local>, WindowError> {
    local_instant(date, 0, 0, 0, value)
}

fn end_of_day(date: NaiveDate, value: &str) -> Result<DateTime<Local>, WindowError> {
    local_instant(date, 23, 59, 59, value)
}

fn local_instant(
    date: NaiveDate,
    hour: u32,
    min: u32,
    sec: u32,
    value: &str,
) -> Result<DateTime<Local>, WindowError> {
    let Some(naive) = date.and_hms_opt(hour, min, sec) else {
        return Err(WindowError::DateOutOfRange {
            value: value.to_string(),
        });
    };
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt),
        LocalResult::None => Err(WindowError::DateOutOfRange {
            value: value.to_string(),
        }),
    }
}
