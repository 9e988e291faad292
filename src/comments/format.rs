//! Display formatting for dates, runtimes and ratings.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const NOT_AVAILABLE: &str = "N/A";

/// Long French date, e.g. `1 décembre 2025`.
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// [`format_date`] for a timestamp.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    format_date(at.date_naive())
}

/// [`format_date`] for a catalog date string (`YYYY-MM-DD` or RFC 3339);
/// `N/A` when missing or unparseable.
pub fn format_release_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|d| d.date_naive())
        })
        .map(format_date)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Runtime as `Xh Ymin`; `N/A` when unknown or zero.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}min", m / 60, m % 60),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Average vote with one decimal, e.g. `7.5/10`.
pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) => format!("{v:.1}/10"),
        None => NOT_AVAILABLE.to_string(),
    }
}
