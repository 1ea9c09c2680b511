// Reporting window selector and the calendar stepping used by the chart
// series. The week and month windows bucket by day, the year window by
// month; the walk is literal calendar stepping from the window start, so
// the number of buckets follows the calendar rather than a fixed count.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard reporting window: the last 7 days, 1 month or 1 year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Inclusive window start, counted back from `now`
    pub fn start_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Period::Week => now - Duration::days(7),
            Period::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(now - Duration::days(30)),
            Period::Year => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(now - Duration::days(365)),
        }
    }

    /// Chart granularity for this window
    pub fn bucket(&self) -> TimeBucket {
        match self {
            Period::Week | Period::Month => TimeBucket::Day,
            Period::Year => TimeBucket::Month,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
            Period::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

/// Calendar unit of one chart point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Day,
    Month,
}

impl TimeBucket {
    /// Stable sort/lookup key: `YYYY-MM-DD` for days, `YYYY-MM` for months
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            TimeBucket::Day => date.format("%Y-%m-%d").to_string(),
            TimeBucket::Month => date.format("%Y-%m").to_string(),
        }
    }

    /// Short human label for the chart axis: "Jan 5" for days, "Jan" for
    /// months
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            TimeBucket::Day => date.format("%b %-d").to_string(),
            TimeBucket::Month => date.format("%b").to_string(),
        }
    }

    /// Next step of the calendar walk. Month stepping clamps to the last
    /// day of shorter months and is kept that way deliberately.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeBucket::Day => date.succ_opt(),
            TimeBucket::Month => date.checked_add_months(Months::new(1)),
        }
    }
}
