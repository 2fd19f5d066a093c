//! Aggregation timespans and request date windows

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregation granularity of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Timespan {
    /// Name used in aggregate requests and printed as the panel's unit label
    pub fn as_str(&self) -> &'static str {
        match self {
            Timespan::Minute => "minute",
            Timespan::Hour => "hour",
            Timespan::Day => "day",
            Timespan::Week => "week",
            Timespan::Month => "month",
            Timespan::Quarter => "quarter",
            Timespan::Year => "year",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" => Ok(Timespan::Minute),
            "hour" => Ok(Timespan::Hour),
            "day" => Ok(Timespan::Day),
            "week" => Ok(Timespan::Week),
            "month" => Ok(Timespan::Month),
            "quarter" => Ok(Timespan::Quarter),
            "year" => Ok(Timespan::Year),
            other => Err(format!("unknown timespan: {}", other)),
        }
    }
}

/// Inclusive calendar window for an aggregates request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// `YYYY-MM-DD` start date
    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// `YYYY-MM-DD` end date
    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_str(), self.end_str())
    }
}

/// Window ending on `current_date` and reaching back `count` timespans.
///
/// Intraday spans round up to whole days. Calendar-month spans clamp to the
/// end of a shorter month.
pub fn compute_window(current_date: NaiveDate, timespan: Timespan, count: u32) -> DateWindow {
    let start = if count == 0 {
        current_date
    } else {
        match timespan {
            Timespan::Minute => back_days(current_date, u64::from(count).div_ceil(24 * 60)),
            Timespan::Hour => back_days(current_date, u64::from(count).div_ceil(24)),
            Timespan::Day => back_days(current_date, u64::from(count)),
            Timespan::Week => back_days(current_date, u64::from(count) * 7),
            Timespan::Month => back_months(current_date, count),
            Timespan::Quarter => back_months(current_date, count.saturating_mul(3)),
            Timespan::Year => back_months(current_date, count.saturating_mul(12)),
        }
    };

    DateWindow {
        start,
        end: current_date,
    }
}

fn back_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

fn back_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
