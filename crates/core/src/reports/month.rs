//! Calendar-month bucketing of named event streams.
//!
//! Buckets are keyed by calendar month; a window that cuts a month in half
//! still produces a whole-month bucket for the part inside it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use sitebook_shared::types::Money;

use crate::ledger::{DateWindow, DatedAmount};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, rendered as `YYYY-MM`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key; `month` must be in `1..=12`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1 to 12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The month `count` months earlier.
    #[must_use]
    pub fn months_back(self, count: u32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 - i64::from(count);
        Self {
            year: i32::try_from(index.div_euclid(12)).unwrap_or(i32::MIN),
            month: u32::try_from(index.rem_euclid(12) + 1).unwrap_or(1),
        }
    }

    /// First day of the month, if representable.
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Chart label such as `Jan 2025`.
    #[must_use]
    pub fn label(self) -> String {
        let index = usize::try_from(self.month - 1).unwrap_or(0);
        format!("{} {}", MONTH_ABBREVIATIONS[index], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month: {s}"))?;
        let year: i32 = year.parse().map_err(|_| format!("Invalid month: {s}"))?;
        let month: u32 = month.parse().map_err(|_| format!("Invalid month: {s}"))?;
        Self::new(year, month).ok_or_else(|| format!("Invalid month: {s}"))
    }
}

/// Totals for one month across every registered stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Month key.
    pub month: MonthKey,
    /// One value per stream name; streams absent this month are zero.
    pub values: BTreeMap<String, Money>,
}

impl MonthBucket {
    /// Value for `stream`, zero if the stream is unknown.
    #[must_use]
    pub fn value(&self, stream: &str) -> Money {
        self.values.get(stream).copied().unwrap_or_default()
    }

    /// Sum across all streams.
    #[must_use]
    pub fn total(&self) -> Money {
        self.values.values().sum()
    }
}

/// Order in which buckets are handed to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthOrder {
    /// Oldest first, for statements and trend charts.
    Ascending,
    /// Newest first, for "recent N months" summaries.
    Descending,
}

/// Groups named streams of dated amounts into calendar-month totals.
#[derive(Debug, Clone)]
pub struct MonthlyAggregator {
    window: DateWindow,
    streams: Vec<String>,
    totals: BTreeMap<MonthKey, BTreeMap<String, Money>>,
}

impl MonthlyAggregator {
    /// Creates an aggregator that ignores events outside `window`.
    #[must_use]
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            streams: Vec::new(),
            totals: BTreeMap::new(),
        }
    }

    /// Adds a named stream. Adding the same name twice merges the events.
    #[must_use]
    pub fn add_stream<E: DatedAmount>(mut self, name: impl Into<String>, events: &[E]) -> Self {
        let name = name.into();
        for event in events.iter().filter(|event| self.window.contains(event.date())) {
            *self
                .totals
                .entry(MonthKey::of(event.date()))
                .or_default()
                .entry(name.clone())
                .or_default() += event.amount();
        }
        if !self.streams.contains(&name) {
            self.streams.push(name);
        }
        self
    }

    /// Completes aggregation. The result has no order by contract.
    #[must_use]
    pub fn finish(self) -> MonthBuckets {
        let streams = self.streams;
        let buckets = self
            .totals
            .into_iter()
            .map(|(month, mut values)| {
                for stream in &streams {
                    values.entry(stream.clone()).or_default();
                }
                (month, MonthBucket { month, values })
            })
            .collect();
        MonthBuckets { buckets }
    }

    /// Shorthand for `finish().sorted(order, limit)`.
    #[must_use]
    pub fn bucket(self, order: MonthOrder, limit: Option<usize>) -> Vec<MonthBucket> {
        self.finish().sorted(order, limit)
    }
}

/// Aggregated months; callers pick the order explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthBuckets {
    buckets: BTreeMap<MonthKey, MonthBucket>,
}

impl MonthBuckets {
    /// Number of months with at least one event.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if no stream had events in the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket for `month`, if any stream had events in it.
    #[must_use]
    pub fn get(&self, month: MonthKey) -> Option<&MonthBucket> {
        self.buckets.get(&month)
    }

    /// Sum of `stream` across every month.
    #[must_use]
    pub fn stream_total(&self, stream: &str) -> Money {
        self.buckets.values().map(|bucket| bucket.value(stream)).sum()
    }

    /// Buckets in `order`; `limit` is applied after ordering, so a descending
    /// order with a limit keeps the most recent months.
    #[must_use]
    pub fn sorted(self, order: MonthOrder, limit: Option<usize>) -> Vec<MonthBucket> {
        let take = limit.unwrap_or(usize::MAX);
        match order {
            MonthOrder::Ascending => self.buckets.into_values().take(take).collect(),
            MonthOrder::Descending => self.buckets.into_values().rev().take(take).collect(),
        }
    }
}
