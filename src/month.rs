// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar-month keys (`YYYY-MM`).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month '{input}', expected YYYY-MM")]
pub struct MonthParseError {
    pub input: String,
}

/// A calendar month. Ordering is chronological, which is also the
/// lexicographic order of the zero-padded `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

// Keys a user can write. Arithmetic may step one year past either end, so
// every trailing window of up to 12 months stays distinct and contiguous.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;
const MIN_INDEX_YEAR: i32 = MIN_YEAR - 1;
const MAX_INDEX_YEAR: i32 = MAX_YEAR + 1;

impl MonthKey {
    pub const EPOCH: MonthKey = MonthKey {
        year: 1970,
        month: 1,
    };

    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(MIN_YEAR, MAX_YEAR),
            month: date.month(),
        }
    }

    /// Parses `YYYY-MM` (or a full `YYYY-MM-DD` date), falling back to
    /// [`MonthKey::EPOCH`] for anything unparsable.
    pub fn parse_or_epoch(raw: &str) -> Self {
        if let Ok(month) = raw.parse::<MonthKey>() {
            return month;
        }
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Self::from_date)
            .unwrap_or(Self::EPOCH)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    fn from_index(idx: i64) -> Self {
        let lo = i64::from(MIN_INDEX_YEAR) * 12;
        let hi = i64::from(MAX_INDEX_YEAR) * 12 + 11;
        let idx = idx.clamp(lo, hi);
        Self {
            year: idx.div_euclid(12) as i32,
            month: idx.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shifts by `delta` calendar months (negative moves backwards).
    pub fn add_months(self, delta: i32) -> Self {
        Self::from_index(self.index() + i64::from(delta))
    }

    pub fn next(self) -> Self {
        self.add_months(1)
    }

    pub fn prev(self) -> Self {
        self.add_months(-1)
    }

    /// Number of months from `self` to `other` (positive when `other` is later).
    pub fn months_until(self, other: MonthKey) -> i64 {
        other.index() - self.index()
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or_default()
    }

    /// The given day of this month, clamped to the month's length.
    pub fn day_clamped(&self, day: u32) -> NaiveDate {
        let last = self.last_day().day();
        NaiveDate::from_ymd_opt(self.year, self.month, day.clamp(1, last)).unwrap_or_default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        MonthKey::from_date(date) == *self
    }
}

impl Default for MonthKey {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthParseError {
            input: s.to_string(),
        };
        let raw = s.trim();
        let (y, m) = raw.split_once('-').ok_or_else(err)?;
        if y.len() != 4 || m.len() != 2 || !y.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        MonthKey::new(year, month).ok_or_else(err)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}
