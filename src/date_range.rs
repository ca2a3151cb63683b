//! Inclusive calendar date ranges and weekday arithmetic.
//!
//! A [`DateRange`] is validated once at construction (`start <= end`) and
//! immutable afterwards, so every downstream computation can assume a
//! well-formed range.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{CalgridError, Result};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range covering `start..=end`.
    ///
    /// # Errors
    /// Returns [`CalgridError::InvalidRange`] if `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(CalgridError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a whole calendar year (Jan 1 through Dec 31).
    ///
    /// # Errors
    /// Returns [`CalgridError::Config`] if the year is outside chrono's
    /// representable range.
    pub fn full_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| CalgridError::Config(format!("year {year} out of range")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| CalgridError::Config(format!("year {year} out of range")))?;
        Self::new(start, end)
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range. Always at least 1.
    pub fn num_days(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }

    /// True if the range crosses at least one December 31 -> January 1
    /// boundary.
    pub fn spans_year_boundary(&self) -> bool {
        self.start.year() != self.end.year()
    }

    /// The January 1 dates strictly inside the range, in order. Empty for
    /// single-year ranges.
    pub fn year_transitions(&self) -> Vec<NaiveDate> {
        (self.start.year() + 1..=self.end.year())
            .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .filter(|day| *day > self.start && *day <= self.end)
            .collect()
    }

    /// Iterate over every day in the range, in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .take_while(move |day| *day <= self.end)
    }

    /// True if `day` falls inside the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// The day `offset` days after the range start, if still in range.
    pub fn day_at(&self, offset: usize) -> Option<NaiveDate> {
        let day = self.start.checked_add_days(Days::new(offset as u64))?;
        self.contains(day).then_some(day)
    }
}

/// Number of grid cells between a row's nominal start weekday and the
/// actual weekday of `date`. Always in `0..7`.
pub fn weekday_offset(date: NaiveDate, week_start: Weekday) -> usize {
    let from_monday = date.weekday().num_days_from_monday();
    let anchor = week_start.num_days_from_monday();
    ((from_monday + 7 - anchor) % 7) as usize
}

/// True for ISO weekdays 6 and 7 (Saturday, Sunday).
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
