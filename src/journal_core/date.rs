//! Calendar dates as the store understands them.
//!
//! The arithmetic here is deliberately simple: February always has 28 days
//! and moving forward by more than a year is approximated in whole 365-day
//! years. Moving backwards borrows the length of the month being entered and
//! is exact for non-leap years.

use crate::constants::{DAYS_PER_YEAR, MONTHS_PER_YEAR, MONTH_DAYS};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A full (year, month, day) date.
///
/// Ordering is lexicographic on year, then month, then day.
///
/// # Examples
///
/// ```
/// use moo::journal_core::Date;
///
/// let last_of_january = Date::new(2023, 1, 31);
/// assert_eq!(last_of_january.add_days(1), Date::new(2023, 2, 1));
/// assert!(last_of_january < Date::new(2023, 2, 1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

/// Number of days in `month`. Out-of-range months wrap onto the table.
fn month_length(month: i32) -> i32 {
    MONTH_DAYS[(month - 1).rem_euclid(MONTHS_PER_YEAR) as usize]
}

impl Date {
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Date { year, month, day }
    }

    /// Shifts the date by a signed number of days.
    ///
    /// Forward shifts add `days % 365` to the day and carry into following
    /// months, wrapping December into January without touching the year;
    /// `days / 365` whole years are added afterwards. Backward shifts walk
    /// month by month and roll the year over when January is left.
    pub fn add_days(self, days: i32) -> Date {
        let mut shifted = self;

        if days > 0 {
            shifted.day += days % DAYS_PER_YEAR;
            while shifted.day > month_length(shifted.month) {
                shifted.day -= month_length(shifted.month);
                shifted.month = shifted.month % MONTHS_PER_YEAR + 1;
            }
            shifted.year += days / DAYS_PER_YEAR;
        } else {
            shifted.day += days;
            while shifted.day < 1 {
                shifted.month -= 1;
                if shifted.month < 1 {
                    shifted.year -= 1;
                    shifted.month = MONTHS_PER_YEAR;
                }
                shifted.day += month_length(shifted.month);
            }
        }

        shifted
    }

    /// Strict lexicographic comparison on (year, month, day).
    pub fn less_than(&self, other: &Date) -> bool {
        self < other
    }

    /// Whether `self` lies in `[low, high]`.
    ///
    /// Month and day are only compared in the boundary years; any date in a
    /// year strictly between them is inside. `low` must not be after `high`.
    pub fn within(&self, low: &Date, high: &Date) -> bool {
        if self.year == low.year && (self.month, self.day) < (low.month, low.day) {
            return false;
        }
        if self.year == high.year && (self.month, self.day) > (high.month, high.day) {
            return false;
        }
        low.year <= self.year && self.year <= high.year
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date::new(date.year(), date.month() as i32, date.day() as i32)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A query key: a year, optionally narrowed to a month and then a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PartialDate {
    pub fn year(year: i32) -> Self {
        PartialDate {
            year,
            month: None,
            day: None,
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        PartialDate {
            year,
            month: Some(month),
            day: None,
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        PartialDate {
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    /// The full date, if month and day are both set.
    pub fn to_full(&self) -> Option<Date> {
        match (self.month, self.day) {
            (Some(month), Some(day)) => Some(Date::new(self.year, month as i32, day as i32)),
            _ => None,
        }
    }

    /// Shifts a full date by `days`. Partial dates can only be shifted by zero.
    pub fn add_days(self, days: i32) -> Option<PartialDate> {
        if days == 0 {
            return Some(self);
        }
        self.to_full().map(|date| date.add_days(days).into())
    }
}

impl From<Date> for PartialDate {
    fn from(date: Date) -> Self {
        PartialDate::day(date.year, date.month as u32, date.day as u32)
    }
}

impl From<NaiveDate> for PartialDate {
    fn from(date: NaiveDate) -> Self {
        Date::from(date).into()
    }
}

/// A normalized `[low, high]` window for range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub low: Date,
    pub high: Date,
}

impl DateWindow {
    /// The window between `search` and `search` shifted by `range` days,
    /// whichever direction that is.
    ///
    /// # Examples
    ///
    /// ```
    /// use moo::journal_core::{Date, DateWindow};
    ///
    /// let window = DateWindow::around(Date::new(2023, 3, 3), -7);
    /// assert_eq!(window.low, Date::new(2023, 2, 24));
    /// assert_eq!(window.high, Date::new(2023, 3, 3));
    /// ```
    pub fn around(search: Date, range: i32) -> Self {
        let end = search.add_days(range);
        if end.less_than(&search) {
            DateWindow {
                low: end,
                high: search,
            }
        } else {
            DateWindow {
                low: search,
                high: end,
            }
        }
    }

    pub fn contains(&self, date: &Date) -> bool {
        date.within(&self.low, &self.high)
    }
}
