use crate::error::NormalizeError;
use crate::record::serialize_ymd;
use serde::Serialize;
use std::iter::FusedIterator;
use time::{Date, Month};

/// Number of months covered by the default window used when no dates are
/// available
pub const DEFAULT_WINDOW_MONTHS: u8 = 6;

/// An inclusive span of calendar days
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
// Invariant: start <= end
pub struct DateRange {
    #[serde(serialize_with = "serialize_ymd")]
    start: Date,
    #[serde(serialize_with = "serialize_ymd")]
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<DateRange, NormalizeError> {
        if start > end {
            Err(NormalizeError::EmptyRange { start, end })
        } else {
            Ok(DateRange { start, end })
        }
    }

    /// The range consisting of just `date`
    pub fn single(date: Date) -> DateRange {
        DateRange {
            start: date,
            end: date,
        }
    }

    /// The window of [`DEFAULT_WINDOW_MONTHS`] months ending on `today`
    pub fn trailing_months(today: Date) -> DateRange {
        DateRange {
            start: months_before(today, DEFAULT_WINDOW_MONTHS),
            end: today,
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of days in the range, counting both ends
    pub fn days(&self) -> usize {
        usize::try_from((self.end - self.start).whole_days())
            .map_or(1, |n| n.saturating_add(1))
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Zero-based position of `date` within the range
    pub fn offset_of(&self, date: Date) -> Option<usize> {
        if self.contains(date) {
            usize::try_from((date - self.start).whole_days()).ok()
        } else {
            None
        }
    }

    /// Expand the range as needed so that it contains `date`
    pub(crate) fn include(self, date: Date) -> DateRange {
        DateRange {
            start: self.start.min(date),
            end: self.end.max(date),
        }
    }

    pub fn iter(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
            remaining: self.days(),
        }
    }
}

impl IntoIterator for &DateRange {
    type Item = Date;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.iter()
    }
}

/// Iterator over the days of a [`DateRange`], in ascending order
#[derive(Clone, Debug)]
pub struct Days {
    next: Option<Date>,
    end: Date,
    remaining: usize,
}

impl Iterator for Days {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let d = self.next.filter(|&d| d <= self.end)?;
        self.next = if d == self.end { None } else { d.next_day() };
        self.remaining = self.remaining.saturating_sub(1);
        Some(d)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

/// Go back `months` calendar months from `date`, clamping the day of month to
/// the length of the month landed in (so that, e.g., six months before August
/// 31 is the last day of February)
pub(crate) fn months_before(date: Date, months: u8) -> Date {
    let mut year = date.year();
    let mut month = date.month();
    for _ in 0..months {
        month = month.previous();
        if month == Month::December {
            year -= 1;
        }
    }
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}
