use crate::error::NormalizeError;
use crate::level::{Level, LevelScale};
use crate::range::DateRange;
use crate::record::{ActivityRecord, RawRecord};
use serde::Serialize;
use std::collections::HashMap;
use time::{Date, OffsetDateTime};

/// A gap-free, ascending, one-record-per-day activity calendar
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
// Invariants: `records.len() == range.days()`; `records[i].date` is
// `range.start() + i days`
pub struct NormalizedCalendar {
    range: DateRange,
    records: Vec<ActivityRecord>,
}

impl NormalizedCalendar {
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; a calendar covers at least one day
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityRecord> {
        self.records.iter()
    }

    /// Look up the record for `date` in constant time
    pub fn get(&self, date: Date) -> Option<&ActivityRecord> {
        self.range
            .offset_of(date)
            .and_then(|i| self.records.get(i))
    }

    pub fn first(&self) -> Option<&ActivityRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&ActivityRecord> {
        self.records.last()
    }

    pub fn total_count(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.count))
    }

    pub fn max_count(&self) -> u64 {
        self.records.iter().map(|r| r.count).max().unwrap_or(0)
    }

    /// Number of days with a nonzero count
    pub fn active_days(&self) -> usize {
        self.records.iter().filter(|r| r.is_active()).count()
    }
}

impl<'a> IntoIterator for &'a NormalizedCalendar {
    type Item = &'a ActivityRecord;
    type IntoIter = std::slice::Iter<'a, ActivityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Configurable conversion of sparse activity feeds into a
/// [`NormalizedCalendar`]
///
/// ```
/// use heatgrid::{Normalizer, RawRecord};
/// use time::macros::date;
///
/// let calendar = Normalizer::new(date!(2025 - 03 - 10))
///     .range(date!(2025 - 03 - 01), date!(2025 - 03 - 07))
///     .normalize(vec![RawRecord::new("2025-03-03", 5)])
///     .unwrap();
/// assert_eq!(calendar.len(), 7);
/// assert_eq!(calendar.get(date!(2025 - 03 - 03)).unwrap().count, 5);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Normalizer {
    today: Date,
    range: Option<(Date, Date)>,
    scale: LevelScale,
    strict_counts: bool,
    overrides: Vec<RawRecord>,
}

impl Normalizer {
    /// Create a normalizer that uses `today` as the end of its default window
    pub fn new(today: Date) -> Normalizer {
        Normalizer {
            today,
            range: None,
            scale: LevelScale::default(),
            strict_counts: false,
            overrides: Vec::new(),
        }
    }

    /// Cover exactly the days from `start` through `end` instead of deriving
    /// the range from the input.  Records outside the range are dropped.
    pub fn range(mut self, start: Date, end: Date) -> Normalizer {
        self.range = Some((start, end));
        self
    }

    pub fn scale(mut self, scale: LevelScale) -> Normalizer {
        self.scale = scale;
        self
    }

    /// When enabled, a negative count is an error rather than being treated
    /// as zero
    pub fn strict_counts(mut self, strict: bool) -> Normalizer {
        self.strict_counts = strict;
        self
    }

    /// Records applied after the main input, so that they take precedence
    /// over any input record for the same date
    pub fn overrides<I: IntoIterator<Item = RawRecord>>(mut self, overrides: I) -> Normalizer {
        self.overrides = overrides.into_iter().collect();
        self
    }

    pub fn normalize<I>(&self, records: I) -> Result<NormalizedCalendar, NormalizeError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let explicit = match self.range {
            Some((start, end)) => Some(DateRange::new(start, end)?),
            None => None,
        };
        let mut by_date = HashMap::new();
        let mut seen: Option<DateRange> = None;
        for raw in records.into_iter().chain(self.overrides.iter().cloned()) {
            let rec = self.resolve(raw)?;
            seen = Some(match seen {
                Some(r) => r.include(rec.date),
                None => DateRange::single(rec.date),
            });
            // Later records replace earlier ones for the same day.
            by_date.insert(rec.date, rec);
        }
        let range = explicit
            .or(seen)
            .unwrap_or_else(|| DateRange::trailing_months(self.today));
        let records = range
            .iter()
            .map(|date| {
                by_date
                    .remove(&date)
                    .unwrap_or_else(|| ActivityRecord::empty(date))
            })
            .collect::<Vec<_>>();
        Ok(NormalizedCalendar { range, records })
    }

    fn resolve(&self, raw: RawRecord) -> Result<ActivityRecord, NormalizeError> {
        let date = raw.date.parse()?;
        let count = match raw.count.unwrap_or(0) {
            n if n < 0 && self.strict_counts => {
                return Err(NormalizeError::InvalidCount { date, count: n })
            }
            n => u64::try_from(n).unwrap_or(0),
        };
        let level = match raw.level {
            Some(lv) => Level::clamped(lv),
            None => self.scale.level_for(count),
        };
        Ok(ActivityRecord { date, count, level })
    }
}

/// Normalize `records` with default settings, taking today's date from the
/// system clock for the fallback window
pub fn normalize<I>(records: I, range: Option<DateRange>) -> Result<NormalizedCalendar, NormalizeError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut normalizer = Normalizer::new(today());
    if let Some(r) = range {
        normalizer = normalizer.range(r.start(), r.end());
    }
    normalizer.normalize(records)
}

/// Today's date in the local timezone, falling back to UTC when the local
/// offset cannot be determined
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
