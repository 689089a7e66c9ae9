use crate::normalize::NormalizedCalendar;
use serde::{Serialize, Serializer};
use time::{Date, Month, Weekday};

pub const DAYS_IN_WEEK: u8 = 7;

/// Column and row of a day within a week-aligned grid
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct WeekGridPosition {
    /// Zero-based column, counted from the week containing the first day of
    /// the calendar
    pub week: usize,
    /// Zero-based row, counted from the grid's first day of the week
    pub day_of_week: u8,
}

/// Marks the column in which a month first appears
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct MonthLabel {
    #[serde(serialize_with = "serialize_month")]
    pub month: Month,
    pub year: i32,
    pub first_week_index: usize,
}

/// Grid placement of every record of a [`NormalizedCalendar`]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GridLayout {
    /// One entry per calendar record, in the same order
    pub positions: Vec<WeekGridPosition>,
    /// One entry per (month, year) pair in the calendar, in chronological
    /// order
    pub month_labels: Vec<MonthLabel>,
    /// Total number of columns in the grid
    pub weeks: usize,
    #[serde(serialize_with = "serialize_weekday")]
    pub first_day: Weekday,
}

impl GridLayout {
    /// Number of leading grid cells before the calendar's first day
    pub fn leading_blanks(&self) -> u8 {
        self.positions.first().map_or(0, |p| p.day_of_week)
    }
}

/// Lay out a calendar with Sunday as the first row of every week
pub fn layout(calendar: &NormalizedCalendar) -> GridLayout {
    layout_from(calendar, Weekday::Sunday)
}

/// Lay out a calendar with `first_day` as the first row of every week.
///
/// Each day's row is taken from its actual weekday, so a calendar that does
/// not start on `first_day` begins with a partial week.
pub fn layout_from(calendar: &NormalizedCalendar, first_day: Weekday) -> GridLayout {
    let leading = usize::from(day_of_week(calendar.range().start(), first_day));
    let mut positions = Vec::with_capacity(calendar.len());
    let mut month_labels: Vec<MonthLabel> = Vec::new();
    for (offset, rec) in calendar.iter().enumerate() {
        let week = (offset + leading) / usize::from(DAYS_IN_WEEK);
        positions.push(WeekGridPosition {
            week,
            day_of_week: day_of_week(rec.date, first_day),
        });
        let (year, month) = (rec.date.year(), rec.date.month());
        if month_labels
            .last()
            .map_or(true, |ml| (ml.year, ml.month) != (year, month))
        {
            month_labels.push(MonthLabel {
                month,
                year,
                first_week_index: week,
            });
        }
    }
    let weeks = positions.last().map_or(0, |p| p.week + 1);
    GridLayout {
        positions,
        month_labels,
        weeks,
        first_day,
    }
}

/// Row of `date` in a grid whose weeks begin on `first_day`
pub fn day_of_week(date: Date, first_day: Weekday) -> u8 {
    let wd = date.weekday().number_days_from_monday();
    let first = first_day.number_days_from_monday();
    (wd + DAYS_IN_WEEK - first) % DAYS_IN_WEEK
}

fn serialize_month<S: Serializer>(month: &Month, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*month))
}

fn serialize_weekday<S: Serializer>(wd: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(wd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use time::{macros::date, Duration};

    fn empty_calendar(start: Date, end: Date) -> NormalizedCalendar {
        Normalizer::new(end)
            .range(start, end)
            .normalize(Vec::new())
            .unwrap()
    }

    #[test]
    fn test_day_of_week() {
        // 2023-11-12 was a Sunday
        assert_eq!(day_of_week(date!(2023 - 11 - 12), Weekday::Sunday), 0);
        assert_eq!(day_of_week(date!(2023 - 11 - 15), Weekday::Sunday), 3);
        assert_eq!(day_of_week(date!(2023 - 11 - 18), Weekday::Sunday), 6);
        assert_eq!(day_of_week(date!(2023 - 11 - 12), Weekday::Monday), 6);
        assert_eq!(day_of_week(date!(2023 - 11 - 13), Weekday::Monday), 0);
    }

    #[test]
    fn test_starts_on_wednesday() {
        // 2025-03-05 was a Wednesday
        let cal = empty_calendar(date!(2025 - 03 - 05), date!(2025 - 03 - 20));
        let grid = layout(&cal);
        assert_eq!(
            grid.positions[0],
            WeekGridPosition {
                week: 0,
                day_of_week: 3
            }
        );
        assert_eq!(grid.leading_blanks(), 3);
        // Saturday closes out the partial first week
        assert_eq!(
            grid.positions[3],
            WeekGridPosition {
                week: 0,
                day_of_week: 6
            }
        );
        assert_eq!(
            grid.positions[4],
            WeekGridPosition {
                week: 1,
                day_of_week: 0
            }
        );
        // Thursday 2025-03-20
        assert_eq!(
            grid.positions.last(),
            Some(&WeekGridPosition {
                week: 2,
                day_of_week: 4
            })
        );
        assert_eq!(grid.weeks, 3);
    }

    #[test]
    fn test_positions_follow_weekdays() {
        let cal = empty_calendar(date!(2024 - 12 - 27), date!(2025 - 02 - 14));
        for first_day in [Weekday::Sunday, Weekday::Monday] {
            let grid = layout_from(&cal, first_day);
            assert_eq!(grid.positions.len(), cal.len());
            for (rec, pos) in std::iter::zip(&cal, &grid.positions) {
                assert_eq!(pos.day_of_week, day_of_week(rec.date, first_day));
            }
            for pair in grid.positions.windows(2) {
                if pair[1].day_of_week == 0 {
                    assert_eq!(pair[1].week, pair[0].week + 1);
                } else {
                    assert_eq!(pair[1].week, pair[0].week);
                    assert_eq!(pair[1].day_of_week, pair[0].day_of_week + 1);
                }
            }
        }
    }

    #[test]
    fn test_monday_first() {
        // 2025-03-02 was a Sunday
        let cal = empty_calendar(date!(2025 - 03 - 02), date!(2025 - 03 - 03));
        let grid = layout_from(&cal, Weekday::Monday);
        assert_eq!(
            grid.positions,
            [
                WeekGridPosition {
                    week: 0,
                    day_of_week: 6
                },
                WeekGridPosition {
                    week: 1,
                    day_of_week: 0
                },
            ]
        );
        assert_eq!(grid.weeks, 2);
    }

    #[test]
    fn test_month_labels() {
        let cal = empty_calendar(date!(2025 - 02 - 20), date!(2025 - 03 - 05));
        let grid = layout(&cal);
        // 2025-02-20 was a Thursday; March 1 ends the second column
        assert_eq!(
            grid.month_labels,
            [
                MonthLabel {
                    month: Month::February,
                    year: 2025,
                    first_week_index: 0
                },
                MonthLabel {
                    month: Month::March,
                    year: 2025,
                    first_week_index: 1
                },
            ]
        );
    }

    #[test]
    fn test_month_labels_across_years() {
        let cal = empty_calendar(date!(2024 - 11 - 30), date!(2025 - 01 - 01));
        let grid = layout(&cal);
        let labels = grid
            .month_labels
            .iter()
            .map(|ml| (ml.year, ml.month))
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            [
                (2024, Month::November),
                (2024, Month::December),
                (2025, Month::January),
            ]
        );
    }

    #[test]
    fn test_same_month_different_years() {
        let cal = empty_calendar(date!(2024 - 03 - 31), date!(2025 - 03 - 01));
        let grid = layout(&cal);
        assert_eq!(grid.month_labels.len(), 13);
        assert_eq!(grid.month_labels[0].year, 2024);
        assert_eq!(grid.month_labels[12].month, Month::March);
        assert_eq!(grid.month_labels[12].year, 2025);
        let mut weeks = grid.month_labels.iter().map(|ml| ml.first_week_index);
        let mut prev = weeks.next().unwrap();
        for w in weeks {
            assert!(w >= prev, "month labels out of order");
            prev = w;
        }
    }

    #[test]
    fn test_single_day() {
        let cal = empty_calendar(date!(2025 - 03 - 08), date!(2025 - 03 - 08));
        let grid = layout(&cal);
        assert_eq!(grid.weeks, 1);
        assert_eq!(grid.positions[0].day_of_week, 6);
        assert_eq!(grid.month_labels.len(), 1);
    }

    #[test]
    fn test_calendar_starting_at_earliest_date() {
        let end = Date::MIN.checked_add(Duration::days(13)).unwrap();
        let cal = empty_calendar(Date::MIN, end);
        let grid = layout(&cal);
        let leading = grid.leading_blanks();
        assert_eq!(leading, day_of_week(Date::MIN, Weekday::Sunday));
        assert_eq!(grid.positions[0].week, 0);
        let mut week = 0;
        for pair in grid.positions.windows(2) {
            if pair[1].day_of_week == 0 {
                week += 1;
            }
            assert_eq!(pair[1].week, week);
            assert_eq!(pair[1].day_of_week, (pair[0].day_of_week + 1) % DAYS_IN_WEEK);
        }
        assert_eq!(grid.weeks, week + 1);
    }

    #[test]
    fn test_serialize() {
        let cal = empty_calendar(date!(2025 - 03 - 01), date!(2025 - 03 - 01));
        let value = serde_json::to_value(layout(&cal)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "positions": [{"week": 0, "day_of_week": 6}],
                "month_labels": [{"month": 3, "year": 2025, "first_week_index": 0}],
                "weeks": 1,
                "first_day": "Sunday",
            })
        );
    }
}
