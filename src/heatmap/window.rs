use super::LevelStyler;
use heatgrid::{ActivityRecord, GridLayout, NormalizedCalendar, WeekGridPosition, DAYS_IN_WEEK};
use std::num::NonZeroUsize;
use std::ops::Range;
use thiserror::Error;
use time::Weekday;

/// A normalized calendar plus the viewer's scroll position and selected day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GridWindow<S> {
    calendar: NormalizedCalendar,
    grid: GridLayout,
    // Index into `calendar` of the selected day
    selected: usize,
    // First visible week column; `None` until the first render
    first_week: Option<usize>,
    styler: S,
}

impl<S: LevelStyler> GridWindow<S> {
    pub(crate) fn new(calendar: NormalizedCalendar, first_day: Weekday, styler: S) -> Self {
        let grid = heatgrid::layout_from(&calendar, first_day);
        let selected = calendar.len().saturating_sub(1);
        GridWindow {
            calendar,
            grid,
            selected,
            first_week: None,
            styler,
        }
    }

    pub(super) fn styler(&self) -> &S {
        &self.styler
    }
}

impl<S> GridWindow<S> {
    pub(crate) fn calendar(&self) -> &NormalizedCalendar {
        &self.calendar
    }

    pub(crate) fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub(crate) fn selected(&self) -> Option<&ActivityRecord> {
        self.calendar.records().get(self.selected)
    }

    fn selected_position(&self) -> Option<WeekGridPosition> {
        self.grid.positions.get(self.selected).copied()
    }

    pub(super) fn is_selected(&self, index: usize) -> bool {
        index == self.selected
    }

    /// Index into the calendar of the day shown at the given grid cell, if
    /// any
    pub(super) fn index_at(&self, week: usize, day_of_week: u8) -> Option<usize> {
        let cell = week
            .checked_mul(usize::from(DAYS_IN_WEEK))?
            .checked_add(usize::from(day_of_week))?;
        let i = cell.checked_sub(usize::from(self.grid.leading_blanks()))?;
        (i < self.calendar.len()).then_some(i)
    }

    /// Returns the range of week columns to show in a viewport `week_qty`
    /// columns wide, scrolling as needed so that the selected day is visible.
    /// Initially the most recent weeks are shown.
    pub(super) fn ensure_weeks(&mut self, week_qty: NonZeroUsize) -> Range<usize> {
        let week_qty = week_qty.get();
        let total = self.grid.weeks;
        let latest = total.saturating_sub(week_qty);
        let mut first = self.first_week.unwrap_or(latest).min(latest);
        if let Some(pos) = self.selected_position() {
            if pos.week < first {
                first = pos.week;
            } else if pos.week >= first + week_qty {
                first = pos.week + 1 - week_qty;
            }
        }
        self.first_week = Some(first);
        first..(first + week_qty).min(total)
    }

    pub(crate) fn jump_to_latest(&mut self) {
        self.selected = self.calendar.len().saturating_sub(1);
        self.first_week = None;
    }

    pub(crate) fn one_day_forwards(&mut self) -> Result<(), OutOfRangeError> {
        self.move_to(self.selected.checked_add(1))
    }

    pub(crate) fn one_day_backwards(&mut self) -> Result<(), OutOfRangeError> {
        self.move_to(self.selected.checked_sub(1))
    }

    pub(crate) fn one_week_forwards(&mut self) -> Result<(), OutOfRangeError> {
        self.move_to(self.selected.checked_add(usize::from(DAYS_IN_WEEK)))
    }

    pub(crate) fn one_week_backwards(&mut self) -> Result<(), OutOfRangeError> {
        self.move_to(self.selected.checked_sub(usize::from(DAYS_IN_WEEK)))
    }

    fn move_to(&mut self, index: Option<usize>) -> Result<(), OutOfRangeError> {
        match index {
            Some(i) if i < self.calendar.len() => {
                self.selected = i;
                Ok(())
            }
            _ => Err(OutOfRangeError),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("moved outside of the calendar's date range")]
pub(crate) struct OutOfRangeError;

#[cfg(test)]
mod tests {
    use super::*;
    use heatgrid::{Level, Normalizer, RawRecord};
    use ratatui::style::Style;
    use time::macros::date;

    struct NullStyler;

    impl LevelStyler for NullStyler {
        fn level_style(&self, _level: Level) -> Style {
            Style::new()
        }
    }

    // 2025-03-05 (a Wednesday) through 2025-04-01 (a Tuesday): five columns
    fn window() -> GridWindow<NullStyler> {
        let calendar = Normalizer::new(date!(2025 - 04 - 01))
            .range(date!(2025 - 03 - 05), date!(2025 - 04 - 01))
            .normalize(vec![RawRecord::new("2025-03-31", 3)])
            .unwrap();
        GridWindow::new(calendar, Weekday::Sunday, NullStyler)
    }

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_starts_at_latest() {
        let mut w = window();
        assert_eq!(w.selected().map(|r| r.date), Some(date!(2025 - 04 - 01)));
        assert_eq!(w.ensure_weeks(nz(2)), 3..5);
        assert_eq!(w.ensure_weeks(nz(10)), 0..5);
    }

    #[test]
    fn test_index_at() {
        let w = window();
        assert_eq!(w.index_at(0, 2), None);
        assert_eq!(w.index_at(0, 3), Some(0));
        assert_eq!(w.index_at(1, 0), Some(4));
        assert_eq!(w.index_at(4, 2), Some(27));
        assert_eq!(w.index_at(4, 3), None);
    }

    #[test]
    fn test_move_selection() {
        let mut w = window();
        assert_eq!(w.one_day_forwards(), Err(OutOfRangeError));
        assert_eq!(w.one_week_forwards(), Err(OutOfRangeError));
        w.one_day_backwards().unwrap();
        assert_eq!(w.selected().map(|r| r.count), Some(3));
        w.one_week_backwards().unwrap();
        assert_eq!(w.selected().map(|r| r.date), Some(date!(2025 - 03 - 24)));
        w.one_week_backwards().unwrap();
        w.one_week_backwards().unwrap();
        assert_eq!(w.selected().map(|r| r.date), Some(date!(2025 - 03 - 10)));
        assert_eq!(w.one_week_backwards(), Err(OutOfRangeError));
        assert_eq!(w.selected().map(|r| r.date), Some(date!(2025 - 03 - 10)));
    }

    #[test]
    fn test_scrolls_to_selection() {
        let mut w = window();
        assert_eq!(w.ensure_weeks(nz(2)), 3..5);
        w.one_week_backwards().unwrap();
        assert_eq!(w.ensure_weeks(nz(2)), 3..5);
        w.one_week_backwards().unwrap();
        assert_eq!(w.ensure_weeks(nz(2)), 2..4);
        w.one_week_backwards().unwrap();
        assert_eq!(w.ensure_weeks(nz(2)), 1..3);
        for _ in 0..4 {
            w.one_day_backwards().unwrap();
        }
        assert_eq!(w.ensure_weeks(nz(2)), 0..2);
        w.one_week_forwards().unwrap();
        assert_eq!(w.ensure_weeks(nz(2)), 0..2);
        w.jump_to_latest();
        assert_eq!(w.ensure_weeks(nz(2)), 3..5);
    }
}
