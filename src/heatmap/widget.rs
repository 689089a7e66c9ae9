use super::window::GridWindow;
use super::LevelStyler;
use crate::theme::{CAPTION_STYLE, MONTH_STYLE, NOTICE_STYLE, TOTALS_STYLE, WEEKDAY_STYLE};
use heatgrid::describe::{range_caption, tooltip, DEFAULT_UNIT};
use heatgrid::{Level, MonthLabel, DAYS_IN_WEEK};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Text,
    widgets::{Paragraph, StatefulWidget, Widget},
};
use std::iter::zip;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::ops::Range;
use time::{Month, Weekday};

/// Shown in place of a tooltip when the calendar has no activity at all
pub(crate) const EMPTY_MESSAGE: &str = "No activity recorded yet";

/// Number of columns on the left side of the grid, used as the margin in
/// which weekday names are written
const LEFT_MARGIN: u16 = 4;

/// Number of columns per week
const CELL_WIDTH: u16 = 2;

const CAPTION_LINE: u16 = 0;
const MONTH_LINE: u16 = 1;
const GRID_TOP: u16 = 2;
const STATUS_LINE: u16 = GRID_TOP + DAYS_IN_WEEK as u16 + 1;
const LEGEND_LINE: u16 = STATUS_LINE + 1;
const TOTALS_LINE: u16 = LEGEND_LINE + 1;

const CELL: &str = "■";
const SELECTED_CELL: &str = "▣";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Heatmap<S> {
    _data: PhantomData<S>,
}

impl<S> Heatmap<S> {
    pub(crate) fn new() -> Heatmap<S> {
        Heatmap { _data: PhantomData }
    }

    fn weeks_for_columns(columns: u16) -> NonZeroUsize {
        NonZeroUsize::new(usize::from(columns.saturating_sub(LEFT_MARGIN) / CELL_WIDTH))
            .unwrap_or(NonZeroUsize::MIN)
    }
}

impl<S: LevelStyler> StatefulWidget for Heatmap<S> {
    type State = GridWindow<S>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let weeks = state.ensure_weeks(Self::weeks_for_columns(area.width));
        let mut canvas = BufferCanvas::new(area, buf);
        let calendar = state.calendar();
        let grid = state.grid();
        canvas.draw_caption(&range_caption(&calendar.range()));
        canvas.draw_month_labels(&grid.month_labels, weeks.clone());
        canvas.draw_weekday_labels(grid.first_day);
        for (col, week) in zip(0u16.., weeks) {
            for row in 0..DAYS_IN_WEEK {
                let Some(i) = state.index_at(week, row) else {
                    continue;
                };
                if let Some(rec) = calendar.records().get(i) {
                    let style = state.styler().level_style(rec.level);
                    canvas.draw_cell(col, row, state.is_selected(i), style);
                }
            }
        }
        if calendar.total_count() == 0 {
            canvas.mvprint(STATUS_LINE, 0, EMPTY_MESSAGE, NOTICE_STYLE);
        } else if let Some(rec) = state.selected() {
            canvas.mvprint(STATUS_LINE, 0, tooltip(rec, DEFAULT_UNIT), TOTALS_STYLE);
        }
        canvas.draw_legend(state.styler());
        canvas.mvprint(
            TOTALS_LINE,
            0,
            format!(
                "{} {DEFAULT_UNIT} in {} days, {} active",
                calendar.total_count(),
                calendar.len(),
                calendar.active_days()
            ),
            TOTALS_STYLE,
        );
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_caption(&mut self, caption: &str) {
        self.mvprint(CAPTION_LINE, 0, caption, CAPTION_STYLE);
    }

    // Labels that would overlap the previous one are skipped, as are labels
    // for months that begin in a column scrolled out of view.
    fn draw_month_labels(&mut self, labels: &[MonthLabel], weeks: Range<usize>) {
        let mut next_free = LEFT_MARGIN;
        for ml in labels {
            let Some(col) = ml
                .first_week_index
                .checked_sub(weeks.start)
                .filter(|_| weeks.contains(&ml.first_week_index))
                .and_then(|c| u16::try_from(c).ok())
            else {
                continue;
            };
            let x = LEFT_MARGIN.saturating_add(col.saturating_mul(CELL_WIDTH));
            if x < next_free {
                continue;
            }
            let name = month_abbr(ml.month);
            self.mvprint(MONTH_LINE, x, &name, MONTH_STYLE);
            next_free = x.saturating_add(u16::try_from(name.len()).unwrap_or(u16::MAX) + 1);
        }
    }

    // Label every other row, starting with the second
    fn draw_weekday_labels(&mut self, first_day: Weekday) {
        for row in (1..DAYS_IN_WEEK).step_by(2) {
            self.mvprint(
                GRID_TOP + u16::from(row),
                0,
                weekday_abbr(first_day.nth_next(row)),
                WEEKDAY_STYLE,
            );
        }
    }

    fn draw_cell(&mut self, col: u16, row: u8, selected: bool, style: Style) {
        let (symbol, style) = if selected {
            (SELECTED_CELL, style.add_modifier(Modifier::BOLD))
        } else {
            (CELL, style)
        };
        self.mvprint(
            GRID_TOP + u16::from(row),
            LEFT_MARGIN.saturating_add(col.saturating_mul(CELL_WIDTH)),
            symbol,
            style,
        );
    }

    fn draw_legend<S: LevelStyler>(&mut self, styler: &S) {
        self.mvprint(LEGEND_LINE, 0, "Less", TOTALS_STYLE);
        let mut x = 5;
        for level in Level::ALL {
            self.mvprint(LEGEND_LINE, x, CELL, styler.level_style(level));
            x += CELL_WIDTH;
        }
        self.mvprint(LEGEND_LINE, x, "More", TOTALS_STYLE);
    }

    fn mvprint<T: AsRef<str>>(&mut self, y: u16, x: u16, s: T, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Paragraph's Rect must lie entirely within the frame, so the
            // text is truncated at the right edge.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

fn month_abbr(month: Month) -> String {
    month.to_string().chars().take(3).collect()
}

fn weekday_abbr(wd: Weekday) -> String {
    wd.to_string().chars().take(3).collect()
}
