//! Human-readable text for heatmap captions and tooltips
use crate::range::DateRange;
use crate::record::ActivityRecord;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static DAY_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none], [year]");

static MONTH_YEAR_FMT: &[BorrowedFormatItem<'_>] = format_description!("[month repr:short] [year]");

/// Default unit named in tooltips
pub const DEFAULT_UNIT: &str = "points";

/// Format a date like "Mar 1, 2025"
pub fn format_day(date: Date) -> String {
    date.format(&DAY_FMT).unwrap_or_else(|_| date.to_string())
}

fn format_month_year(date: Date) -> String {
    date.format(&MONTH_YEAR_FMT)
        .unwrap_or_else(|_| date.to_string())
}

/// Caption for a range: "Mar 2025" when it lies within a single month,
/// otherwise "Mar 2025 - Jun 2025"
pub fn range_caption(range: &DateRange) -> String {
    let start = format_month_year(range.start());
    let (s, e) = (range.start(), range.end());
    if (s.year(), s.month()) == (e.year(), e.month()) {
        start
    } else {
        format!("{start} - {}", format_month_year(e))
    }
}

/// Tooltip for a day, e.g. "5 points on Mar 1, 2025"
pub fn tooltip(record: &ActivityRecord, unit: &str) -> String {
    format!("{} {unit} on {}", record.count, format_day(record.date))
}
