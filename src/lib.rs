//! Turn sparse daily activity records into gap-free, week-aligned heatmap
//! calendars.
//!
//! [`Normalizer`] (or the [`normalize()`] shorthand) converts an unordered
//! list of [`RawRecord`]s into a [`NormalizedCalendar`] holding exactly one
//! [`ActivityRecord`] per day of its [`DateRange`].  [`layout()`] then assigns
//! every day a week column and weekday row and determines where month labels
//! go.
//!
//! ```
//! use heatgrid::{layout, normalize, DateRange, RawRecord};
//! use time::macros::date;
//!
//! let range = DateRange::new(date!(2025 - 03 - 05), date!(2025 - 03 - 11)).unwrap();
//! let calendar = normalize(
//!     vec![
//!         RawRecord::new("2025-03-06", 2),
//!         RawRecord::new("2025-03-06", 4),
//!     ],
//!     Some(range),
//! )
//! .unwrap();
//! assert_eq!(calendar.len(), 7);
//! assert_eq!(calendar.get(date!(2025 - 03 - 06)).unwrap().count, 4);
//!
//! let grid = layout(&calendar);
//! // March 5, 2025 was a Wednesday
//! assert_eq!(grid.positions[0].day_of_week, 3);
//! assert_eq!(grid.weeks, 2);
//! ```
pub mod describe;
mod error;
pub mod feed;
mod layout;
mod level;
mod normalize;
mod range;
mod record;

pub use crate::error::{FeedError, NormalizeError, ScaleError};
pub use crate::layout::{
    day_of_week, layout, layout_from, GridLayout, MonthLabel, WeekGridPosition, DAYS_IN_WEEK,
};
pub use crate::level::{Level, LevelScale};
pub use crate::normalize::{normalize, today, NormalizedCalendar, Normalizer};
pub use crate::range::{DateRange, Days, DEFAULT_WINDOW_MONTHS};
pub use crate::record::{ActivityRecord, RawDate, RawRecord};
