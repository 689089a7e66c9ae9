use std::path::PathBuf;
use thiserror::Error;
use time::Date;

/// Errors returned by [`Normalizer::normalize()`][crate::Normalizer::normalize]
/// and [`normalize()`][crate::normalize()]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NormalizeError {
    /// An input date could not be parsed as a calendar date
    #[error("malformed date {value:?}")]
    MalformedDate { value: String },

    /// An explicit range was given with its start after its end
    #[error("empty date range: {start} is after {end}")]
    EmptyRange { start: Date, end: Date },

    /// A negative count was seen while strict counting was enabled
    #[error("invalid count {count} on {date}")]
    InvalidCount { date: Date, count: i64 },
}

/// Error returned when constructing a [`LevelScale`][crate::LevelScale] from
/// unusable thresholds
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ScaleError {
    #[error("level thresholds must be positive")]
    ZeroThreshold,
    #[error("level thresholds must be strictly ascending")]
    NotAscending,
}

/// Error returned when an activity feed cannot be read
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read activity feed {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse activity feed {}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
