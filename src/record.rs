use crate::error::NormalizeError;
use crate::level::Level;
use serde::{Deserialize, Serialize, Serializer};
use time::format_description::{well_known::Iso8601, BorrowedFormatItem};
use time::{macros::format_description, Date, OffsetDateTime, PrimitiveDateTime};

pub(crate) static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A date as it arrives from an activity feed: either text that still needs
/// parsing or an already-typed calendar date
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum RawDate {
    Text(String),
    Date(Date),
}

impl RawDate {
    /// Parse into a calendar date.
    ///
    /// Accepts `YYYY-MM-DD` or a full ISO 8601 timestamp.  For a timestamp
    /// the date is taken exactly as written (no timezone conversion is
    /// performed).
    pub fn parse(&self) -> Result<Date, NormalizeError> {
        match self {
            RawDate::Date(d) => Ok(*d),
            RawDate::Text(s) => parse_ymd(s),
        }
    }
}

impl From<String> for RawDate {
    fn from(s: String) -> RawDate {
        RawDate::Text(s)
    }
}

impl From<&str> for RawDate {
    fn from(s: &str) -> RawDate {
        RawDate::Text(s.to_owned())
    }
}

impl From<Date> for RawDate {
    fn from(d: Date) -> RawDate {
        RawDate::Date(d)
    }
}

pub(crate) fn parse_ymd(s: &str) -> Result<Date, NormalizeError> {
    let trimmed = s.trim();
    let parsed = if trimmed.contains('T') {
        // The date is kept as written, in the timestamp's own offset
        OffsetDateTime::parse(trimmed, &Iso8601::DEFAULT)
            .map(OffsetDateTime::date)
            .or_else(|_| {
                PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT).map(PrimitiveDateTime::date)
            })
    } else {
        Date::parse(trimmed, &YMD_FMT)
    };
    parsed.map_err(|_| NormalizeError::MalformedDate {
        value: s.to_owned(),
    })
}

/// One entry of a sparse activity feed, before normalization
///
/// `count` and `level` are optional and loosely typed, as feeds in the wild
/// omit them or carry out-of-range values.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize)]
pub struct RawRecord {
    pub date: RawDate,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub level: Option<i64>,
}

impl RawRecord {
    pub fn new<D: Into<RawDate>>(date: D, count: i64) -> RawRecord {
        RawRecord {
            date: date.into(),
            count: Some(count),
            level: None,
        }
    }

    pub fn with_level(mut self, level: i64) -> RawRecord {
        self.level = Some(level);
        self
    }
}

impl From<ActivityRecord> for RawRecord {
    fn from(rec: ActivityRecord) -> RawRecord {
        RawRecord {
            date: RawDate::Date(rec.date),
            count: Some(i64::try_from(rec.count).unwrap_or(i64::MAX)),
            level: Some(i64::from(rec.level.get())),
        }
    }
}

/// A single day of a normalized calendar
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ActivityRecord {
    #[serde(serialize_with = "serialize_ymd")]
    pub date: Date,
    pub count: u64,
    pub level: Level,
}

impl ActivityRecord {
    /// A day with no recorded activity
    pub fn empty(date: Date) -> ActivityRecord {
        ActivityRecord {
            date,
            count: 0,
            level: Level::NONE,
        }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

pub(crate) fn serialize_ymd<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let s = date.format(&YMD_FMT).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&s)
}
