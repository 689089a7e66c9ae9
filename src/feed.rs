//! Reading activity feeds from disk
//!
//! A feed is a JSON array of objects with a `date` (`YYYY-MM-DD`) and optional
//! `count` and `level` fields, as written by activity scrapers.
use crate::error::FeedError;
use crate::record::RawRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations, relative to a base directory, that are probed in order by
/// [`discover()`]
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "activity-data.json",
    "public/activity-data.json",
    "docs/activity-data.json",
];

/// Read and parse the feed at `path`
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, FeedError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_owned(),
        source,
    })?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&src).map_err(|source| FeedError::Json {
            path: path.to_owned(),
            source,
        })?;
    log::info!("Loaded {} activity records from {}", records.len(), path.display());
    Ok(records)
}

/// Return the first of [`DEFAULT_CANDIDATES`] under `base` that is a file
pub fn discover<P: AsRef<Path>>(base: P) -> Option<PathBuf> {
    discover_among(base.as_ref(), DEFAULT_CANDIDATES)
}

pub fn discover_among(base: &Path, candidates: &[&str]) -> Option<PathBuf> {
    for cand in candidates {
        let path = base.join(cand);
        if path.is_file() {
            log::debug!("Found activity feed at {}", path.display());
            return Some(path);
        }
        log::debug!("No activity feed at {}", path.display());
    }
    log::warn!("No activity feed found under {}", base.display());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawDate;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_feed(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn touch(dir: &TempDir, rel: &str) -> PathBuf {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[]").unwrap();
        path
    }

    #[test]
    fn test_load() {
        let body = serde_json::json!([
            {"date": "2025-03-01", "count": 5, "level": 2},
            {"date": "2025-03-04", "count": 1},
            {"date": "not a date"},
        ]);
        let file = write_feed(&body.to_string());
        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], RawRecord::new("2025-03-01", 5).with_level(2));
        assert_eq!(records[1].level, None);
        // Dates are validated during normalization, not while loading
        assert_eq!(records[2].date, RawDate::from("not a date"));
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let r = load(dir.path().join("nope.json"));
        assert!(matches!(r, Err(FeedError::Io { .. })));
    }

    #[test]
    fn test_load_bad_json() {
        let file = write_feed("{\"date\": ");
        match load(file.path()) {
            Err(FeedError::Json { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }

    #[test]
    fn test_discover_order() {
        let dir = TempDir::new().unwrap();
        assert_eq!(discover(dir.path()), None);
        let docs = touch(&dir, "docs/activity-data.json");
        assert_eq!(discover(dir.path()), Some(docs));
        let public = touch(&dir, "public/activity-data.json");
        assert_eq!(discover(dir.path()), Some(public));
        let root = touch(&dir, "activity-data.json");
        assert_eq!(discover(dir.path()), Some(root));
    }

    #[test]
    fn test_discover_ignores_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("activity-data.json")).unwrap();
        assert_eq!(discover_among(dir.path(), &["activity-data.json"]), None);
    }
}
