mod app;
mod heatmap;
mod help;
mod theme;
use crate::app::App;
use crate::heatmap::GridWindow;
use crate::theme::Greens;
use anyhow::Context;
use heatgrid::describe::range_caption;
use heatgrid::{feed, LevelScale, NormalizedCalendar, Normalizer, RawDate, RawRecord, ScaleError};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;
use time::{Date, Weekday};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    feed: Option<PathBuf>,
    overrides: Option<PathBuf>,
    range: Option<(Date, Date)>,
    scale: Option<LevelScale>,
    strict: bool,
    monday: bool,
    json: bool,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        let mut start = None;
        let mut end = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("start") => start = Some(parser.value()?.parse_with(parse_date)?),
                Arg::Long("end") => end = Some(parser.value()?.parse_with(parse_date)?),
                Arg::Long("overrides") => opts.overrides = Some(PathBuf::from(parser.value()?)),
                Arg::Long("thresholds") => {
                    opts.scale = Some(parser.value()?.parse_with(parse_thresholds)?);
                }
                Arg::Long("strict") => opts.strict = true,
                Arg::Long("monday") => opts.monday = true,
                Arg::Long("json") => opts.json = true,
                Arg::Value(value) if opts.feed.is_none() => opts.feed = Some(PathBuf::from(value)),
                _ => return Err(arg.unexpected()),
            }
        }
        opts.range = match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            (None, None) => None,
            _ => {
                return Err(lexopt::Error::Custom(
                    "--start and --end must be given together".into(),
                ))
            }
        };
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(heatgrid::today()),
            Command::Help => {
                println!("Usage: heatgrid [OPTIONS] [FILE]");
                println!();
                println!("Show a gap-filled calendar heatmap of daily activity records");
                println!();
                println!("If FILE is not given, activity-data.json is looked for in the current");
                println!("directory and in public/ and docs/.");
                println!();
                println!("Options:");
                println!("  --start YYYY-MM-DD    First day to show (requires --end)");
                println!("  --end YYYY-MM-DD      Last day to show (requires --start)");
                println!("  --overrides FILE      Records that replace those in the feed");
                println!("  --thresholds A,B,C,D  Minimum counts for levels 1 through 4");
                println!("  --strict              Reject negative counts");
                println!("  --monday              Start weeks on Monday");
                println!("  --json                Print the calendar as JSON and exit");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Options {
    fn normalizer(&self, today: Date) -> anyhow::Result<Normalizer> {
        let mut normalizer = Normalizer::new(today).strict_counts(self.strict);
        if let Some((start, end)) = self.range {
            normalizer = normalizer.range(start, end);
        }
        if let Some(scale) = self.scale {
            normalizer = normalizer.scale(scale);
        }
        if let Some(ref path) = self.overrides {
            let overrides = feed::load(path).context("failed to load override records")?;
            normalizer = normalizer.overrides(overrides);
        }
        Ok(normalizer)
    }

    fn records(&self) -> anyhow::Result<Vec<RawRecord>> {
        let path = match self.feed {
            Some(ref p) => Some(p.clone()),
            None => feed::discover("."),
        };
        match path {
            Some(p) => feed::load(p).context("failed to load activity feed"),
            None => Ok(Vec::new()),
        }
    }

    fn first_day(&self) -> Weekday {
        if self.monday {
            Weekday::Monday
        } else {
            Weekday::Sunday
        }
    }

    fn run(self, today: Date) -> anyhow::Result<()> {
        let calendar = self
            .normalizer(today)?
            .normalize(self.records()?)
            .context("failed to normalize activity records")?;
        if self.json {
            let doc = json_document(&calendar, self.first_day());
            let out = serde_json::to_string_pretty(&doc).context("failed to serialize calendar")?;
            println!("{out}");
            Ok(())
        } else {
            let window = GridWindow::new(calendar, self.first_day(), Greens);
            with_terminal(|mut terminal| {
                terminal.hide_cursor().context("failed to hide cursor")?;
                App::new(window).run(terminal)?;
                Ok(())
            })
        }
    }
}

fn json_document(calendar: &NormalizedCalendar, first_day: Weekday) -> serde_json::Value {
    serde_json::json!({
        "caption": range_caption(&calendar.range()),
        "range": calendar.range(),
        "total_count": calendar.total_count(),
        "active_days": calendar.active_days(),
        "calendar": calendar.records(),
        "layout": heatgrid::layout_from(calendar, first_day),
    })
}

fn parse_date(s: &str) -> Result<Date, heatgrid::NormalizeError> {
    RawDate::from(s).parse()
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
enum ThresholdsError {
    #[error("expected exactly four comma-separated thresholds")]
    Count,
    #[error("invalid threshold")]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

fn parse_thresholds(s: &str) -> Result<LevelScale, ThresholdsError> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()?;
    let thresholds = <[u64; 4]>::try_from(values).map_err(|_| ThresholdsError::Count)?;
    Ok(LevelScale::new(thresholds)?)
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
