use crate::heatmap::LevelStyler;
use heatgrid::Level;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const CAPTION_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const MONTH_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const TOTALS_STYLE: Style = BASE_STYLE;

pub(crate) const NOTICE_STYLE: Style = BASE_STYLE
    .fg(Color::DarkGray)
    .add_modifier(Modifier::ITALIC);

/// Cell colors for levels 0 through 4, from "no activity" to "most active"
pub(crate) const GREEN_LEVELS: [Color; 5] = [
    Color::Rgb(0x16, 0x1b, 0x22),
    Color::Rgb(0x0e, 0x44, 0x29),
    Color::Rgb(0x00, 0x6d, 0x32),
    Color::Rgb(0x26, 0xa6, 0x41),
    Color::Rgb(0x39, 0xd3, 0x53),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Greens;

impl LevelStyler for Greens {
    fn level_style(&self, level: Level) -> Style {
        let color = GREEN_LEVELS
            .get(level.index())
            .copied()
            .unwrap_or(Color::White);
        BASE_STYLE.fg(color)
    }
}

pub(crate) mod help {
    use super::*;

    pub(crate) const KEY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}
