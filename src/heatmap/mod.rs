mod widget;
mod window;
pub(crate) use self::widget::Heatmap;
pub(crate) use self::window::GridWindow;
use heatgrid::Level;
use ratatui::style::Style;

pub(crate) trait LevelStyler {
    fn level_style(&self, level: Level) -> Style;
}
