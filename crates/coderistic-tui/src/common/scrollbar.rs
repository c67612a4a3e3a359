//! Scrollbar widget with a fixed thumb length.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

/// Vertical scrollbar for the reading pane.
///
/// Draws nothing when the content fits the viewport. The thumb reaches the
/// last row exactly at maximum scroll.
#[derive(Debug, Clone)]
pub struct Scrollbar {
    total_lines: usize,
    viewport_height: usize,
    scroll_offset: usize,
    track_style: Style,
    thumb_style: Style,
}

impl Scrollbar {
    pub fn new(total_lines: usize, viewport_height: usize, scroll_offset: usize) -> Self {
        Self {
            total_lines,
            viewport_height,
            scroll_offset,
            track_style: Style::default(),
            thumb_style: Style::default(),
        }
    }

    #[must_use]
    pub fn styles(mut self, track: Style, thumb: Style) -> Self {
        self.track_style = track;
        self.thumb_style = thumb;
        self
    }

    /// Returns `(thumb_start, thumb_len)` for a track of `track_len` rows.
    fn thumb(&self, track_len: usize) -> Option<(usize, usize)> {
        let max_scroll = self.total_lines.saturating_sub(self.viewport_height);
        if track_len == 0 || max_scroll == 0 {
            return None;
        }
        let thumb_len = (track_len * self.viewport_height / self.total_lines).clamp(1, track_len);
        let travel = track_len - thumb_len;
        let offset = self.scroll_offset.min(max_scroll);
        let start = (travel * offset + max_scroll / 2) / max_scroll;
        Some((start, thumb_len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let track_len = area.height as usize;
        let Some((start, len)) = self.thumb(track_len) else {
            return;
        };

        for row in 0..track_len {
            let y = area.y + row as u16;
            let (symbol, style) = if (start..start + len).contains(&row) {
                (THUMB_SYMBOL, self.thumb_style)
            } else {
                (TRACK_SYMBOL, self.track_style)
            };
            buf[(area.x, y)].set_symbol(symbol).set_style(style);
        }
    }
}
