use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_with_ellipsis;
use crate::theme::Palette;

/// Centers an overlay of the requested size inside `area`.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Clears the background and draws the titled border.
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(palette.base())
        .border_style(Style::default().fg(palette.border))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Renders a standard overlay container and returns its layout.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    config: &OverlayConfig<'_>,
) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    render_overlay_container(frame, popup, config.title, palette);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    let footer_height = u16::from(!config.hints.is_empty());
    let body_height = inner.height.saturating_sub(footer_height);
    let footer = Rect::new(inner.x, inner.y + body_height, inner.width, footer_height);
    let body = Rect::new(inner.x, inner.y, inner.width, body_height);

    if !config.hints.is_empty() {
        render_hints(frame, footer, config.hints, palette);
    }

    OverlayLayout {
        popup,
        body,
        footer,
    }
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

pub struct InputLine<'a> {
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
}

/// Renders a prompt-style input line: "> <text>█".
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>, palette: &Palette) {
    let is_placeholder = input.value.is_empty() && input.placeholder.is_some();
    let max_text_width = area.width.saturating_sub(input.prompt.len() as u16 + 1) as usize;
    let cursor = Span::styled("█", Style::default().fg(palette.accent));

    let mut spans = vec![Span::styled(input.prompt, palette.muted())];
    if is_placeholder {
        spans.push(cursor);
        spans.push(Span::styled(
            truncate_with_ellipsis(input.placeholder.unwrap_or(""), max_text_width),
            palette.muted(),
        ));
    } else {
        spans.push(Span::styled(
            truncate_with_ellipsis(input.value, max_text_width),
            Style::default().fg(palette.text),
        ));
        spans.push(cursor);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a line of keyboard hints.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], palette: &Palette) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", palette.muted()));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(palette.accent)));
        spans.push(Span::styled(format!(" {}", hint.action), palette.muted()));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Renders a separator line `y_offset` rows into `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16, color: Color) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(color),
        ))),
        separator_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_area_is_centered_and_bounded() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = calculate_overlay_area(area, 60, 20);
        assert_eq!(popup, Rect::new(20, 10, 60, 20));

        let tiny = calculate_overlay_area(Rect::new(0, 0, 20, 10), 60, 20);
        assert!(tiny.width <= 16 && tiny.height <= 8);
    }
}
