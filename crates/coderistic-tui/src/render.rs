//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use coderistic_core::strings::FOOTER;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::mutations::Route;
use crate::overlays::OverlayExt;
use crate::state::{AppState, TuiState};
use crate::views;

/// Header rows: title line and a rule.
pub const HEADER_HEIGHT: u16 = 2;

pub const FOOTER_HEIGHT: u16 = 1;

/// Widest the reading column grows on large terminals.
const MAX_COLUMN_WIDTH: u16 = 80;

/// Horizontal margin on each side of the reading column.
const COLUMN_MARGIN: u16 = 2;

/// Width reserved for the scrollbar on the right side.
const SCROLLBAR_WIDTH: u16 = 1;

/// Spinner frames for loading animation.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// The area between header and footer.
pub fn body_area(area: Rect) -> Rect {
    let chrome = HEADER_HEIGHT + FOOTER_HEIGHT;
    Rect::new(
        area.x,
        area.y + HEADER_HEIGHT.min(area.height),
        area.width,
        area.height.saturating_sub(chrome),
    )
}

/// Centered text column inside `area`, leaving room for the scrollbar.
pub fn reading_column(area: Rect) -> Rect {
    let usable = area
        .width
        .saturating_sub(COLUMN_MARGIN * 2 + SCROLLBAR_WIDTH);
    let width = usable.min(MAX_COLUMN_WIDTH);
    let x = area.x + COLUMN_MARGIN + (usable - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

/// Rightmost column of `area`.
pub fn scrollbar_area(area: Rect) -> Rect {
    Rect::new(
        area.x + area.width.saturating_sub(SCROLLBAR_WIDTH),
        area.y,
        SCROLLBAR_WIDTH.min(area.width),
        area.height,
    )
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;
    let palette = state.palette();

    frame.render_widget(Block::default().style(palette.base()), area);

    render_header(frame, area, state);

    let body = body_area(area);
    match &state.route {
        Route::Essays => views::essays::render(frame, body, state),
        Route::Persona => views::persona::render(frame, body, state),
        Route::Post { .. } => views::post::render(frame, body, state),
    }

    render_footer(frame, area, state);

    app.overlay.render(frame, area, state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &TuiState) {
    if area.height < HEADER_HEIGHT {
        return;
    }
    let palette = state.palette();
    let strings = state.strings();

    let tab = |key: &'static str, label: &'static str, active: bool| {
        let style = if active {
            palette.accent().add_modifier(Modifier::UNDERLINED)
        } else {
            palette.muted()
        };
        vec![
            Span::styled(format!("[{key}] "), palette.muted()),
            Span::styled(label, style),
            Span::raw("  "),
        ]
    };

    let mut left = vec![
        Span::styled("CODERISTIC", palette.accent().fg(palette.heading)),
        Span::raw("    "),
    ];
    left.extend(tab(
        "1",
        strings.essays,
        matches!(state.route, Route::Essays | Route::Post { .. }),
    ));
    left.extend(tab("2", strings.persona, state.route == Route::Persona));

    let right = Line::from(vec![
        Span::styled(state.theme.icon(), Style::default().fg(palette.accent)),
        Span::raw(" "),
        Span::styled(state.language.code().to_uppercase(), palette.accent()),
        Span::raw(" "),
    ])
    .alignment(Alignment::Right);

    let title_row = Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), 1);
    frame.render_widget(Paragraph::new(Line::from(left)), title_row);
    frame.render_widget(Paragraph::new(right), title_row);

    let rule = Rect::new(area.x, area.y + 1, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(palette.border),
        ))),
        rule,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &TuiState) {
    if area.height <= HEADER_HEIGHT {
        return;
    }
    let palette = state.palette();
    let strings = state.strings();

    let hints: Vec<(&str, &str)> = match state.route {
        Route::Post { .. } => vec![
            ("Esc", strings.return_label),
            ("g", strings.back_to_top),
            ("w", strings.wisdom_button),
            ("l", "lang"),
            ("t", "theme"),
        ],
        Route::Essays | Route::Persona => vec![
            ("Ctrl+K", "search"),
            ("l", "lang"),
            ("t", "theme"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", palette.muted()));
        }
        spans.push(Span::styled(key, Style::default().fg(palette.accent)));
        spans.push(Span::styled(format!(" {action}"), palette.muted()));
    }

    let row = Rect::new(area.x + 1, area.y + area.height - 1, area.width.saturating_sub(2), 1);
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(FOOTER, palette.muted()))).alignment(Alignment::Right),
        row,
    );
}
