//! Post detail: the article body followed by the wisdom card.
//!
//! Lines are pre-wrapped to the column width so the reducer and the renderer
//! agree on the total line count used for scrolling.

use coderistic_core::content::ContentSlot;
use coderistic_core::markdown::{Block, render_blocks};
use coderistic_core::strings::{WISDOM_ATTRIBUTION, WISDOM_CONSULTING, WISDOM_PROMPT};
use coderistic_core::wisdom::WisdomSlot;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio_util::sync::CancellationToken;

use crate::common::{Scrollbar, wrap};
use crate::effects::UiEffect;
use crate::mutations::{Route, StateMutation};
use crate::render::{SPINNER_FRAMES, reading_column, scrollbar_area};
use crate::state::TuiState;
use crate::theme::Palette;

/// Per-post reading state. Reset whenever a different post opens.
#[derive(Debug, Default, Clone)]
pub struct ReaderState {
    pub content: ContentSlot,
    pub wisdom: WisdomSlot,
    /// First visible line
    pub scroll: usize,
}

impl ReaderState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> (Vec<UiEffect>, Vec<StateMutation>) {
    let page = body_height(tui).saturating_sub(2).max(1);
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => (vec![], vec![StateMutation::Navigate(Route::Essays)]),
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_by(tui, -1);
            (vec![], vec![])
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_by(tui, 1);
            (vec![], vec![])
        }
        KeyCode::PageUp => {
            scroll_by(tui, -(page as isize));
            (vec![], vec![])
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            scroll_by(tui, page as isize);
            (vec![], vec![])
        }
        KeyCode::Home | KeyCode::Char('g') => {
            tui.reader.scroll = 0;
            (vec![], vec![])
        }
        KeyCode::End | KeyCode::Char('G') => {
            tui.reader.scroll = max_scroll(tui);
            (vec![], vec![])
        }
        KeyCode::Char('w') if tui.reader.wisdom.text.is_none() => (request_wisdom(tui), vec![]),
        KeyCode::Char('r') if tui.reader.wisdom.text.is_some() => (request_wisdom(tui), vec![]),
        _ => (vec![], vec![]),
    }
}

/// Starts a wisdom request unless content is still loading or one is
/// already outstanding.
pub fn request_wisdom(tui: &mut TuiState) -> Vec<UiEffect> {
    if tui.reader.content.loading || !tui.reader.wisdom.begin() {
        return vec![];
    }
    let task = tui.task_seq.next_id();
    let cancel = CancellationToken::new();
    tui.tasks.wisdom.begin(task, cancel.clone());
    vec![UiEffect::RequestWisdom {
        task,
        language: tui.language,
        cancel,
    }]
}

fn body_height(tui: &TuiState) -> usize {
    let area = Rect::new(0, 0, tui.viewport.width, tui.viewport.height);
    reading_column(crate::render::body_area(area)).height as usize
}

fn max_scroll(tui: &TuiState) -> usize {
    let area = Rect::new(0, 0, tui.viewport.width, tui.viewport.height);
    let column = reading_column(crate::render::body_area(area));
    let total = build_lines(tui, column.width as usize, &tui.palette()).len();
    total.saturating_sub(column.height as usize)
}

pub(crate) fn scroll_by(tui: &mut TuiState, delta: isize) {
    let max = max_scroll(tui);
    let next = tui.reader.scroll.saturating_add_signed(delta);
    tui.reader.scroll = next.min(max);
}

fn block_lines(block: Block<'_>, width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let styled = |text: &str, style: Style, prefix: &'static str| -> Vec<Line<'static>> {
        wrap(text, width.saturating_sub(prefix.chars().count()))
            .into_iter()
            .map(|chunk| {
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(chunk, style),
                ])
            })
            .collect()
    };

    match block {
        Block::Heading { level: 1, text } => styled(
            text,
            Style::default()
                .fg(palette.heading)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            "",
        ),
        Block::Heading { level: 2, text } => styled(
            text,
            Style::default()
                .fg(palette.heading)
                .add_modifier(Modifier::BOLD),
            "",
        ),
        Block::Heading { text, .. } => styled(
            text,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            "",
        ),
        Block::Quote(text) => styled(
            text,
            Style::default()
                .fg(palette.quote)
                .add_modifier(Modifier::ITALIC),
            "│ ",
        ),
        Block::Spacer => vec![Line::default()],
        Block::Paragraph(text) => styled(text, Style::default().fg(palette.text), ""),
    }
}

fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

fn article_lines(
    content: &ContentSlot,
    spinner_frame: usize,
    width: usize,
    palette: &Palette,
) -> Vec<Line<'static>> {
    if content.loading {
        return vec![Line::from(Span::styled(
            format!("{} …", spinner(spinner_frame)),
            palette.muted(),
        ))];
    }
    render_blocks(&content.text)
        .flat_map(|block| block_lines(block, width, palette))
        .collect()
}

fn wisdom_lines(tui: &TuiState, width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let wisdom = &tui.reader.wisdom;
    let button = tui.strings().wisdom_button;
    let mut lines = vec![
        Line::from(Span::styled("─".repeat(width.min(40)), palette.muted())),
        Line::default(),
    ];

    match (&wisdom.text, wisdom.loading) {
        (None, false) => {
            lines.push(Line::from(Span::styled(
                WISDOM_PROMPT,
                palette.muted().add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(vec![
                Span::styled("[w] ", palette.muted()),
                Span::styled(button, palette.accent()),
            ]));
        }
        (None, true) => {
            lines.push(Line::from(Span::styled(
                format!("{} {WISDOM_CONSULTING}", spinner(tui.spinner_frame)),
                palette.muted(),
            )));
        }
        (Some(text), loading) => {
            let quoted = if loading {
                format!("“{text}▍")
            } else {
                format!("“{text}”")
            };
            let style = Style::default()
                .fg(palette.quote)
                .add_modifier(Modifier::ITALIC);
            lines.extend(
                wrap(&quoted, width)
                    .into_iter()
                    .map(|chunk| Line::from(Span::styled(chunk, style))),
            );
            if !loading {
                lines.push(Line::from(Span::styled(
                    WISDOM_ATTRIBUTION,
                    palette.muted(),
                )));
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled("[r] ", palette.muted()),
                    Span::styled(button, palette.accent()),
                ]));
            }
        }
    }
    lines
}

/// All lines of the post view for a column `width` wide.
pub fn build_lines(tui: &TuiState, width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let Some(post) = tui.current_post() else {
        return Vec::new();
    };

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("{} · {}", post.date, post.reading_time),
            palette.muted(),
        )),
    ];
    lines.extend(
        wrap(post.title(tui.language), width)
            .into_iter()
            .map(|chunk| Line::from(Span::styled(chunk, palette.accent().fg(palette.heading)))),
    );
    lines.push(Line::default());
    lines.extend(article_lines(
        &tui.reader.content,
        tui.spinner_frame,
        width,
        palette,
    ));

    if !tui.reader.content.loading {
        lines.push(Line::default());
        lines.extend(wisdom_lines(tui, width, palette));
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let palette = tui.palette();
    let column = reading_column(area);
    let lines = build_lines(tui, column.width as usize, &palette);

    let height = column.height as usize;
    let total = lines.len();
    let offset = tui.reader.scroll.min(total.saturating_sub(height));

    let visible: Vec<Line<'static>> = lines.into_iter().skip(offset).take(height).collect();
    frame.render_widget(Paragraph::new(visible), column);

    frame.render_widget(
        Scrollbar::new(total, height, offset)
            .styles(palette.muted(), Style::default().fg(palette.accent)),
        scrollbar_area(area),
    );
}
