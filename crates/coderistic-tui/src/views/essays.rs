//! Essay list: hero text followed by one card per post.

use coderistic_core::{Language, Post};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::wrap;
use crate::mutations::{Route, StateMutation};
use crate::render::reading_column;
use crate::state::TuiState;
use crate::theme::Palette;

#[derive(Debug, Default, Clone)]
pub struct EssaysState {
    pub selected: usize,
}

impl EssaysState {
    fn clamp(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

pub fn handle_key(state: &mut EssaysState, posts: &[Post], key: KeyEvent) -> Vec<StateMutation> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.selected += 1;
            state.clamp(posts.len());
            vec![]
        }
        KeyCode::Enter => posts
            .get(state.selected)
            .map(|post| {
                vec![StateMutation::Navigate(Route::Post {
                    id: post.id.clone(),
                })]
            })
            .unwrap_or_default(),
        _ => vec![],
    }
}

/// Builds one post card. Shared with the search overlay.
pub fn post_card(
    post: &Post,
    language: Language,
    width: usize,
    selected: bool,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let marker = if selected { "▶ " } else { "  " };
    let title_style = if selected {
        palette.selected()
    } else {
        palette.accent()
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("  {} · {}", post.date, post.reading_time),
        palette.muted(),
    ))];
    for (i, chunk) in wrap(post.title(language), width.saturating_sub(2))
        .into_iter()
        .enumerate()
    {
        let prefix = if i == 0 { marker } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(prefix, palette.accent()),
            Span::styled(chunk, title_style),
        ]));
    }
    for chunk in wrap(post.excerpt(language), width.saturating_sub(2)) {
        lines.push(Line::from(Span::styled(
            format!("  {chunk}"),
            Style::default().fg(palette.text),
        )));
    }
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|tag| format!("#{tag}")).collect();
        lines.push(Line::from(Span::styled(
            format!("  {}", tags.join(" ")),
            palette.muted().add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let palette = tui.palette();
    let strings = tui.strings();
    let column = reading_column(area);
    let width = column.width as usize;

    let mut lines = Vec::new();
    lines.push(Line::default());
    for chunk in wrap(strings.fragments_title, width) {
        lines.push(Line::from(Span::styled(
            chunk,
            palette.accent().fg(palette.heading),
        )));
    }
    for chunk in wrap(strings.intro_text, width) {
        lines.push(Line::from(Span::styled(chunk, palette.muted())));
    }
    lines.push(Line::from(Span::styled(
        strings.search_shortcut,
        palette.muted().add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::default());

    // Keep the selected card on screen.
    let mut selected_bottom = 0;
    for (idx, post) in tui.catalog.posts().iter().enumerate() {
        lines.extend(post_card(
            post,
            tui.language,
            width,
            idx == tui.essays.selected,
            &palette,
        ));
        if idx == tui.essays.selected {
            selected_bottom = lines.len();
        }
        lines.push(Line::default());
    }

    let height = column.height as usize;
    let offset = selected_bottom.saturating_sub(height) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), column);
}
