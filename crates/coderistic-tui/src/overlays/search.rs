//! Search overlay: filters posts as the query is typed.

use coderistic_core::Post;
use coderistic_core::search;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay, render_separator,
};
use crate::effects::UiEffect;
use crate::mutations::{Route, StateMutation};
use crate::state::TuiState;
use crate::views::essays::post_card;

const SEARCH_WIDTH: u16 = 76;
const SEARCH_HEIGHT: u16 = 24;

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub selected: usize,
}

impl SearchState {
    pub fn open() -> (Self, Vec<UiEffect>) {
        (Self::default(), vec![])
    }

    pub fn results<'a>(&self, tui: &'a TuiState) -> Vec<&'a Post> {
        search::filter(tui.catalog.posts(), &self.query, tui.language)
    }

    fn clamp_selection(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c' | 'k') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                self.selected += 1;
                self.clamp_selection(self.results(tui).len());
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match self.results(tui).get(self.selected) {
                Some(post) => OverlayUpdate::close().with_mutations(vec![StateMutation::Navigate(
                    Route::Post {
                        id: post.id.clone(),
                    },
                )]),
                None => OverlayUpdate::stay(),
            },
            KeyCode::Backspace => {
                self.query.pop();
                self.clamp_selection(self.results(tui).len());
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.clamp_selection(self.results(tui).len());
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let palette = tui.palette();
        let strings = tui.strings();
        let results = self.results(tui);

        let hints = [
            InputHint::new("↑↓", "navigate"),
            InputHint::new("Enter", "to select"),
            InputHint::new("Esc", "to close"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &palette,
            &OverlayConfig {
                title: "Coderistic Wisdom",
                width: SEARCH_WIDTH,
                height: SEARCH_HEIGHT,
                hints: &hints,
            },
        );

        let input_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
        render_input_line(
            frame,
            input_area,
            &InputLine {
                value: &self.query,
                placeholder: Some(strings.search_placeholder),
                prompt: "> ",
            },
            &palette,
        );
        render_separator(frame, layout.body, 1, palette.border);

        let list_area = Rect::new(
            layout.body.x,
            layout.body.y + 2,
            layout.body.width,
            layout.body.height.saturating_sub(2),
        );

        let mut lines = Vec::new();
        if self.query.is_empty() {
            lines.push(Line::from(Span::styled(
                "SHOWING ALL FRAGMENTS",
                palette.muted(),
            )));
            lines.push(Line::default());
        }
        if results.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", strings.no_results),
                palette.muted(),
            )));
        }

        let width = list_area.width as usize;
        let mut selected_bottom = 0;
        for (idx, post) in results.iter().enumerate() {
            lines.extend(post_card(
                post,
                tui.language,
                width,
                idx == self.selected,
                &palette,
            ));
            if idx == self.selected {
                selected_bottom = lines.len();
            }
            lines.push(Line::default());
        }

        let offset = selected_bottom.saturating_sub(list_area.height as usize) as u16;
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), list_area);
    }
}

#[cfg(test)]
mod tests {
    use coderistic_core::Catalog;
    use coderistic_core::config::Config;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn tui() -> TuiState {
        TuiState::new(Config::default(), Catalog::builtin().unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_filters_results() {
        let tui = tui();
        let (mut search, _) = SearchState::open();
        assert_eq!(search.results(&tui).len(), tui.catalog.posts().len());

        for c in "stoic".chars() {
            search.handle_key(&tui, key(KeyCode::Char(c)));
        }
        let results = search.results(&tui);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "digital-stoicism");
    }

    #[test]
    fn test_enter_navigates_and_closes() {
        let tui = tui();
        let (mut search, _) = SearchState::open();
        for c in "quiet".chars() {
            search.handle_key(&tui, key(KeyCode::Char(c)));
        }
        let update = search.handle_key(&tui, key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert_eq!(
            update.mutations,
            vec![StateMutation::Navigate(Route::Post {
                id: "the-art-of-quiet-code".to_string()
            })]
        );
    }

    #[test]
    fn test_enter_without_results_stays_open() {
        let tui = tui();
        let (mut search, _) = SearchState::open();
        for c in "xyzzy".chars() {
            search.handle_key(&tui, key(KeyCode::Char(c)));
        }
        let update = search.handle_key(&tui, key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Stay));
    }

    #[test]
    fn test_escape_closes() {
        let tui = tui();
        let (mut search, _) = SearchState::open();
        let update = search.handle_key(&tui, key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Close));
    }
}
