//! Persona page: author, motto and outbound links.

use coderistic_core::strings::AUTHOR_NAME;
use coderistic_core::{Catalog, LinkKind, SocialLink};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{truncate_with_ellipsis, wrap};
use crate::effects::UiEffect;
use crate::mutations::{Route, StateMutation};
use crate::render::reading_column;
use crate::state::TuiState;

#[derive(Debug, Default, Clone)]
pub struct PersonaState {
    pub selected: usize,
}

/// Public links first, then private ones; selection indexes this order.
pub fn ordered_links(catalog: &Catalog) -> Vec<&SocialLink> {
    catalog
        .links(LinkKind::Public)
        .chain(catalog.links(LinkKind::Private))
        .collect()
}

pub fn handle_key(
    state: &mut PersonaState,
    catalog: &Catalog,
    key: KeyEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    let links = ordered_links(catalog);
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => (vec![], vec![StateMutation::Navigate(Route::Essays)]),
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
            (vec![], vec![])
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.selected = (state.selected + 1).min(links.len().saturating_sub(1));
            (vec![], vec![])
        }
        KeyCode::Enter => {
            let effects = links
                .get(state.selected)
                .map(|link| {
                    vec![UiEffect::OpenBrowser {
                        url: link.url.clone(),
                    }]
                })
                .unwrap_or_default();
            (effects, vec![])
        }
        _ => (vec![], vec![]),
    }
}

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let palette = tui.palette();
    let strings = tui.strings();
    let column = reading_column(area);
    let width = column.width as usize;

    let section = |title: &str| {
        Line::from(Span::styled(
            title.to_uppercase(),
            palette.muted().add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(AUTHOR_NAME, palette.accent().fg(palette.heading))),
    ];
    lines.extend(
        wrap(strings.intro_text, width)
            .into_iter()
            .map(|chunk| Line::from(Span::styled(chunk, Style::default().fg(palette.text)))),
    );
    lines.push(Line::default());
    lines.extend(wrap(&format!("“{}”", strings.motto), width).into_iter().map(|chunk| {
        Line::from(Span::styled(
            chunk,
            Style::default()
                .fg(palette.quote)
                .add_modifier(Modifier::ITALIC),
        ))
    }));

    let mut index = 0;
    for (kind, title) in [
        (LinkKind::Public, strings.branding),
        (LinkKind::Private, strings.private_signal),
    ] {
        lines.push(Line::default());
        lines.push(section(title));
        for link in tui.catalog.links(kind) {
            let selected = index == tui.persona.selected;
            let marker = if selected { "▶ " } else { "  " };
            let name_style = if selected {
                palette.selected()
            } else {
                palette.accent()
            };
            let url = truncate_with_ellipsis(&link.url, width.saturating_sub(link.name.len() + 6));
            lines.push(Line::from(vec![
                Span::styled(marker, palette.accent()),
                Span::styled(link.name.clone(), name_style),
                Span::styled(format!("  {url}"), palette.muted()),
            ]));
            index += 1;
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("— {} —", strings.end_of_transmission),
        palette.muted().add_modifier(Modifier::ITALIC),
    )));

    frame.render_widget(Paragraph::new(lines), column);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn test_public_links_come_first() {
        let catalog = Catalog::builtin().unwrap();
        let links = ordered_links(&catalog);
        let first_private = links
            .iter()
            .position(|l| l.kind == LinkKind::Private)
            .unwrap();
        assert!(
            links[first_private..]
                .iter()
                .all(|l| l.kind == LinkKind::Private)
        );
    }

    #[test]
    fn test_enter_opens_selected_link() {
        let catalog = Catalog::builtin().unwrap();
        let mut state = PersonaState { selected: 0 };
        let (effects, _) = handle_key(
            &mut state,
            &catalog,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
        );
        let expected = ordered_links(&catalog)[0].url.clone();
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::OpenBrowser { url }] if *url == expected
        ));
    }
}
