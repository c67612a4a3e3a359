//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use tokio_util::sync::CancellationToken;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::mutations::{Route, StateMutation};
use crate::overlays::{self, Overlay, OverlayRequest};
use crate::state::{AppState, TuiState, Viewport};
use crate::views;

/// Lines scrolled per mouse wheel notch.
const MOUSE_SCROLL_LINES: isize = 3;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.tui.viewport = Viewport { width, height };
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::ContentLoaded {
            post_id,
            language,
            outcome,
        } => {
            let tui = &mut app.tui;
            let current = matches!(&tui.route, Route::Post { id } if *id == post_id)
                && tui.language == language;
            if current && tui.reader.content.apply(outcome) {
                tui.reader.scroll = 0;
            }
            vec![]
        }
        UiEvent::WisdomProgress { task, text } => {
            if app.tui.tasks.wisdom.is_active(task) {
                app.tui.reader.wisdom.publish(&text);
            }
            vec![]
        }
        UiEvent::WisdomFinished { result } => {
            let slot = &mut app.tui.reader.wisdom;
            if slot.loading {
                match result {
                    Some(result) => slot.finish(result),
                    None => slot.loading = false,
                }
            }
            vec![]
        }
    }
}

// ============================================================================
// StateMutation Dispatcher
// ============================================================================

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::Navigate(route) => effects.extend(navigate(tui, route)),
            StateMutation::ToggleLanguage => {
                tui.language = tui.language.toggle();
                if matches!(tui.route, Route::Post { .. }) {
                    effects.extend(cancel_task(tui, TaskKind::Wisdom));
                    tui.reader.wisdom.reset();
                    effects.extend(load_content(tui));
                }
            }
            StateMutation::CycleTheme => tui.theme = tui.theme.next(),
        }
    }
    effects
}

fn navigate(tui: &mut TuiState, route: Route) -> Vec<UiEffect> {
    if tui.route == route {
        return vec![];
    }
    if let Route::Post { id } = &route
        && tui.catalog.find(id).is_none()
    {
        tracing::warn!(post_id = %id, "Ignoring navigation to unknown post");
        return vec![];
    }

    let mut effects = Vec::new();
    if matches!(tui.route, Route::Post { .. }) {
        effects.extend(cancel_task(tui, TaskKind::Content));
        effects.extend(cancel_task(tui, TaskKind::Wisdom));
        tui.reader.reset();
    }

    let opens_post = matches!(route, Route::Post { .. });
    tui.route = route;
    if opens_post {
        effects.extend(load_content(tui));
    }
    effects
}

/// Starts a fresh content fetch for the open post, superseding any fetch
/// still in flight.
fn load_content(tui: &mut TuiState) -> Vec<UiEffect> {
    let Some(post) = tui.current_post().cloned() else {
        return vec![];
    };
    let mut effects = cancel_task(tui, TaskKind::Content);
    tui.reader.content.begin();
    tui.reader.scroll = 0;
    let task = tui.task_seq.next_id();
    let cancel = CancellationToken::new();
    tui.tasks.content.begin(task, cancel.clone());
    effects.push(UiEffect::LoadContent {
        task,
        post: Box::new(post),
        language: tui.language,
        cancel,
    });
    effects
}

fn cancel_task(tui: &mut TuiState, kind: TaskKind) -> Vec<UiEffect> {
    let state = tui.tasks.state_mut(kind);
    if !state.is_running() {
        return vec![];
    }
    vec![UiEffect::CancelTask {
        kind,
        token: state.take_cancel(),
    }]
}

// ============================================================================
// Overlays
// ============================================================================

fn apply_overlay_update(app: &mut AppState, update: overlays::OverlayUpdate) -> Vec<UiEffect> {
    let mut effects = update.effects;
    match update.transition {
        overlays::OverlayTransition::Stay => {}
        overlays::OverlayTransition::Close => app.overlay = None,
        overlays::OverlayTransition::Open(request) => {
            effects.extend(open_overlay_request(app, request));
        }
    }
    effects.extend(apply_mutations(&mut app.tui, update.mutations));
    effects
}

fn open_overlay_request(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    let (overlay, effects) = Overlay::open(request);
    app.overlay = Some(overlay);
    effects
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => {
            if app.overlay.is_none() && matches!(app.tui.route, Route::Post { .. }) {
                match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        views::post::scroll_by(&mut app.tui, -MOUSE_SCROLL_LINES);
                    }
                    MouseEventKind::ScrollDown => {
                        views::post::scroll_by(&mut app.tui, MOUSE_SCROLL_LINES);
                    }
                    _ => {}
                }
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(update) = overlays::handle_overlay_key(&app.tui, &mut app.overlay, key) {
        return apply_overlay_update(app, update);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Char('k') if ctrl => return open_overlay_request(app, OverlayRequest::Search),
        KeyCode::Char('/') => return open_overlay_request(app, OverlayRequest::Search),
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Char('1') => {
            return apply_mutations(&mut app.tui, vec![StateMutation::Navigate(Route::Essays)]);
        }
        KeyCode::Char('2') => {
            return apply_mutations(&mut app.tui, vec![StateMutation::Navigate(Route::Persona)]);
        }
        KeyCode::Char('l') => {
            return apply_mutations(&mut app.tui, vec![StateMutation::ToggleLanguage]);
        }
        KeyCode::Char('t') => {
            return apply_mutations(&mut app.tui, vec![StateMutation::CycleTheme]);
        }
        _ => {}
    }

    let tui = &mut app.tui;
    let (mut effects, mutations) = match tui.route {
        Route::Essays => (
            vec![],
            views::essays::handle_key(&mut tui.essays, tui.catalog.posts(), key),
        ),
        Route::Persona => views::persona::handle_key(&mut tui.persona, &tui.catalog, key),
        Route::Post { .. } => views::post::handle_key(tui, key),
    };
    effects.extend(apply_mutations(tui, mutations));
    effects
}
