//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Spawned tasks send `UiEvent`s to `inbox_tx`; the runtime drains
//! `inbox_rx` each frame and feeds the events through the reducer.

mod handlers;

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use coderistic_core::config::Config;
use coderistic_core::content::ContentLoader;
use coderistic_core::wisdom::{ChatCompletionsBackend, ChatCompletionsConfig, WisdomStreamer};
use coderistic_core::Catalog;
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while something is animating (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and on
/// panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    content: ContentLoader,
    wisdom: Arc<WisdomStreamer<ChatCompletionsBackend>>,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: Config, catalog: Catalog) -> Result<Self> {
        let content = ContentLoader::new(config.content_base()?);
        let backend = ChatCompletionsBackend::new(ChatCompletionsConfig::from_config(
            &config.wisdom,
        )?);

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config, catalog),
            inbox_tx,
            inbox_rx,
            content,
            wisdom: Arc::new(WisdomStreamer::new(backend)),
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Layout updates happen before anything else in the batch
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick triggers render; it caps frame rate at tick cadence
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.reader.content.loading
            || self.state.tui.reader.wisdom.loading
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<Fut>(&self, kind: TaskKind, id: TaskId, cancel: CancellationToken, fut: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let started = TaskStarted {
            id,
            cancel: Some(cancel),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let completed = TaskCompleted {
                id,
                result: Box::new(fut.await),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                if let Err(err) = open::that(&url) {
                    tracing::warn!(%url, error = %err, "Failed to open browser");
                }
            }
            UiEffect::CancelTask { kind, token } => {
                tracing::debug!(?kind, "Cancelling task");
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::LoadContent {
                task,
                post,
                language,
                cancel,
            } => {
                let request = self.content.activate_with(&post, language, cancel.clone());
                tracing::debug!(post = %post.id, %language, url = request.url(), "Loading content");
                self.spawn_task(
                    TaskKind::Content,
                    task,
                    cancel,
                    handlers::load_content(request),
                );
            }
            UiEffect::RequestWisdom {
                task,
                language,
                cancel,
            } => {
                let fut = handlers::request_wisdom(
                    Arc::clone(&self.wisdom),
                    task,
                    language,
                    self.inbox_tx.clone(),
                    cancel.clone(),
                );
                self.spawn_task(TaskKind::Wisdom, task, cancel, fut);
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.content.cancel();
        let _ = terminal::restore_terminal();
    }
}
