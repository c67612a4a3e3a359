//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── route: Route            (which view is showing)
//! │   ├── essays: EssaysState     (list selection)
//! │   ├── persona: PersonaState   (link selection)
//! │   ├── reader: ReaderState     (content + wisdom slots, scroll)
//! │   ├── task_seq: TaskSeq       (async task id generator)
//! │   └── tasks: Tasks            (task lifecycle state)
//! └── overlay: Option<Overlay>    (search)
//! ```
//!
//! Overlays live beside `TuiState` so overlay handlers can take `&mut self`
//! and `&TuiState` at the same time.

use coderistic_core::config::Config;
use coderistic_core::strings::UiStrings;
use coderistic_core::{Catalog, Language, Post, Theme};

use crate::common::{TaskSeq, Tasks};
use crate::mutations::Route;
use crate::overlays::Overlay;
use crate::theme::Palette;
use crate::views::essays::EssaysState;
use crate::views::persona::PersonaState;
use crate::views::post::ReaderState;

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            tui: TuiState::new(config, catalog),
            overlay: None,
        }
    }
}

/// Terminal size as of the last `Frame` event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// TUI application state (non-overlay).
pub struct TuiState {
    pub should_quit: bool,
    pub config: Config,
    pub catalog: Catalog,
    pub route: Route,
    pub language: Language,
    pub theme: Theme,
    pub essays: EssaysState,
    pub persona: PersonaState,
    pub reader: ReaderState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Advances every tick; drives loading spinners.
    pub spinner_frame: usize,
    pub viewport: Viewport,
}

impl TuiState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            should_quit: false,
            language: config.language,
            theme: config.theme,
            config,
            catalog,
            route: Route::Essays,
            essays: EssaysState::default(),
            persona: PersonaState::default(),
            reader: ReaderState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            viewport: Viewport::default(),
        }
    }

    pub fn strings(&self) -> &'static UiStrings {
        UiStrings::for_language(self.language)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    /// The post being read, if the post view is showing.
    pub fn current_post(&self) -> Option<&Post> {
        match &self.route {
            Route::Post { id } => self.catalog.find(id),
            Route::Essays | Route::Persona => None,
        }
    }
}
