//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! frame ticks, and results sent back by tasks through the runtime inbox.

use coderistic_core::Language;
use coderistic_core::content::ContentOutcome;
use coderistic_core::wisdom::WisdomResult;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Render cadence tick.
    Tick,

    /// Current terminal size, sent before every batch of events.
    Frame { width: u16, height: u16 },

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Wraps a task's result. Dropped unless the task is still active.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// A content fetch resolved for `(post_id, language)`.
    ContentLoaded {
        post_id: String,
        language: Language,
        outcome: ContentOutcome,
    },

    /// Accumulated wisdom text after one more delta.
    WisdomProgress { task: TaskId, text: String },

    /// Wisdom request ended. `None` when the task was cancelled.
    WisdomFinished { result: Option<WisdomResult> },
}
