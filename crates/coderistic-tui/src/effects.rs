//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Task effects carry the token the reducer registered for them, so a task
//! is cancellable from the moment it is requested. Cancellation is initiated
//! from the reducer via `UiEffect::CancelTask`; the runtime calls
//! `token.cancel()` on the provided token.

use coderistic_core::{Language, Post};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the markdown for `post` in `language`.
    ///
    /// Supersedes any content fetch already in flight.
    LoadContent {
        task: TaskId,
        post: Box<Post>,
        language: Language,
        cancel: CancellationToken,
    },

    /// Stream an aphorism in `language`.
    RequestWisdom {
        task: TaskId,
        language: Language,
        cancel: CancellationToken,
    },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },
}
