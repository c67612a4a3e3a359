//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that return the `UiEvent` a task completes
//! with. They perform I/O but never touch state; the runtime spawns them and
//! forwards results to the inbox.

use std::sync::Arc;

use coderistic_core::content::ContentRequest;
use coderistic_core::wisdom::{WisdomBackend, WisdomStreamer};
use coderistic_core::Language;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::events::UiEvent;

/// Runs one content activation.
pub async fn load_content(request: ContentRequest) -> UiEvent {
    let post_id = request.post_id().to_string();
    let language = request.language();
    let outcome = request.run().await;
    UiEvent::ContentLoaded {
        post_id,
        language,
        outcome,
    }
}

/// Streams an aphorism, forwarding each accumulated state to the inbox as
/// it arrives.
pub async fn request_wisdom<B>(
    streamer: Arc<WisdomStreamer<B>>,
    task: TaskId,
    language: Language,
    inbox: mpsc::UnboundedSender<UiEvent>,
    cancel: CancellationToken,
) -> UiEvent
where
    B: WisdomBackend + 'static,
{
    let publish = |text: &str| {
        let _ = inbox.send(UiEvent::WisdomProgress {
            task,
            text: text.to_string(),
        });
    };

    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        result = streamer.request(language, publish) => Some(result),
    };
    UiEvent::WisdomFinished { result }
}
