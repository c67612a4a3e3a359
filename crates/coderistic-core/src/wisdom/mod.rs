//! Wisdom streamer: a one-sentence aphorism revealed as it streams in.
//!
//! `WisdomStreamer::request` folds a stream of text deltas into a growing
//! string and hands every intermediate state to a `publish` callback before
//! awaiting the next delta. Failures never escape: they become one of two
//! fixed fallback aphorisms plus a log entry.

pub mod chat_completions;
pub mod shared;

use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use crate::error::{FetchError, FetchErrorKind, FetchResult};
use crate::language::Language;

pub use chat_completions::{ChatCompletionsBackend, ChatCompletionsConfig};

/// Incremental text pieces in arrival order.
pub type DeltaStream = BoxStream<'static, FetchResult<String>>;

/// Source of wisdom deltas.
pub trait WisdomBackend: Send + Sync {
    /// Opens a delta stream for `language`.
    ///
    /// Returns a `Configuration` error without touching the network when
    /// no credential is available.
    fn open(&self, language: Language) -> impl Future<Output = FetchResult<DeltaStream>> + Send;
}

/// The fixed request text, parameterized only by language.
pub fn instruction(language: Language) -> String {
    format!(
        "You are an ancient, tech-savvy sage. Respond in {} with a poetic, short, and \
         profound sentence. Offer a single, powerful \"Pearl of Wisdom\" in one sentence \
         that a 100-year-old philosopher might say to a young coder.",
        language.display_name()
    )
}

/// Shown when the stream completed without any text.
pub fn empty_fallback(language: Language) -> &'static str {
    match language {
        Language::En => "Silence is the truest wisdom.",
        Language::Kh => "ភាពស្ងប់ស្ងាត់គឺជាប្រាជ្ញាពិត។",
    }
}

/// Shown for configuration or transport failures.
pub fn failure_fallback(language: Language) -> &'static str {
    match language {
        Language::En => "Wisdom is found within, not in the machine.",
        Language::Kh => "ប្រាជ្ញាត្រូវបានរកឃើញនៅខាងក្នុង មិនមែននៅក្នុងម៉ាស៊ីនទេ។",
    }
}

/// How a wisdom request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WisdomEnd {
    /// At least one character arrived
    Streamed,
    /// Stream completed with no text
    Empty,
    /// No usable credential; no request was sent
    Unconfigured,
    /// Send or consumption failed
    Failed,
}

/// Final text for the wisdom slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WisdomResult {
    pub text: String,
    pub end: WisdomEnd,
}

pub struct WisdomStreamer<B> {
    backend: B,
}

impl<B: WisdomBackend> WisdomStreamer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Requests one aphorism.
    ///
    /// `publish` is called with the accumulated text after every non-empty
    /// delta, in arrival order. Each call starts from an empty accumulator.
    pub async fn request<F>(&self, language: Language, mut publish: F) -> WisdomResult
    where
        F: FnMut(&str),
    {
        let mut stream = match self.backend.open(language).await {
            Ok(stream) => stream,
            Err(err) => return fail(language, &err),
        };

        let mut text = String::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(delta) if delta.is_empty() => {}
                Ok(delta) => {
                    text.push_str(&delta);
                    publish(&text);
                }
                Err(err) => return fail(language, &err),
            }
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!(%language, "wisdom stream completed empty");
            return WisdomResult {
                text: empty_fallback(language).to_string(),
                end: WisdomEnd::Empty,
            };
        }

        WisdomResult {
            text: trimmed.to_string(),
            end: WisdomEnd::Streamed,
        }
    }
}

fn fail(language: Language, err: &FetchError) -> WisdomResult {
    let end = if err.kind == FetchErrorKind::Configuration {
        tracing::warn!(%language, error = %err, "wisdom backend not configured");
        WisdomEnd::Unconfigured
    } else {
        tracing::error!(
            %language,
            error = %err,
            details = err.details.as_deref().unwrap_or(""),
            "Wisdom stream failed"
        );
        WisdomEnd::Failed
    };
    WisdomResult {
        text: failure_fallback(language).to_string(),
        end,
    }
}

/// The wisdom card's state inside a post view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WisdomSlot {
    /// `None` until first requested
    pub text: Option<String>,
    pub loading: bool,
}

impl WisdomSlot {
    /// Starts a request. Returns false (and changes nothing) while one is
    /// already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.text = None;
        true
    }

    pub fn publish(&mut self, text: &str) {
        if self.loading {
            self.text = Some(text.to_string());
        }
    }

    pub fn finish(&mut self, result: WisdomResult) {
        self.text = Some(result.text);
        self.loading = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use futures_util::stream;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Replays scripted delta streams, one per `open` call.
    struct ScriptedBackend {
        scripts: Mutex<Vec<FetchResult<Vec<FetchResult<String>>>>>,
    }

    impl ScriptedBackend {
        fn new(scripts: Vec<FetchResult<Vec<FetchResult<String>>>>) -> Self {
            Self {
                scripts: Mutex::new(scripts.into_iter().rev().collect()),
            }
        }
    }

    impl WisdomBackend for ScriptedBackend {
        fn open(
            &self,
            _language: Language,
        ) -> impl Future<Output = FetchResult<DeltaStream>> + Send {
            let next = self.scripts.lock().unwrap().pop().expect("script exhausted");
            async move { next.map(|items| stream::iter(items).boxed()) }
        }
    }

    fn ok(deltas: &[&str]) -> FetchResult<Vec<FetchResult<String>>> {
        Ok(deltas.iter().map(|d| Ok((*d).to_string())).collect())
    }

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_publishes_each_accumulated_state() {
        let streamer =
            WisdomStreamer::new(ScriptedBackend::new(vec![ok(&["Si", "lence ", "is truth."])]));
        let mut published = Vec::new();
        let result = streamer
            .request(Language::En, |text| published.push(text.to_string()))
            .await;

        assert_eq!(published, ["Si", "Silence ", "Silence is truth."]);
        assert_eq!(result.text, "Silence is truth.");
        assert_eq!(result.end, WisdomEnd::Streamed);
    }

    #[tokio::test]
    async fn test_sequential_requests_do_not_concatenate() {
        let streamer = WisdomStreamer::new(ScriptedBackend::new(vec![
            ok(&["First ", "answer."]),
            ok(&["Second."]),
        ]));
        let mut slot = WisdomSlot::default();

        assert!(slot.begin());
        let first = streamer.request(Language::En, |t| slot.publish(t)).await;
        slot.finish(first);
        assert_eq!(slot.text.as_deref(), Some("First answer."));

        assert!(slot.begin());
        let mut published = Vec::new();
        let second = streamer
            .request(Language::En, |t| published.push(t.to_string()))
            .await;
        slot.finish(second);
        assert_eq!(published, ["Second."]);
        assert_eq!(slot.text.as_deref(), Some("Second."));
    }

    #[tokio::test]
    async fn test_empty_stream_uses_empty_fallback() {
        let streamer = WisdomStreamer::new(ScriptedBackend::new(vec![ok(&[]), ok(&["", "  "])]));

        let result = streamer.request(Language::Kh, |_| {}).await;
        assert_eq!(result.end, WisdomEnd::Empty);
        assert_eq!(result.text, empty_fallback(Language::Kh));

        let result = streamer.request(Language::En, |_| {}).await;
        assert_eq!(result.end, WisdomEnd::Empty);
        assert_eq!(result.text, empty_fallback(Language::En));
    }

    #[tokio::test]
    async fn test_mid_stream_failure_clears_loading_and_logs() {
        let streamer = WisdomStreamer::new(ScriptedBackend::new(vec![Ok(vec![
            Ok("Partial ".to_string()),
            Err(FetchError::transport("connection reset by peer")),
            Ok("never seen".to_string()),
        ])]));

        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut slot = WisdomSlot::default();
        assert!(slot.begin());
        let result = streamer.request(Language::En, |t| slot.publish(t)).await;
        assert_eq!(slot.text.as_deref(), Some("Partial "));
        slot.finish(result);

        assert!(!slot.loading);
        assert_eq!(slot.text.as_deref(), Some(failure_fallback(Language::En)));

        let logs = String::from_utf8(writer.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("connection reset by peer"), "logs: {logs}");
        assert!(logs.contains("ERROR"));
    }

    #[tokio::test]
    async fn test_configuration_error_is_unconfigured() {
        let streamer = WisdomStreamer::new(ScriptedBackend::new(vec![Err(
            FetchError::configuration("no key"),
        )]));
        let result = streamer.request(Language::Kh, |_| {}).await;
        assert_eq!(result.end, WisdomEnd::Unconfigured);
        assert_eq!(result.text, failure_fallback(Language::Kh));
    }

    #[test]
    fn test_slot_gates_reentry() {
        let mut slot = WisdomSlot::default();
        assert!(slot.begin());
        assert!(!slot.begin());
        slot.finish(WisdomResult {
            text: "done".to_string(),
            end: WisdomEnd::Streamed,
        });
        assert!(slot.begin());
        assert_eq!(slot.text, None);
    }

    #[test]
    fn test_slot_ignores_publish_when_idle() {
        let mut slot = WisdomSlot::default();
        slot.publish("late");
        assert_eq!(slot.text, None);
    }

    #[test]
    fn test_instruction_varies_only_by_language() {
        assert!(instruction(Language::En).contains("English"));
        assert!(instruction(Language::Kh).contains("Khmer"));
        assert_ne!(empty_fallback(Language::En), failure_fallback(Language::En));
    }
}
