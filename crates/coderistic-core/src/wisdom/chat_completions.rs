//! OpenAI-compatible chat completions backend.

use std::collections::VecDeque;
use std::pin::Pin;

use anyhow::Result;
use eventsource_stream::{EventStream, Eventsource};
use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use super::shared::{api_key_from_env, resolve_base_url};
use super::{DeltaStream, WisdomBackend, instruction};
use crate::config::WisdomConfig;
use crate::error::{FetchError, FetchResult, classify_reqwest_error};
use crate::language::Language;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const TEMPERATURE: f32 = 0.8;

/// Chat completions configuration.
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    /// `None` when no usable credential was found
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl ChatCompletionsConfig {
    /// Builds a configuration from the `[wisdom]` section and environment.
    ///
    /// A missing API key is not an error here; it is reported when a
    /// request is attempted.
    ///
    /// # Errors
    /// Returns an error if the base URL is malformed.
    pub fn from_config(config: &WisdomConfig) -> Result<Self> {
        Ok(Self {
            api_key: api_key_from_env(config.api_key.as_deref()),
            base_url: resolve_base_url(config.effective_base_url(), DEFAULT_BASE_URL)?,
            model: config.model.clone(),
        })
    }
}

/// Streams wisdom from an OpenAI-compatible endpoint.
pub struct ChatCompletionsBackend {
    config: ChatCompletionsConfig,
    http: reqwest::Client,
}

impl ChatCompletionsBackend {
    pub fn new(config: ChatCompletionsConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn send(&self, language: Language) -> FetchResult<DeltaStream> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(FetchError::configuration(
                "No API key available. Set CODERISTIC_API_KEY or api_key in [wisdom].",
            ));
        };

        let prompt = instruction(language);
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![RequestMessage {
                role: "user",
                content: &prompt,
            }],
            stream: true,
            temperature: TEMPERATURE,
        };

        let url = format!("{}{}", self.config.base_url, CHAT_COMPLETIONS_PATH);
        let response = self
            .http
            .post(&url)
            .headers(build_headers(api_key))
            .json(&request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(FetchError::http_status(status.as_u16(), &error_body));
        }

        Ok(ChatCompletionsSseParser::new(response.bytes_stream()).boxed())
    }
}

impl WisdomBackend for ChatCompletionsBackend {
    fn open(
        &self,
        language: Language,
    ) -> impl Future<Output = FetchResult<DeltaStream>> + Send {
        self.send(language)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    stream: bool,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("text/event-stream"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers
}

/// Appends a blank line after the body so a final unterminated event still
/// gets dispatched by the SSE decoder.
struct SseTerminatedStream<S> {
    inner: S,
    emitted_terminator: bool,
}

impl<S> SseTerminatedStream<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            emitted_terminator: false,
        }
    }
}

impl<S, E> Stream for SseTerminatedStream<S>
where
    S: Stream<Item = std::result::Result<bytes::Bytes, E>> + Unpin,
{
    type Item = std::result::Result<bytes::Bytes, E>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        use std::task::Poll;

        if self.emitted_terminator {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(item)) => Poll::Ready(Some(item)),
            Poll::Ready(None) => {
                self.emitted_terminator = true;
                Poll::Ready(Some(Ok(bytes::Bytes::from_static(b"\n\n"))))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Turns chat completion SSE events into text deltas.
///
/// The first error ends the stream.
struct ChatCompletionsSseParser<S> {
    inner: EventStream<SseTerminatedStream<S>>,
    pending: VecDeque<String>,
    finished: bool,
}

impl<S> ChatCompletionsSseParser<S> {
    fn new<E>(stream: S) -> Self
    where
        S: Stream<Item = std::result::Result<bytes::Bytes, E>> + Unpin,
    {
        Self {
            inner: SseTerminatedStream::new(stream).eventsource(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn handle_event_data(&mut self, data: &str) -> FetchResult<()> {
        let trimmed = data.trim();
        if trimmed.is_empty() || trimmed == "[DONE]" {
            return Ok(());
        }

        let value = serde_json::from_str::<Value>(trimmed)
            .map_err(|err| FetchError::transport(format!("Failed to parse SSE JSON: {err}")))?;

        if let Some(error) = value.get("error") {
            let error_type = error
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("error");
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            return Err(FetchError::api_error(error_type, message));
        }

        let content = value
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("delta"))
            .and_then(|delta| delta.get("content"))
            .and_then(Value::as_str);

        if let Some(text) = content
            && !text.is_empty()
        {
            self.pending.push_back(text.to_string());
        }
        Ok(())
    }
}

impl<S, E> Stream for ChatCompletionsSseParser<S>
where
    S: Stream<Item = std::result::Result<bytes::Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    type Item = FetchResult<String>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        use std::task::Poll;

        loop {
            if let Some(delta) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(delta)));
            }
            if self.finished {
                return Poll::Ready(None);
            }

            let inner = Pin::new(&mut self.inner);
            match inner.poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => {
                    if let Err(err) = self.handle_event_data(&event.data) {
                        self.finished = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    self.finished = true;
                    return Poll::Ready(Some(Err(FetchError::transport(format!(
                        "SSE stream error: {e}"
                    )))));
                }
                Poll::Ready(None) => {
                    self.finished = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
