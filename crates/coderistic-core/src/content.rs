//! Content loader: fetches a post body for the active language.
//!
//! Each activation of a (post, language) pair owns a `CancellationToken`.
//! Activating a new pair cancels the previous token first, so a slow fetch
//! for an old pair resolves to `Cancelled` and never overwrites the slot.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::catalog::{Post, bundled_content};
use crate::error::{FetchError, FetchResult, classify_reqwest_error};
use crate::language::Language;

/// Text shown when a fetch fails for any reason other than cancellation.
pub const CONTENT_FALLBACK: &str = "Failed to load the fragment from the void.";

/// Where a content URL actually points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTarget {
    /// Essay body compiled into the binary
    Bundled(&'static str),
    File(PathBuf),
    Http(Url),
}

/// Resolves a catalog URL against an optional base.
///
/// Relative URLs without a base are looked up in the bundled essays.
///
/// # Errors
/// Returns a transport error for malformed URLs, unsupported schemes, or
/// relative URLs that match neither a base nor a bundled essay.
pub fn resolve_target(raw: &str, base: Option<&Url>) -> FetchResult<ContentTarget> {
    match Url::parse(raw) {
        Ok(url) => target_from_url(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => {
                let joined = base
                    .join(raw)
                    .map_err(|e| FetchError::transport(format!("Invalid content URL {raw}: {e}")))?;
                target_from_url(joined)
            }
            None => bundled_content(raw).map(ContentTarget::Bundled).ok_or_else(|| {
                FetchError::transport(format!(
                    "No content_base_url configured for relative URL {raw}"
                ))
            }),
        },
        Err(e) => Err(FetchError::transport(format!(
            "Invalid content URL {raw}: {e}"
        ))),
    }
}

fn target_from_url(url: Url) -> FetchResult<ContentTarget> {
    match url.scheme() {
        "http" | "https" => Ok(ContentTarget::Http(url)),
        "file" => url
            .to_file_path()
            .map(ContentTarget::File)
            .map_err(|()| FetchError::transport(format!("Invalid file URL: {url}"))),
        scheme => Err(FetchError::transport(format!(
            "Unsupported content URL scheme: {scheme}"
        ))),
    }
}

async fn fetch_text(http: &reqwest::Client, target: ContentTarget) -> FetchResult<String> {
    match target {
        ContentTarget::Bundled(text) => Ok(text.to_string()),
        ContentTarget::File(path) => tokio::fs::read_to_string(&path).await.map_err(|e| {
            FetchError::transport(format!("Failed to read {}: {e}", path.display()))
        }),
        ContentTarget::Http(url) => {
            let response = http.get(url).send().await.map_err(classify_reqwest_error)?;

            let status = response.status();
            if !status.is_success() {
                let error_body = response.text().await.unwrap_or_default();
                return Err(FetchError::http_status(status.as_u16(), &error_body));
            }

            response.text().await.map_err(classify_reqwest_error)
        }
    }
}

/// Result of one activation's fetch.
#[derive(Debug, Clone)]
pub enum ContentOutcome {
    Loaded(String),
    Failed(FetchError),
    /// Superseded by a newer activation; must not touch the slot.
    Cancelled,
}

/// Issues content requests, cancelling the previous one on each activation.
pub struct ContentLoader {
    http: reqwest::Client,
    base: Option<Url>,
    current: Option<CancellationToken>,
}

impl ContentLoader {
    pub fn new(base: Option<Url>) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(http: reqwest::Client, base: Option<Url>) -> Self {
        Self {
            http,
            base,
            current: None,
        }
    }

    /// Starts a new activation for `(post, language)`.
    ///
    /// Cancels the previous activation before the new request exists.
    pub fn activate(&mut self, post: &Post, language: Language) -> ContentRequest {
        self.activate_with(post, language, CancellationToken::new())
    }

    /// Like [`ContentLoader::activate`], bound to a token the caller already
    /// holds.
    pub fn activate_with(
        &mut self,
        post: &Post,
        language: Language,
        cancel: CancellationToken,
    ) -> ContentRequest {
        self.cancel();
        self.current = Some(cancel.clone());
        ContentRequest {
            http: self.http.clone(),
            base: self.base.clone(),
            url: post.content_url(language).to_string(),
            post_id: post.id.clone(),
            language,
            cancel,
        }
    }

    /// Cancels the current activation, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

impl Drop for ContentLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A single fetch bound to one activation.
#[derive(Debug)]
pub struct ContentRequest {
    http: reqwest::Client,
    base: Option<Url>,
    url: String,
    post_id: String,
    language: Language,
    cancel: CancellationToken,
}

impl ContentRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Runs the fetch to completion, failure, or cancellation.
    ///
    /// Failures are logged here; the caller only sees the outcome.
    pub async fn run(self) -> ContentOutcome {
        let result = match resolve_target(&self.url, self.base.as_ref()) {
            Ok(target) => {
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => Err(FetchError::cancelled()),
                    result = fetch_text(&self.http, target) => result,
                }
            }
            Err(err) => Err(err),
        };

        // A result that raced with cancellation still belongs to a dead activation.
        let result = if self.cancel.is_cancelled() {
            Err(FetchError::cancelled())
        } else {
            result
        };

        match result {
            Ok(text) => ContentOutcome::Loaded(text),
            Err(err) if err.is_cancelled() => ContentOutcome::Cancelled,
            Err(err) => {
                tracing::error!(
                    post = %self.post_id,
                    language = %self.language,
                    url = %self.url,
                    error = %err,
                    "Failed to load markdown"
                );
                ContentOutcome::Failed(err)
            }
        }
    }
}

/// The "current content" slot owned by a post view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSlot {
    pub text: String,
    pub loading: bool,
}

impl ContentSlot {
    /// Marks a new activation as in flight.
    pub fn begin(&mut self) {
        self.text.clear();
        self.loading = true;
    }

    /// Applies an outcome. Returns false if the slot was left untouched.
    pub fn apply(&mut self, outcome: ContentOutcome) -> bool {
        match outcome {
            ContentOutcome::Cancelled => false,
            ContentOutcome::Loaded(text) => {
                self.text = text;
                self.loading = false;
                true
            }
            ContentOutcome::Failed(_) => {
                self.text = CONTENT_FALLBACK.to_string();
                self.loading = false;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn can_bind_localhost() -> bool {
        std::net::TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn post_with_urls(en: &str, kh: &str) -> Post {
        Post {
            id: "p".to_string(),
            title: "Title".to_string(),
            title_kh: "Title kh".to_string(),
            date: "Today".to_string(),
            reading_time: "1 min read".to_string(),
            excerpt: String::new(),
            excerpt_kh: String::new(),
            tags: Vec::new(),
            content_url: en.to_string(),
            content_url_kh: kh.to_string(),
        }
    }

    fn base_for(server: &MockServer) -> Option<Url> {
        Some(Url::parse(&format!("{}/", server.uri())).unwrap())
    }

    #[tokio::test]
    async fn test_loaded_body_is_stored_verbatim() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/en.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Hi\n\n  raw *text*  "))
            .expect(1)
            .mount(&server)
            .await;

        let mut loader = ContentLoader::new(base_for(&server));
        let post = post_with_urls("en.md", "kh.md");
        let mut slot = ContentSlot::default();
        slot.begin();

        let outcome = loader.activate(&post, Language::En).run().await;
        assert!(slot.apply(outcome));
        assert_eq!(slot.text, "# Hi\n\n  raw *text*  ");
        assert!(!slot.loading);
    }

    #[tokio::test]
    async fn test_non_success_status_uses_fallback() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let mut loader = ContentLoader::new(base_for(&server));
        let post = post_with_urls("en.md", "kh.md");
        let mut slot = ContentSlot::default();
        slot.begin();

        let outcome = loader.activate(&post, Language::En).run().await;
        assert!(matches!(outcome, ContentOutcome::Failed(_)));
        slot.apply(outcome);
        assert_eq!(slot.text, CONTENT_FALLBACK);
        assert!(!slot.loading);
    }

    /// A slow fetch for the old language must never win over the new one.
    #[tokio::test]
    async fn test_latest_activation_wins_race() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow-en.md"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("english")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast-kh.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("khmer"))
            .mount(&server)
            .await;

        let mut loader = ContentLoader::new(base_for(&server));
        let post = post_with_urls("slow-en.md", "fast-kh.md");
        let mut slot = ContentSlot::default();

        slot.begin();
        let first = tokio::spawn(loader.activate(&post, Language::En).run());
        tokio::time::sleep(Duration::from_millis(50)).await;

        slot.begin();
        let second = loader.activate(&post, Language::Kh).run().await;
        slot.apply(second);

        let first = first.await.unwrap();
        assert!(matches!(first, ContentOutcome::Cancelled));
        assert!(!slot.apply(first));
        assert_eq!(slot.text, "khmer");
    }

    #[tokio::test]
    async fn test_cancelled_outcome_leaves_slot_untouched() {
        let mut slot = ContentSlot {
            text: "previous".to_string(),
            loading: true,
        };
        assert!(!slot.apply(ContentOutcome::Cancelled));
        assert_eq!(slot.text, "previous");
        assert!(slot.loading);
    }

    #[tokio::test]
    async fn test_request_cancelled_before_run_resolves_cancelled() {
        let mut loader = ContentLoader::new(None);
        let post = post_with_urls("contents/quiet-code-en.md", "contents/quiet-code-kh.md");
        let request = loader.activate(&post, Language::En);
        loader.cancel();
        assert!(matches!(request.run().await, ContentOutcome::Cancelled));
    }

    #[tokio::test]
    async fn test_dropping_loader_cancels_current_request() {
        let mut loader = ContentLoader::new(None);
        let post = post_with_urls("contents/quiet-code-en.md", "contents/quiet-code-kh.md");
        let token = CancellationToken::new();
        let request = loader.activate_with(&post, Language::En, token.clone());
        drop(loader);
        assert!(token.is_cancelled());
        assert!(matches!(request.run().await, ContentOutcome::Cancelled));
    }

    #[tokio::test]
    async fn test_bundled_content_without_base() {
        let mut loader = ContentLoader::new(None);
        let post = post_with_urls("contents/quiet-code-en.md", "contents/quiet-code-kh.md");
        match loader.activate(&post, Language::Kh).run().await {
            ContentOutcome::Loaded(text) => assert!(text.starts_with("# ")),
            other => panic!("expected bundled content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_relative_url_without_base_fails() {
        let mut loader = ContentLoader::new(None);
        let post = post_with_urls("missing.md", "missing-kh.md");
        assert!(matches!(
            loader.activate(&post, Language::En).run().await,
            ContentOutcome::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_file_base_reads_from_disk() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("essay.md"), "> from disk").unwrap();
        let base = Url::from_directory_path(dir.path()).unwrap();

        let mut loader = ContentLoader::new(Some(base));
        let post = post_with_urls("essay.md", "essay-kh.md");
        match loader.activate(&post, Language::En).run().await {
            ContentOutcome::Loaded(text) => assert_eq!(text, "> from disk"),
            other => panic!("expected file content, got {other:?}"),
        }
        assert!(matches!(
            loader.activate(&post, Language::Kh).run().await,
            ContentOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_resolve_target_rejects_unknown_scheme() {
        assert!(resolve_target("ftp://example.com/a.md", None).is_err());
        assert!(matches!(
            resolve_target("https://example.com/a.md", None),
            Ok(ContentTarget::Http(_))
        ));
    }
}
