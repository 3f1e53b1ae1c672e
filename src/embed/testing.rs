// In-memory stand-ins for the host and the API, shared by the embed tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use super::host::{DecisionSurface, Editor, SurfaceFactory};
use crate::github::{
    CommitAuthor, CommitData, CommitSource, CommitStats, FetchError, MalformedResponse,
    ParsedUrlRef,
};
use crate::render::{MarkdownRenderer, MessageRenderer, RenderContext};

pub const SHA: &str = "37f48bffd26329505282d72c1e1ab8298fdc438c";

pub fn commit_url() -> String {
    format!("https://github.com/owner/repo/commit/{}", SHA)
}

pub fn reference() -> ParsedUrlRef {
    ParsedUrlRef {
        owner: "owner".to_string(),
        repo: "repo".to_string(),
        sha: SHA.to_string(),
    }
}

pub fn sample_commit() -> CommitData {
    CommitData {
        sha: SHA.to_string(),
        message: "Fix **bug**".to_string(),
        author: CommitAuthor {
            login: "jane".to_string(),
            avatar_url: String::new(),
        },
        date: "2024-01-05T10:00:00Z".to_string(),
        stats: CommitStats {
            additions: 0,
            deletions: 0,
        },
        url: commit_url(),
        owner: "owner".to_string(),
        repo: "repo".to_string(),
    }
}

/// Editor whose "document" is the list of inserted texts.
#[derive(Clone, Default)]
pub struct RecordingEditor {
    pub inserted: Arc<Mutex<Vec<String>>>,
}

impl RecordingEditor {
    pub fn inserted(&self) -> Vec<String> {
        self.inserted.lock().unwrap().clone()
    }
}

impl Editor for RecordingEditor {
    fn replace_selection(&mut self, text: &str) {
        self.inserted.lock().unwrap().push(text.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Loading,
    Preview(String),
    Error(String),
    Cleared,
    Closed,
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl DecisionSurface for RecordingSurface {
    fn show_loading(&mut self) {
        self.push(SurfaceEvent::Loading);
    }

    fn show_preview(&mut self, card_html: &str) {
        self.push(SurfaceEvent::Preview(card_html.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.push(SurfaceEvent::Error(message.to_string()));
    }

    fn clear(&mut self) {
        self.push(SurfaceEvent::Cleared);
    }

    fn close(&mut self) {
        self.push(SurfaceEvent::Closed);
    }
}

/// Hands out recording surfaces and keeps a copy of each.
#[derive(Clone, Default)]
pub struct RecordingSurfaces {
    pub opened: Arc<Mutex<Vec<RecordingSurface>>>,
}

impl RecordingSurfaces {
    pub fn opened(&self) -> Vec<RecordingSurface> {
        self.opened.lock().unwrap().clone()
    }
}

impl SurfaceFactory for RecordingSurfaces {
    fn open(&self, _pasted: &str) -> Box<dyn DecisionSurface> {
        let surface = RecordingSurface::default();
        self.opened.lock().unwrap().push(surface.clone());
        Box::new(surface)
    }
}

/// Always answers with the same outcome.
pub enum StaticSource {
    Commit(CommitData),
    NotFound,
    Malformed,
}

#[async_trait]
impl CommitSource for StaticSource {
    async fn fetch(&self, _reference: &ParsedUrlRef) -> Result<CommitData, FetchError> {
        match self {
            StaticSource::Commit(commit) => Ok(commit.clone()),
            StaticSource::NotFound => Err(FetchError::Api { status: 404 }),
            StaticSource::Malformed => Err(MalformedResponse("missing `sha`".to_string()).into()),
        }
    }
}

/// Holds the fetch open until the test releases it.
pub struct GatedSource {
    started: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedSource {
    /// Returns the source, a receiver that fires once the fetch has started,
    /// and the sender that lets it finish.
    pub fn new() -> (Self, oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let source = Self {
            started: Mutex::new(Some(started_tx)),
            release: Mutex::new(Some(release_rx)),
        };
        (source, started_rx, release_tx)
    }
}

#[async_trait]
impl CommitSource for GatedSource {
    async fn fetch(&self, _reference: &ParsedUrlRef) -> Result<CommitData, FetchError> {
        if let Some(started) = self.started.lock().unwrap().take() {
            let _ = started.send(());
        }
        let release = self.release.lock().unwrap().take();
        if let Some(release) = release {
            let _ = release.await;
        }
        Ok(sample_commit())
    }
}

/// Counts fetches and yields once before answering, so overlapping loads
/// really do overlap.
#[derive(Default)]
pub struct CountingSource {
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitSource for CountingSource {
    async fn fetch(&self, _reference: &ParsedUrlRef) -> Result<CommitData, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(sample_commit())
    }
}

/// Markdown renderer that counts acquired and released contexts.
#[derive(Clone, Default)]
pub struct CountingRenderer {
    markdown: MarkdownRenderer,
    pub acquired: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
}

impl CountingRenderer {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct CountingContext<'a> {
    inner: Box<dyn RenderContext + 'a>,
    released: Arc<AtomicUsize>,
}

impl RenderContext for CountingContext<'_> {
    fn render(&mut self, markdown: &str) -> String {
        self.inner.render(markdown)
    }
}

impl Drop for CountingContext<'_> {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl MessageRenderer for CountingRenderer {
    fn acquire(&self) -> Box<dyn RenderContext + '_> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Box::new(CountingContext {
            inner: self.markdown.acquire(),
            released: Arc::clone(&self.released),
        })
    }
}
