// src/embed/plugin.rs
// =============================================================================
// Entry point for the host: paste interception plus start/stop.
//
// The host forwards every paste to on_paste(text, editor):
// - plugin stopped, or text is not exactly a commit URL -> PassThrough, the
//   host runs its normal paste
// - otherwise the default paste is suppressed, a decision surface opens with
//   the loading indicator, and the new EmbedPrompt is handed back
//
// The host then drives the fetch with preview() (or spawn_preview() on a
// tokio runtime) and wires the surface's buttons to EmbedPrompt::resolve.
//
// Each paste gets its own prompt; nothing is shared between them and nothing
// survives stop().
// =============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::host::{Editor, SurfaceFactory};
use super::prompt::EmbedPrompt;
use crate::github::{is_commit_url, parse_commit_url, CommitSource};
use crate::render::MessageRenderer;

/// What the host should do with a paste.
pub enum PasteOutcome {
    /// Not ours: run the default paste.
    PassThrough,
    /// Default paste suppressed; a decision is pending on this prompt.
    Intercepted(EmbedPrompt),
}

impl PasteOutcome {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, PasteOutcome::Intercepted(_))
    }
}

pub struct CommitEmbedPlugin {
    source: Arc<dyn CommitSource>,
    renderer: Arc<dyn MessageRenderer>,
    surfaces: Arc<dyn SurfaceFactory>,
    running: AtomicBool,
}

impl CommitEmbedPlugin {
    /// Creates a stopped plugin; call [`start`](Self::start) to begin
    /// intercepting pastes.
    pub fn new(
        source: Arc<dyn CommitSource>,
        renderer: Arc<dyn MessageRenderer>,
        surfaces: Arc<dyn SurfaceFactory>,
    ) -> Self {
        Self {
            source,
            renderer,
            surfaces,
            running: AtomicBool::new(false),
        }
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
        info!("commit embed started");
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("commit embed stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Decides whether to take over a paste of `text` into `editor`.
    pub fn on_paste(&self, text: &str, editor: Box<dyn Editor>) -> PasteOutcome {
        if !self.is_running() || !is_commit_url(text) {
            return PasteOutcome::PassThrough;
        }
        // The strict gate matched, so the permissive parse finds the same URL
        let Some(reference) = parse_commit_url(text) else {
            return PasteOutcome::PassThrough;
        };

        debug!(commit = %reference, "intercepted commit URL paste");
        let surface = self.surfaces.open(text);
        PasteOutcome::Intercepted(EmbedPrompt::open(
            text.to_string(),
            reference,
            surface,
            editor,
        ))
    }

    /// Loads the preview for `prompt` in place.
    pub async fn preview(&self, prompt: &EmbedPrompt) {
        prompt
            .load(self.source.as_ref(), self.renderer.as_ref())
            .await;
    }

    /// Loads the preview on a tokio task so the paste handler can return.
    pub fn spawn_preview(&self, prompt: &EmbedPrompt) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let renderer = Arc::clone(&self.renderer);
        let prompt = prompt.clone();
        tokio::spawn(async move {
            prompt.load(source.as_ref(), renderer.as_ref()).await;
        })
    }
}
