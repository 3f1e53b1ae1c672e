// src/embed/prompt.rs
// =============================================================================
// The decision flow behind one intercepted paste.
//
// State machine:
//
//   Loading --fetch ok--> PreviewReady --+
//      |                                  |
//      +--fetch err--> PreviewError ------+--resolve(Embed|Text|Cancel)--> Closed
//      |                                  |
//      +-------resolve(Text|Cancel)-------+
//
// - open() puts the loading indicator on the surface right away
// - load() runs the single fetch, renders the message and the card; only the
//   first call fetches, overlapping or later calls return right away
// - resolve() applies the user's choice; Embed does nothing until a commit
//   was actually loaded
// - Closing clears and closes the surface and drops the commit
//
// There is no way to cancel a fetch already in flight. Instead load() checks
// the state again once the fetch returns, and a prompt that was closed in the
// meantime is left alone.
// =============================================================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use super::host::{DecisionSurface, Editor};
use crate::github::{CommitData, CommitSource, ParsedUrlRef};
use crate::render::{generate_card, render_message, MessageRenderer};

/// Inserted after an embedded card so typing continues below it.
pub const CARD_SUFFIX: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Loading,
    PreviewReady,
    PreviewError,
    Closed,
}

/// The user's answer on the decision surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Insert the generated card.
    Embed,
    /// Insert the pasted URL unchanged.
    Text,
    /// Insert nothing. Dismissing the surface counts as this.
    Cancel,
}

/// Handle to one open decision. Clones share the same prompt, so the host
/// can resolve it while a clone is still loading.
#[derive(Clone)]
pub struct EmbedPrompt {
    inner: Arc<Mutex<PromptInner>>,
}

struct PromptInner {
    state: PromptState,
    pasted: String,
    reference: ParsedUrlRef,
    fetch_started: bool,
    commit: Option<CommitData>,
    card_html: Option<String>,
    surface: Box<dyn DecisionSurface>,
    editor: Box<dyn Editor>,
}

impl EmbedPrompt {
    /// Starts a decision for `pasted` and shows the loading indicator.
    pub fn open(
        pasted: String,
        reference: ParsedUrlRef,
        mut surface: Box<dyn DecisionSurface>,
        editor: Box<dyn Editor>,
    ) -> Self {
        surface.show_loading();
        debug!(commit = %reference, "prompt opened, loading");

        Self {
            inner: Arc::new(Mutex::new(PromptInner {
                state: PromptState::Loading,
                pasted,
                reference,
                fetch_started: false,
                commit: None,
                card_html: None,
                surface,
                editor,
            })),
        }
    }

    // A panic elsewhere must not wedge the prompt; the data is still usable.
    fn lock(&self) -> MutexGuard<'_, PromptInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> PromptState {
        self.lock().state
    }

    pub fn reference(&self) -> ParsedUrlRef {
        self.lock().reference.clone()
    }

    /// The loaded commit, while the prompt is open.
    pub fn commit(&self) -> Option<CommitData> {
        self.lock().commit.clone()
    }

    /// The generated card, while the prompt is open.
    pub fn card_html(&self) -> Option<String> {
        self.lock().card_html.clone()
    }

    /// Fetches the commit and shows either the card or the error.
    ///
    /// Only the first call on a `Loading` prompt fetches. Calling it again,
    /// while that fetch is in flight or afterwards, or on a closed prompt,
    /// does nothing.
    pub async fn load(&self, source: &dyn CommitSource, renderer: &dyn MessageRenderer) {
        let reference = {
            let mut inner = self.lock();
            if inner.state != PromptState::Loading || inner.fetch_started {
                return;
            }
            inner.fetch_started = true;
            inner.reference.clone()
        };

        let result = source.fetch(&reference).await;

        let mut inner = self.lock();
        if inner.state != PromptState::Loading {
            debug!(
                commit = %reference,
                state = ?inner.state,
                "prompt closed during fetch, dropping result"
            );
            return;
        }

        match result {
            Ok(commit) => {
                let message_html = render_message(renderer, &commit.message);
                let card = generate_card(&commit, &message_html);
                inner.surface.show_preview(&card);
                inner.commit = Some(commit);
                inner.card_html = Some(card);
                inner.state = PromptState::PreviewReady;
                debug!(commit = %reference, "preview ready");
            }
            Err(e) => {
                warn!(commit = %reference, status = ?e.status(), "could not load commit: {}", e);
                inner
                    .surface
                    .show_error(&format!("Failed to load commit: {}", e));
                inner.state = PromptState::PreviewError;
            }
        }
    }

    /// Applies the user's decision.
    ///
    /// Returns false when nothing happened: the prompt is already closed, or
    /// Embed was chosen before any commit was loaded (the prompt stays open).
    pub fn resolve(&self, decision: Decision) -> bool {
        let mut inner = self.lock();
        if inner.state == PromptState::Closed {
            return false;
        }

        match decision {
            Decision::Embed => {
                let Some(card) = inner.card_html.clone() else {
                    debug!(state = ?inner.state, "embed chosen without a loaded commit, ignoring");
                    return false;
                };
                inner
                    .editor
                    .replace_selection(&format!("{}{}", card, CARD_SUFFIX));
            }
            Decision::Text => {
                let pasted = inner.pasted.clone();
                inner.editor.replace_selection(&pasted);
            }
            Decision::Cancel => {}
        }

        debug!(?decision, "prompt resolved");
        close(&mut inner);
        true
    }

    /// Same as [`Decision::Cancel`].
    pub fn dismiss(&self) -> bool {
        self.resolve(Decision::Cancel)
    }
}

fn close(inner: &mut PromptInner) {
    inner.surface.clear();
    inner.surface.close();
    inner.commit = None;
    inner.card_html = None;
    inner.state = PromptState::Closed;
}
