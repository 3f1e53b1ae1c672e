// src/embed/mod.rs
// =============================================================================
// The interactive part: intercepting a pasted commit URL and letting the user
// choose between the commit card, the plain URL, or nothing.
//
// Submodules:
// - host: traits for the editor and dialog the host application provides
// - prompt: the per-paste state machine (loading -> preview/error -> closed)
// - plugin: paste interception and start/stop
// =============================================================================

mod host;
mod plugin;
mod prompt;

#[cfg(test)]
mod testing;

pub use host::{DecisionSurface, Editor, SurfaceFactory};
pub use plugin::{CommitEmbedPlugin, PasteOutcome};
pub use prompt::{Decision, EmbedPrompt, PromptState, CARD_SUFFIX};
