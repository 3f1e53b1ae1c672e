// src/embed/host.rs
// =============================================================================
// The pieces of the host application the embed flow talks to.
//
// The core never knows how paste events are dispatched or how a dialog is
// drawn. It only needs:
// - an Editor that can replace the current selection
// - a DecisionSurface (the dialog) whose content region can show a loading
//   indicator, a card preview or an error, and that can be cleared and closed
// - a SurfaceFactory that opens a new surface per intercepted paste
//
// The surface's Embed / Paste as text / Cancel controls are the host's job;
// it wires them to EmbedPrompt::resolve.
// =============================================================================

/// Text editor handle for one paste.
pub trait Editor: Send {
    /// Inserts `text` at the cursor, replacing the current selection.
    fn replace_selection(&mut self, text: &str);
}

/// The dialog showing a preview and the three decision controls.
///
/// Each `show_*` call replaces whatever the content region showed before.
pub trait DecisionSurface: Send {
    fn show_loading(&mut self);
    fn show_preview(&mut self, card_html: &str);
    fn show_error(&mut self, message: &str);
    /// Empties the content region.
    fn clear(&mut self);
    fn close(&mut self);
}

/// Opens one [`DecisionSurface`] per intercepted paste.
pub trait SurfaceFactory: Send + Sync {
    fn open(&self, pasted: &str) -> Box<dyn DecisionSurface>;
}
