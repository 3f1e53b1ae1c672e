// src/render/mod.rs
// =============================================================================
// Everything that turns a CommitData into display HTML.
//
// Submodules:
// - date: "2024-01-05T10:00:00Z" -> "Jan 5, 2024"
// - markdown: commit message Markdown -> HTML, through a scoped context
// - card: the self-contained, inline-styled commit card
// =============================================================================

mod card;
mod date;
mod markdown;

pub use card::{generate_card, html_escape};
pub use date::format_commit_date;
pub use markdown::{render_message, MarkdownRenderer, MessageRenderer, RenderContext};
