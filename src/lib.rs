// src/lib.rs
// =============================================================================
// commit-embed: turns a pasted GitHub commit URL into a self-contained HTML
// commit card.
//
// Pipeline for one paste:
//   paste text -> github::is_commit_url -> embed::EmbedPrompt opens
//   -> github::CommitFetcher (one GET) -> render::render_message
//   -> render::generate_card -> preview -> user choice -> editor
//
// The editor, the dialog and the paste event source belong to the host and
// are reached only through the traits in `embed`.
// =============================================================================

pub mod config;
pub mod embed;
pub mod github;
pub mod render;

pub use config::Config;
