// src/render/markdown.rs
// =============================================================================
// This module turns a commit message (Markdown) into HTML for the card body.
//
// Rendering goes through two small traits so a host can plug in its own
// Markdown engine:
// - MessageRenderer hands out a RenderContext
// - RenderContext does the actual conversion
//
// A context is a short-lived resource: acquire it, render, let it drop.
// render_message() does exactly that, so the context is released when
// rendering finishes, also on early return or unwinding.
//
// The built-in MarkdownRenderer uses pulldown-cmark and gives code spans and
// code blocks inline styles (the card has no stylesheet). The card ends up in
// someone else's document, so untrusted input never reaches it as markup:
// - raw HTML in the message is shown as text
// - link and image targets must be http(s), mailto or scheme-less
// =============================================================================

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag};
use tracing::trace;

use super::card::html_escape;

const MONO_FONT: &str = "font-family:SFMono-Regular,Consolas,'Liberation Mono',Menlo,monospace;";

const INLINE_CODE_STYLE: &str =
    "font-size:85%;background-color:#eff1f3;border-radius:4px;padding:2px 4px;";

const CODE_BLOCK_STYLE: &str = "font-size:85%;background-color:#f6f8fa;border-radius:6px;\
padding:8px 12px;overflow:auto;margin:8px 0;";

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// A scoped helper that converts Markdown to HTML. Released on drop.
pub trait RenderContext {
    fn render(&mut self, markdown: &str) -> String;
}

/// Source of render contexts.
pub trait MessageRenderer: Send + Sync {
    fn acquire(&self) -> Box<dyn RenderContext + '_>;
}

/// Renders `markdown` in a freshly acquired context and releases it before
/// returning.
pub fn render_message(renderer: &dyn MessageRenderer, markdown: &str) -> String {
    let mut context = renderer.acquire();
    context.render(markdown)
}

/// pulldown-cmark backed [`MessageRenderer`].
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self { options }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRenderer for MarkdownRenderer {
    fn acquire(&self) -> Box<dyn RenderContext + '_> {
        trace!("markdown render context acquired");
        Box::new(MarkdownContext {
            options: self.options,
            buffer: String::new(),
        })
    }
}

struct MarkdownContext {
    options: Options,
    buffer: String,
}

impl RenderContext for MarkdownContext {
    fn render(&mut self, markdown: &str) -> String {
        self.buffer.clear();

        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            // push_html escapes Text, so raw markup comes out as literal text
            Event::Html(raw) => Event::Text(raw),
            Event::Start(Tag::Link(kind, dest, title)) => {
                Event::Start(Tag::Link(kind, safe_destination(dest), title))
            }
            Event::End(Tag::Link(kind, dest, title)) => {
                Event::End(Tag::Link(kind, safe_destination(dest), title))
            }
            Event::Start(Tag::Image(kind, dest, title)) => {
                Event::Start(Tag::Image(kind, safe_destination(dest), title))
            }
            Event::End(Tag::Image(kind, dest, title)) => {
                Event::End(Tag::Image(kind, safe_destination(dest), title))
            }
            Event::Code(code) => Event::Html(
                format!(
                    "<code style=\"{}{}\">{}</code>",
                    MONO_FONT,
                    INLINE_CODE_STYLE,
                    html_escape(&code)
                )
                .into(),
            ),
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                        format!(" class=\"language-{}\"", html_escape(&lang))
                    }
                    _ => String::new(),
                };
                Event::Html(
                    format!(
                        "<pre style=\"{}{}\"><code{}>",
                        MONO_FONT, CODE_BLOCK_STYLE, language
                    )
                    .into(),
                )
            }
            Event::End(Tag::CodeBlock(_)) => Event::Html("</code></pre>\n".into()),
            other => other,
        });

        html::push_html(&mut self.buffer, parser);
        self.buffer.clone()
    }
}

impl Drop for MarkdownContext {
    fn drop(&mut self) {
        trace!("markdown render context released");
    }
}

/// Returns `dest` if it is safe to put in an `href`/`src`, otherwise an
/// empty target.
///
/// Browsers ignore tabs and newlines inside a scheme and trim leading
/// control characters, so those are dropped before looking at it.
fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    let scheme_end = cleaned.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(pos) if cleaned[pos..].starts_with(':') => {
            let scheme = cleaned[..pos].to_ascii_lowercase();
            if SAFE_SCHEMES.contains(&scheme.as_str()) {
                dest
            } else {
                trace!(%scheme, "dropping link target with unsafe scheme");
                CowStr::Borrowed("")
            }
        }
        // No scheme: a relative path or a fragment
        _ => dest,
    }
}
