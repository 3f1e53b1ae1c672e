// src/terminal.rs
// =============================================================================
// A tiny terminal "host" for the embed flow, used by the `paste` command.
//
// - Document: an in-memory text buffer with the cursor at the end
// - TerminalSurface: the decision dialog, drawn on stderr so stdout only
//   carries the final document
// - ask_decision: reads e / t / c answers from stdin until one takes effect
// =============================================================================

use futures::future::{self, Either};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncBufReadExt, BufReader};

use commit_embed::embed::{Decision, DecisionSurface, Editor, EmbedPrompt, SurfaceFactory};

/// Shared document buffer; every editor handle appends at the cursor.
#[derive(Clone, Default)]
pub struct Document {
    text: Arc<Mutex<String>>,
}

impl Document {
    pub fn editor(&self) -> DocumentEditor {
        DocumentEditor {
            text: Arc::clone(&self.text),
        }
    }

    pub fn contents(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub struct DocumentEditor {
    text: Arc<Mutex<String>>,
}

impl Editor for DocumentEditor {
    // The selection is always empty at the end of the document
    fn replace_selection(&mut self, text: &str) {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
    }
}

pub struct TerminalSurface {
    title: String,
    content: Option<String>,
}

impl TerminalSurface {
    pub fn new(pasted: &str) -> Self {
        Self {
            title: pasted.trim().to_string(),
            content: None,
        }
    }

    fn show(&mut self, content: String) {
        eprintln!("{}", content);
        self.content = Some(content);
    }
}

impl DecisionSurface for TerminalSurface {
    fn show_loading(&mut self) {
        self.show(format!("⏳ Loading {} ...", self.title));
    }

    fn show_preview(&mut self, card_html: &str) {
        self.show(format!(
            "\n📄 Preview:\n{}\n{}\n{}",
            "-".repeat(60),
            card_html,
            "-".repeat(60)
        ));
    }

    fn show_error(&mut self, message: &str) {
        self.show(format!("❌ {}", message));
    }

    fn clear(&mut self) {
        self.content = None;
    }

    fn close(&mut self) {
        eprintln!("✅ Done with {}", self.title);
    }
}

pub struct TerminalSurfaces;

impl SurfaceFactory for TerminalSurfaces {
    fn open(&self, pasted: &str) -> Box<dyn DecisionSurface> {
        Box::new(TerminalSurface::new(pasted))
    }
}

/// Maps an answer like "e", "Embed" or " t " to a decision.
pub fn parse_decision(answer: &str) -> Option<Decision> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "e" | "embed" => Some(Decision::Embed),
        "t" | "text" => Some(Decision::Text),
        "c" | "cancel" => Some(Decision::Cancel),
        _ => None,
    }
}

/// Reads answers from stdin until one is applied to `prompt`.
///
/// End of input dismisses the prompt.
pub async fn ask_decision(prompt: &EmbedPrompt) -> Decision {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprintln!("Embed commit card? [e]mbed / paste as [t]ext / [c]ancel");
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => {
                prompt.dismiss();
                return Decision::Cancel;
            }
        };

        let Some(decision) = parse_decision(&line) else {
            eprintln!("Please answer e, t or c");
            continue;
        };
        if prompt.resolve(decision) {
            return decision;
        }
        eprintln!("Nothing to embed yet");
    }
}

/// Loads the preview while waiting for the user's answer.
///
/// Returns as soon as the answer is in. A fetch still running at that point
/// is dropped; the prompt is already closed and would ignore its result.
pub async fn race_preview<P, A>(preview: P, answer: A) -> Decision
where
    P: Future<Output = ()>,
    A: Future<Output = Decision>,
{
    match future::select(Box::pin(preview), Box::pin(answer)).await {
        Either::Left(((), answer)) => answer.await,
        Either::Right((decision, _preview)) => decision,
    }
}
