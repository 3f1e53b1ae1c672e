// src/main.rs
// =============================================================================
// This is the entry point of the commit-embed CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, filtered by -v or RUST_LOG)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = not embedded, 2 = error)
// =============================================================================

mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::{Choice, Cli, Commands};
use commit_embed::embed::{CommitEmbedPlugin, Decision, Editor, PasteOutcome};
use commit_embed::github::{CommitFetcher, CommitSource, ParsedUrlRef};
use commit_embed::render::{generate_card, render_message, MarkdownRenderer};
use commit_embed::Config;
use terminal::{ask_decision, race_preview, Document, TerminalSurfaces};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "commit_embed=warn",
        1 => "commit_embed=info",
        2 => "commit_embed=debug",
        _ => "commit_embed=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = cli.api.to_config();

    match cli.command {
        Commands::Check { text } => Ok(handle_check(&text)),
        Commands::Card { url, json } => handle_card(&config, &url, json).await,
        Commands::Paste { text, choice } => handle_paste(&config, &text, choice).await,
    }
}

// Handles the 'check' subcommand. Never touches the network.
fn handle_check(text: &str) -> i32 {
    match text.parse::<ParsedUrlRef>() {
        Ok(reference) => {
            println!("{}", reference);
            0
        }
        Err(_) => {
            println!("not a commit URL");
            1
        }
    }
}

// Handles the 'card' subcommand
async fn handle_card(config: &Config, url: &str, json: bool) -> Result<i32> {
    let reference: ParsedUrlRef = match url.parse() {
        Ok(reference) => reference,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(1);
        }
    };

    let fetcher = CommitFetcher::with_config(config).context("creating GitHub client")?;

    eprintln!("🔍 Fetching commit {}", reference);
    let commit = match fetcher.fetch(&reference).await {
        Ok(commit) => commit,
        Err(e) => {
            eprintln!("❌ Failed to load commit: {}", e);
            return Ok(1);
        }
    };

    if json {
        let output = serde_json::to_string_pretty(&commit).context("serializing commit")?;
        println!("{}", output);
    } else {
        let message_html = render_message(&MarkdownRenderer::new(), &commit.message);
        println!("{}", generate_card(&commit, &message_html));
    }

    Ok(0)
}

// Handles the 'paste' subcommand: pastes into an empty document and prints
// the document afterwards.
async fn handle_paste(config: &Config, text: &str, choice: Option<Choice>) -> Result<i32> {
    let fetcher = CommitFetcher::with_config(config).context("creating GitHub client")?;
    let plugin = CommitEmbedPlugin::new(
        Arc::new(fetcher),
        Arc::new(MarkdownRenderer::new()),
        Arc::new(TerminalSurfaces),
    );
    plugin.start();

    let document = Document::default();
    let decision = match plugin.on_paste(text, Box::new(document.editor())) {
        PasteOutcome::PassThrough => {
            // Default paste, done by the "host"
            document.editor().replace_selection(text);
            None
        }
        PasteOutcome::Intercepted(prompt) => Some(match choice {
            Some(choice) => {
                plugin.preview(&prompt).await;
                let decision = Decision::from(choice);
                if prompt.resolve(decision) {
                    decision
                } else {
                    eprintln!("⚠️  Nothing to embed, pasting nothing");
                    prompt.dismiss();
                    Decision::Cancel
                }
            }
            None => race_preview(plugin.preview(&prompt), ask_decision(&prompt)).await,
        }),
    };

    plugin.stop();
    print!("{}", document.contents());

    Ok(match decision {
        Some(Decision::Cancel) => 1,
        _ => 0,
    })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the library separate from this file?
//    - src/lib.rs holds the pipeline; this binary is just one host for it
//    - An editor integration would provide its own Editor/DecisionSurface
//
// 2. Why race_preview (futures::future::select) in handle_paste?
//    - The user may answer while the commit is still loading
//    - Whichever finishes first wins; if the user answers first, the unfinished
//      fetch is dropped and the document prints without waiting for a timeout
//    - If the preview finishes first, we keep waiting for the answer
//
// 3. Why print to stderr so much?
//    - stdout only carries the result (card HTML, JSON, or the document)
//    - That keeps `commit-embed card URL > card.html` useful
// -----------------------------------------------------------------------------
