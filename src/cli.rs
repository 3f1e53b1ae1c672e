// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - check: is this text exactly a GitHub commit URL? (no network)
// - card:  fetch a commit and print its HTML card (or JSON with --json)
// - paste: simulate pasting text into a document, with the embed prompt
//
// The API options are global, so they can go before or after the
// subcommand, and each one falls back to an environment variable.
// =============================================================================

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::time::Duration;

use commit_embed::config::{default_user_agent, DEFAULT_API_BASE_URL};
use commit_embed::embed::Decision;
use commit_embed::Config;

#[derive(Parser, Debug)]
#[command(
    name = "commit-embed",
    version,
    about = "Turn GitHub commit URLs into self-contained HTML commit cards",
    long_about = "commit-embed recognizes GitHub commit URLs, fetches the commit from the \
                  GitHub API and renders it as an HTML card with inline styles, ready to \
                  paste into any document."
)]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct ApiArgs {
    /// Base URL of the GitHub REST API
    #[arg(long, env = "COMMIT_EMBED_API_URL", default_value = DEFAULT_API_BASE_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "COMMIT_EMBED_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// User-Agent header sent to the API
    #[arg(long, env = "COMMIT_EMBED_USER_AGENT", global = true)]
    pub user_agent: Option<String>,
}

impl ApiArgs {
    pub fn to_config(&self) -> Config {
        Config {
            api_base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether TEXT is exactly a GitHub commit URL
    ///
    /// Example: commit-embed check https://github.com/rust-lang/rust/commit/37f48bf
    Check {
        /// Text to check, e.g. a URL copied from the browser
        text: String,
    },

    /// Fetch a commit and print its HTML card
    ///
    /// Example: commit-embed card https://github.com/rust-lang/rust/commit/37f48bf
    Card {
        /// GitHub commit URL
        url: String,

        /// Print the normalized commit data as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Paste TEXT into an empty document and print the result
    ///
    /// Commit URLs open the embed prompt; anything else is pasted as-is.
    Paste {
        /// Text being pasted
        text: String,

        /// Answer the prompt up front instead of reading it from stdin
        #[arg(long, value_enum)]
        choice: Option<Choice>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Embed,
    Text,
    Cancel,
}

impl From<Choice> for Decision {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Embed => Decision::Embed,
            Choice::Text => Decision::Text,
            Choice::Cancel => Decision::Cancel,
        }
    }
}
