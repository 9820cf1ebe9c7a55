//! Designation extraction from short user-authored messages.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::config::DailyScpConfig;
use crate::errors::{DailyScpError, Result};

static PREFIXED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SCP-([a-z0-9-]+)").expect("prefixed pattern is valid"));
static DASHLESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SCP([a-z0-9-]+)").expect("dashless pattern is valid"));
static SPACED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SCP ([a-z0-9-]+)").expect("spaced pattern is valid"));
static RANDOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)random").expect("random pattern is valid"));

/// What a message asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mention {
    /// A designation written in the message, as typed.
    Explicit(String),
    /// The message asked for a random entry; this one was drawn.
    Random(u32),
}

impl Mention {
    /// The designation string, with random draws rendered as plain numbers.
    #[must_use]
    pub fn designation(&self) -> String {
        match self {
            Self::Explicit(designation) => designation.clone(),
            Self::Random(number) => number.to_string(),
        }
    }

    /// Whether the designation was drawn at random.
    #[must_use]
    pub const fn is_random(&self) -> bool {
        matches!(self, Self::Random(_))
    }
}

/// Pulls a designation out of a message addressed to the bot.
#[derive(Debug, Clone)]
pub struct MentionParser {
    handle: Regex,
    entries: u32,
}

impl MentionParser {
    /// Creates a parser that ignores `bot_handle` and draws random entries
    /// from `1..=entries`.
    pub fn new(bot_handle: &str, entries: u32) -> Result<Self> {
        if entries == 0 {
            return Err(DailyScpError::Config("catalog.entries must be at least 1".into()));
        }
        let handle = Regex::new(&format!("(?i){}", regex::escape(bot_handle)))
            .map_err(|e| DailyScpError::Config(format!("bad bot handle: {e}")))?;
        Ok(Self { handle, entries })
    }

    /// Creates a parser from the combined configuration.
    pub fn from_config(config: &DailyScpConfig) -> Result<Self> {
        Self::new(&config.mention.bot_handle, config.catalog.entries)
    }

    /// Returns the designation the message asks for, if one can be told
    /// apart. Random requests come back as a bare number.
    pub fn parse(&self, text: &str) -> Option<String> {
        self.parse_mention(text).map(|mention| mention.designation())
    }

    /// Like [`parse`](Self::parse) but keeps explicit and random requests
    /// apart.
    pub fn parse_mention(&self, text: &str) -> Option<Mention> {
        self.parse_mention_with(text, &mut rand::thread_rng())
    }

    /// [`parse_mention`](Self::parse_mention) with a caller-supplied random
    /// source.
    pub fn parse_mention_with<R: Rng>(&self, text: &str, rng: &mut R) -> Option<Mention> {
        let text = self.handle.replace_all(text, "");

        let prefixed = suffixes(&PREFIXED_RE, &text);
        if let [only] = prefixed.as_slice() {
            debug!(designation = %only, "Found prefixed designation");
            return Some(Mention::Explicit((*only).to_string()));
        }

        if RANDOM_RE.is_match(&text) {
            let number = rng.gen_range(1..=self.entries);
            debug!(number, "Random entry requested");
            return Some(Mention::Random(number));
        }

        if prefixed.is_empty() {
            let mut loose = suffixes(&DASHLESS_RE, &text);
            loose.extend(suffixes(&SPACED_RE, &text));
            if let [only] = loose.as_slice() {
                debug!(designation = %only, "Found loosely written designation");
                return Some(Mention::Explicit((*only).to_string()));
            }
        }

        debug!(prefixed = prefixed.len(), "No unambiguous designation in message");
        None
    }
}

fn suffixes<'t>(pattern: &Regex, text: &'t str) -> Vec<&'t str> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
