//! Decoding of recorded feed messages.
//!
//! One JSON object per line, carrying the fields the live feed sends for each
//! edit. Anything else in the object is ignored. Lines that do not decode are
//! logged and skipped so they never reach the engine.

use anyhow::Context;
use l2w_core::{Category, Event, NEW_USER_KEY};
use serde::Deserialize;
use std::io::BufRead;

#[derive(Clone, Debug, Deserialize)]
pub struct ChangeMessage {
    pub page_title: String,
    #[serde(default)]
    pub change_size: Option<i64>,
    #[serde(default)]
    pub is_anon: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub user: Option<String>,
}

impl ChangeMessage {
    /// New-user notices first, then anonymous before bot.
    pub fn category(&self) -> Category {
        if self.page_title == NEW_USER_KEY {
            Category::Special
        } else if self.is_anon {
            Category::Anonymous
        } else if self.is_bot {
            Category::Bot
        } else {
            Category::Normal
        }
    }

    pub fn into_event(self) -> Event {
        let category = self.category();
        Event::new(self.page_title, self.change_size, category)
    }
}

/// Decode one line; blank lines yield `None`.
pub fn parse_line(line: &str) -> serde_json::Result<Option<ChangeMessage>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Read every decodable message from `reader`, in order.
pub fn read_feed(reader: impl BufRead) -> anyhow::Result<Vec<Event>> {
    let mut events = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading feed line {}", n + 1))?;
        match parse_line(&line) {
            Ok(Some(msg)) => {
                log::trace!(
                    "line {}: {:?} by {:?} ({:?})",
                    n + 1,
                    msg.page_title,
                    msg.user,
                    msg.change_size
                );
                events.push(msg.into_event());
            }
            Ok(None) => {}
            Err(e) => log::warn!("could not load message on line {}: {e}", n + 1),
        }
    }
    Ok(events)
}
