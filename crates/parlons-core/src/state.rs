//! UI-agnostic transcript types
//!
//! These are shared by every front end and don't depend on any UI framework.

use chrono::{DateTime, Local};
use std::fmt;

/// Identifier of a turn within one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TurnId(String);

impl TurnId {
    pub const WELCOME: &'static str = "welcome";

    /// The reserved id carried by the welcome turn
    pub fn welcome() -> Self {
        Self(Self::WELCOME.to_string())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn is_welcome(&self) -> bool {
        self.0 == Self::WELCOME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// One message in the conversation
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub id: TurnId,
    pub content: String,
    pub author: Author,
    pub created_at: DateTime<Local>,
}

impl ChatTurn {
    pub fn new(id: TurnId, author: Author, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            author,
            created_at: Local::now(),
        }
    }

    pub fn welcome(content: impl Into<String>) -> Self {
        Self::new(TurnId::welcome(), Author::Assistant, content)
    }

    /// Local hour:minute, the only way timestamps are shown
    pub fn display_time(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}
