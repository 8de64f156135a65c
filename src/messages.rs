//! Per-record message log.
//!
//! Parsing never aborts on bad data. Instead, every data-quality problem found in a
//! record is collected here so the indexing layer can decide what to do with the
//! record, and mirrored as a `tracing` event so it also shows up in the process log.

use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl Message {
    pub fn add_detail(&mut self, detail: impl Into<String>) -> &mut Self {
        let detail = detail.into();
        debug!("  detail: {}", detail);
        self.details.push(detail);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Messages {
    messages: Vec<Message>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, level: Level, text: impl Into<String>) -> &mut Message {
        self.push(level, text.into(), None)
    }

    /// Same as [`Messages::add`], keeping the rendered error chain of `cause`.
    pub fn add_with_cause(
        &mut self,
        level: Level,
        text: impl Into<String>,
        cause: &dyn std::error::Error,
    ) -> &mut Message {
        let mut rendered = cause.to_string();
        let mut source = cause.source();
        while let Some(inner) = source {
            rendered.push_str(": ");
            rendered.push_str(&inner.to_string());
            source = inner.source();
        }
        self.push(level, text.into(), Some(rendered))
    }

    fn push(&mut self, level: Level, text: String, cause: Option<String>) -> &mut Message {
        match (level, &cause) {
            (Level::Info, _) => info!("{}", text),
            (Level::Warning, None) => warn!("{}", text),
            (Level::Warning, Some(cause)) => warn!("{} ({})", text, cause),
            (Level::Error, None) => error!("{}", text),
            (Level::Error, Some(cause)) => error!("{} ({})", text, cause),
        }

        self.messages.push(Message {
            level,
            text,
            details: Vec::new(),
            cause,
        });
        let last = self.messages.len() - 1;
        &mut self.messages[last]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn count(&self, level: Level) -> usize {
        self.messages.iter().filter(|m| m.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Level::Error) > 0
    }
}
