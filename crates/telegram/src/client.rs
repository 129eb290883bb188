//! Collaborators the sender relies on but does not implement.

use std::sync::Arc;

use {
    async_trait::async_trait,
    mtsend_protocol::{ApiError, InputPeer, MessageEntity, ParseMode, SendMedia, Updates},
};

/// Target chat as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRef {
    /// Numeric user, chat or channel id.
    Id(i64),
    /// Username, phone number, invite link, or `"me"`/`"self"`.
    Name(String),
}

impl From<i64> for ChatRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ChatRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl std::fmt::Display for ChatRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Resolves a [`ChatRef`] into the peer the API expects.
#[async_trait]
pub trait PeerResolver: Send + Sync {
    async fn resolve_peer(&self, chat: &ChatRef) -> Result<InputPeer, ApiError>;
}

/// `messages.sendMedia` transport.
#[async_trait]
pub trait MediaApi: Send + Sync {
    async fn send_media(&self, request: &SendMedia) -> Result<Updates, ApiError>;
}

/// Reply keyboard or inline markup, already in wire form.
pub trait ReplyMarkup: Send + Sync {
    fn write(&self) -> Vec<u8>;
}

// ── Caption styling ─────────────────────────────────────────────────────────

/// Caption text with its formatting entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub message: String,
    pub entities: Vec<MessageEntity>,
}

pub trait TextStyler: Send + Sync {
    fn parse(&self, text: &str) -> StyledText;
}

/// Sends text as-is, without entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl TextStyler for PlainText {
    fn parse(&self, text: &str) -> StyledText {
        StyledText {
            message: text.to_string(),
            entities: Vec::new(),
        }
    }
}

/// One styler per [`ParseMode`].
#[derive(Clone)]
pub struct Stylers {
    pub markdown: Arc<dyn TextStyler>,
    pub html: Arc<dyn TextStyler>,
}

impl Stylers {
    #[must_use]
    pub fn for_mode(&self, mode: ParseMode) -> &dyn TextStyler {
        match mode {
            ParseMode::Markdown => self.markdown.as_ref(),
            ParseMode::Html => self.html.as_ref(),
        }
    }
}

impl Default for Stylers {
    fn default() -> Self {
        Self {
            markdown: Arc::new(PlainText),
            html: Arc::new(PlainText),
        }
    }
}
