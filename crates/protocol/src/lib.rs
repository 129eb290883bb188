//! Wire-level types exchanged with the remote messaging API.
//!
//! Only the constructors needed to send animated media are modelled:
//! - `InputMedia`: how the server should attach media to a message
//! - `SendMedia`: the `messages.sendMedia` request
//! - `Updates`: the update envelope returned on success
//! - `ApiError`: RPC and transport failures

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};

// ── Constants ────────────────────────────────────────────────────────────────

/// Mime type used for animations uploaded from disk.
pub const ANIMATION_MIME_TYPE: &str = "video/mp4";

/// Maximum size of a single upload part accepted by the server (512 KB).
pub const MAX_PART_SIZE: usize = 524_288;

/// Every upload part size must be a multiple of this.
pub const PART_SIZE_ALIGN: usize = 1024;

pub mod error_names {
    pub const FILE_PART_PREFIX: &str = "FILE_PART_";
    pub const FILE_PART_SUFFIX: &str = "_MISSING";
}

// ── Caption styling ──────────────────────────────────────────────────────────

/// How a caption should be interpreted before being sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    #[default]
    Markdown,
    Html,
}

impl ParseMode {
    /// `"html"` in any case selects HTML; everything else falls back to Markdown.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("html") {
            Self::Html
        } else {
            Self::Markdown
        }
    }
}

/// A formatting span inside a caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    pub kind: String,
    pub offset: i32,
    pub length: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ── Peers ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_", rename_all = "snake_case")]
pub enum InputPeer {
    PeerSelf,
    User { user_id: i64, access_hash: i64 },
    Chat { chat_id: i64 },
    Channel { channel_id: i64, access_hash: i64 },
}

// ── Media ────────────────────────────────────────────────────────────────────

/// Handle to a file whose parts have all been uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: i64,
    pub parts: i32,
    pub name: String,
    /// Uploaded with the big-file part call.
    pub big: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDocument {
    pub id: i64,
    pub access_hash: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_", rename_all = "snake_case")]
pub enum DocumentAttribute {
    Video {
        supports_streaming: bool,
        duration: i32,
        w: i32,
        h: i32,
    },
    Filename {
        file_name: String,
    },
    Animated,
}

/// Media descriptor attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_", rename_all = "snake_case")]
pub enum InputMedia {
    UploadedDocument {
        file: UploadedFile,
        #[serde(skip_serializing_if = "Option::is_none")]
        thumb: Option<UploadedFile>,
        mime_type: String,
        attributes: Vec<DocumentAttribute>,
    },
    DocumentExternal {
        url: String,
    },
    Document {
        id: InputDocument,
    },
}

impl InputMedia {
    /// Short constructor name, used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UploadedDocument { .. } => "uploaded_document",
            Self::DocumentExternal { .. } => "document_external",
            Self::Document { .. } => "document",
        }
    }
}

// ── Requests ─────────────────────────────────────────────────────────────────

/// `messages.sendMedia`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMedia {
    pub peer: InputPeer,
    pub media: InputMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_msg_id: Option<i32>,
    /// Client-chosen id the server uses to deduplicate retries.
    pub random_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<Vec<u8>>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
}

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Broadcast channel or supergroup.
    #[serde(default)]
    pub channel: bool,
}

/// Media as the server describes it inside a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDocument {
    pub id: i64,
    pub access_hash: i64,
    pub dc_id: i32,
    pub mime_type: String,
    pub size: i64,
    #[serde(default)]
    pub attributes: Vec<DocumentAttribute>,
}

/// Raw message as embedded in a new-message update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    pub date: i64,
    /// Sender user id, absent for channel posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_id: Option<i64>,
    /// Destination user, chat or channel id.
    pub peer_id: i64,
    #[serde(default)]
    pub out: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<MessageDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_msg_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_", rename_all = "snake_case")]
pub enum Update {
    /// Maps the client `random_id` to the server-assigned message id.
    MessageId { id: i32, random_id: i64 },
    NewMessage { message: Message, pts: i32 },
    NewChannelMessage { message: Message, pts: i32 },
    ReadHistoryOutbox { peer_id: i64, max_id: i32 },
    /// Any constructor this client does not model.
    #[serde(other)]
    Unsupported,
}

/// Update envelope returned by a successful send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updates {
    #[serde(default)]
    pub updates: Vec<Update>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub chats: Vec<Chat>,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub seq: i32,
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Error returned by the server for a single RPC call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("rpc error {code}: {message}")]
pub struct RpcError {
    pub code: i32,
    /// Upper-case error name, e.g. `FILE_PART_3_MISSING`.
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Index of the part the server reports missing (`FILE_PART_<n>_MISSING`).
    #[must_use]
    pub fn file_part_missing(&self) -> Option<i32> {
        self.message
            .strip_prefix(error_names::FILE_PART_PREFIX)?
            .strip_suffix(error_names::FILE_PART_SUFFIX)?
            .parse::<i32>()
            .ok()
            .filter(|part| *part >= 0)
    }
}

/// Failure of a remote call, as seen by this client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("transport failure: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ApiError {
    #[must_use]
    pub fn transport(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Index of the missing part when this is a `FILE_PART_<n>_MISSING` error.
    #[must_use]
    pub fn file_part_missing(&self) -> Option<i32> {
        match self {
            Self::Rpc(rpc) => rpc.file_part_missing(),
            Self::Transport { .. } => None,
        }
    }
}
