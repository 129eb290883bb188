use std::path::PathBuf;

use mtsend_protocol::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier text could not be decoded or unpacked.
    #[error(transparent)]
    FileId(#[from] mtsend_file_id::Error),

    #[error("the file identifier belongs to a {name}")]
    WrongMediaType { name: &'static str },

    #[error("unknown media type: {code}")]
    UnknownMediaType { code: i32 },

    #[error("file is empty: {}", path.display())]
    EmptyFile { path: PathBuf },

    #[error("file {} is {size} bytes, above the {limit} byte upload limit", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

impl mtsend_common::FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

mtsend_common::impl_context!();
