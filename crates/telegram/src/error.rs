use {mtsend_protocol::ApiError, thiserror::Error};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Media(#[from] mtsend_media::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful send must carry the new message; the server broke that contract.
    #[error("send response carried no new-message update ({update_count} updates)")]
    MissingNewMessage { update_count: usize },

    #[error("part {part} still missing after {attempts} re-uploads")]
    PartRecoveryExhausted { part: i32, attempts: u32 },

    #[error("send timed out after {secs}s")]
    Timeout { secs: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
