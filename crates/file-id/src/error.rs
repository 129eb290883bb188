/// Errors raised while turning identifier text into a [`FileId`](crate::FileId).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text is not a valid encoded identifier.
    #[error("malformed file identifier: {reason}")]
    MalformedIdentifier { reason: String },

    /// The decoded bytes fit neither binary layout.
    #[error("invalid file identifier: {len} bytes match neither the short nor the long layout")]
    InvalidIdentifier { len: usize },
}

impl Error {
    #[must_use]
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::MalformedIdentifier {
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
