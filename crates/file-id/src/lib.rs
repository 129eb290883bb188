//! Compact file identifiers.
//!
//! A file identifier is the URL-safe base64 text form of a little-endian
//! record naming a file the server already stores. The text form also
//! compresses runs of zero bytes and ends with a format marker byte.
//!
//! ```
//! use mtsend_file_id::{FileId, MediaType};
//!
//! let id = FileId::new(MediaType::Gif.code(), 2, 1234, -99);
//! let text = id.encode();
//! assert_eq!(FileId::parse(&text).unwrap(), id);
//! ```

pub mod codec;
pub mod error;
pub mod layout;
pub mod media_type;

pub use {
    codec::{decode, encode},
    error::{Error, Result},
    layout::{FileId, LONG_LEN, LongFields, SHORT_LEN, unpack},
    media_type::MediaType,
};
