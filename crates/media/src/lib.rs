//! Media resolution and chunked upload for outgoing animations.

pub mod error;
pub mod resolver;
pub mod upload;

pub use {
    error::{Error, Result},
    resolver::{LocalUpload, MediaReference, MediaResolver, ResolvedMedia, VideoAttributes},
    upload::{BoundProgress, ChunkedUploader, PartUploader, UploadApi, UploadProgress},
};
