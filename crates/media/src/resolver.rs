//! Turns the user's GIF reference into an [`InputMedia`] descriptor.
//!
//! Local files are uploaded, `http` URLs are handed to the server as
//! external documents, and anything else must be a file identifier of an
//! animation the server already stores.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {
    mtsend_file_id::{FileId, MediaType},
    mtsend_protocol::{
        ANIMATION_MIME_TYPE, DocumentAttribute, InputDocument, InputMedia, UploadedFile,
    },
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    upload::{ChunkedUploader, UploadProgress, file_name},
};

/// Which resolution path a raw reference takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReference {
    LocalPath(PathBuf),
    RemoteUrl(String),
    OpaqueId(String),
}

impl MediaReference {
    /// Classify `raw`: an existing local path wins over the `http` prefix,
    /// which wins over the identifier fallback.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let path = Path::new(raw);
        if path.exists() {
            Self::LocalPath(path.to_path_buf())
        } else if raw.starts_with("http") {
            Self::RemoteUrl(raw.to_string())
        } else {
            Self::OpaqueId(raw.to_string())
        }
    }
}

/// Video attributes attached to uploaded animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoAttributes {
    /// Seconds.
    pub duration: i32,
    pub width: i32,
    pub height: i32,
}

/// Local file uploaded while resolving; kept for missing-part recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUpload {
    pub path: PathBuf,
    pub file: UploadedFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub media: InputMedia,
    pub upload: Option<LocalUpload>,
}

pub struct MediaResolver {
    uploader: Arc<dyn ChunkedUploader>,
}

impl MediaResolver {
    pub fn new(uploader: Arc<dyn ChunkedUploader>) -> Self {
        Self { uploader }
    }

    pub fn uploader(&self) -> &Arc<dyn ChunkedUploader> {
        &self.uploader
    }

    /// Resolve `gif` into a descriptor.
    ///
    /// Only the local-file path performs I/O. The thumbnail, when given, is
    /// uploaded before the animation itself.
    pub async fn resolve(
        &self,
        gif: &str,
        thumb: Option<&Path>,
        attributes: VideoAttributes,
        progress: Option<&dyn UploadProgress>,
    ) -> Result<ResolvedMedia> {
        match MediaReference::classify(gif) {
            MediaReference::LocalPath(path) => {
                let thumb = match thumb {
                    Some(thumb) => Some(self.uploader.save_file(thumb, None).await?),
                    None => None,
                };
                let file = self.uploader.save_file(&path, progress).await?;
                let media = uploaded_document(&path, file.clone(), thumb, attributes);
                Ok(ResolvedMedia {
                    media,
                    upload: Some(LocalUpload { path, file }),
                })
            },
            MediaReference::RemoteUrl(url) => {
                debug!(%url, "using external document");
                Ok(ResolvedMedia {
                    media: InputMedia::DocumentExternal { url },
                    upload: None,
                })
            },
            MediaReference::OpaqueId(raw) => Ok(ResolvedMedia {
                media: media_from_file_id(&raw)?,
                upload: None,
            }),
        }
    }
}

/// Build the descriptor for a file identifier, checking it names an animation.
pub fn media_from_file_id(raw: &str) -> Result<InputMedia> {
    let id = FileId::parse(raw)?;
    match MediaType::from_code(id.media_type) {
        Some(MediaType::Gif) => Ok(InputMedia::Document {
            id: InputDocument {
                id: id.media_id,
                access_hash: id.access_hash,
            },
        }),
        Some(other) => Err(Error::WrongMediaType { name: other.name() }),
        None => Err(Error::UnknownMediaType {
            code: id.media_type,
        }),
    }
}

fn uploaded_document(
    path: &Path,
    file: UploadedFile,
    thumb: Option<UploadedFile>,
    attributes: VideoAttributes,
) -> InputMedia {
    InputMedia::UploadedDocument {
        file,
        thumb,
        mime_type: ANIMATION_MIME_TYPE.to_string(),
        attributes: vec![
            DocumentAttribute::Video {
                supports_streaming: true,
                duration: attributes.duration,
                w: attributes.width,
                h: attributes.height,
            },
            DocumentAttribute::Filename {
                file_name: file_name(path),
            },
            DocumentAttribute::Animated,
        ],
    }
}
