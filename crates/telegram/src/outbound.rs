use std::{path::PathBuf, sync::Arc, time::Duration};

use {
    mtsend_config::SendConfig,
    mtsend_media::{ChunkedUploader, LocalUpload, MediaResolver, UploadProgress, VideoAttributes},
    mtsend_protocol::{ParseMode, SendMedia, Updates},
    tracing::{debug, info, warn},
};

use crate::{
    client::{ChatRef, MediaApi, PeerResolver, ReplyMarkup, Stylers, TextStyler},
    error::{Error, Result},
    updates::{NormalizedMessage, normalize},
};

/// Optional parts of a GIF send.
#[derive(Clone, Default)]
pub struct SendGifOptions {
    pub caption: String,
    /// Falls back to `send.parse_mode` when unset.
    pub parse_mode: Option<ParseMode>,
    /// Only used when the GIF is uploaded from disk.
    pub attributes: VideoAttributes,
    /// Only used when the GIF is uploaded from disk.
    pub thumb: Option<PathBuf>,
    pub disable_notification: bool,
    pub reply_to_message_id: Option<i32>,
    pub reply_markup: Option<Arc<dyn ReplyMarkup>>,
    pub progress: Option<Arc<dyn UploadProgress>>,
}

impl SendGifOptions {
    /// Pick the caption parse mode by name. `"html"` in any case selects
    /// HTML; any other name selects Markdown.
    #[must_use]
    pub fn parse_mode_named(mut self, name: &str) -> Self {
        self.parse_mode = Some(ParseMode::from_name(name));
        self
    }
}

/// Sends animations and recovers from parts the server reports missing.
pub struct MediaSender {
    peers: Arc<dyn PeerResolver>,
    api: Arc<dyn MediaApi>,
    resolver: MediaResolver,
    stylers: Stylers,
    config: SendConfig,
}

impl MediaSender {
    pub fn new(
        peers: Arc<dyn PeerResolver>,
        api: Arc<dyn MediaApi>,
        uploader: Arc<dyn ChunkedUploader>,
        config: SendConfig,
    ) -> Self {
        Self {
            peers,
            api,
            resolver: MediaResolver::new(uploader),
            stylers: Stylers::default(),
            config,
        }
    }

    #[must_use]
    pub fn with_stylers(mut self, stylers: Stylers) -> Self {
        self.stylers = stylers;
        self
    }

    /// Send `gif` to `chat`.
    ///
    /// `gif` is a local path, an `http(s)` URL, or a file identifier of an
    /// animation already stored on the server. The media reference is
    /// resolved before the chat, so a bad identifier fails without any
    /// remote call.
    pub async fn send_gif(
        &self,
        chat: &ChatRef,
        gif: &str,
        options: SendGifOptions,
    ) -> Result<NormalizedMessage> {
        match self.config.timeout_secs {
            Some(secs) => tokio::time::timeout(
                Duration::from_secs(secs),
                self.send_gif_inner(chat, gif, options),
            )
            .await
            .map_err(|_| {
                warn!(chat = %chat, timeout_secs = secs, "gif send timed out");
                Error::Timeout { secs }
            })?,
            None => self.send_gif_inner(chat, gif, options).await,
        }
    }

    async fn send_gif_inner(
        &self,
        chat: &ChatRef,
        gif: &str,
        options: SendGifOptions,
    ) -> Result<NormalizedMessage> {
        let resolved = self
            .resolver
            .resolve(
                gif,
                options.thumb.as_deref(),
                options.attributes,
                options.progress.as_deref(),
            )
            .await?;
        let peer = self.peers.resolve_peer(chat).await?;

        let mode = options.parse_mode.unwrap_or(self.config.parse_mode);
        let styled = self.stylers.for_mode(mode).parse(&options.caption);

        let request = SendMedia {
            peer,
            media: resolved.media,
            silent: options.disable_notification.then_some(true),
            reply_to_msg_id: options.reply_to_message_id,
            random_id: rand::random::<i64>(),
            reply_markup: options.reply_markup.as_ref().map(|m| m.write()),
            message: styled.message,
            entities: styled.entities,
        };
        debug!(
            chat = %chat,
            media_kind = request.media.kind(),
            random_id = request.random_id,
            "sending gif"
        );

        let updates = self
            .send_with_part_recovery(chat, &request, resolved.upload.as_ref())
            .await?;
        let message = normalize(updates)?;
        info!(chat = %chat, message_id = message.id(), "gif sent");
        Ok(message)
    }

    /// Issue `request`, re-uploading each part the server reports missing
    /// and retrying with the same request. Any other failure is returned
    /// unchanged.
    async fn send_with_part_recovery(
        &self,
        chat: &ChatRef,
        request: &SendMedia,
        upload: Option<&LocalUpload>,
    ) -> Result<Updates> {
        let mut attempts = 0u32;

        loop {
            match self.api.send_media(request).await {
                Ok(updates) => return Ok(updates),
                Err(err) => {
                    let (Some(part), Some(upload)) = (err.file_part_missing(), upload) else {
                        return Err(err.into());
                    };

                    if let Some(max) = self.config.max_part_recovery_attempts
                        && attempts >= max
                    {
                        warn!(
                            chat = %chat,
                            part,
                            attempts,
                            max_attempts = max,
                            "file part still missing after re-uploads"
                        );
                        return Err(Error::PartRecoveryExhausted { part, attempts });
                    }

                    attempts += 1;
                    warn!(
                        chat = %chat,
                        file_id = upload.file.id,
                        part,
                        attempts,
                        "server reported missing file part, re-uploading"
                    );
                    self.resolver
                        .uploader()
                        .save_file_part(&upload.path, upload.file.id, part)
                        .await?;
                },
            }
        }
    }
}
