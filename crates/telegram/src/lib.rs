//! Sending animations through the messages API.
//!
//! [`MediaSender`] resolves the GIF reference, issues `messages.sendMedia`,
//! re-uploads parts the server reports missing, and turns the returned
//! updates into a [`NormalizedMessage`].

pub mod client;
pub mod error;
pub mod outbound;
pub mod updates;

pub use {
    client::{
        ChatRef, MediaApi, PeerResolver, PlainText, ReplyMarkup, StyledText, Stylers, TextStyler,
    },
    error::{Error, Result},
    outbound::{MediaSender, SendGifOptions},
    updates::{NormalizedMessage, normalize},
};
