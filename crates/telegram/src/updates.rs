use std::collections::HashMap;

use mtsend_protocol::{Chat, Message, Update, Updates, User};

use crate::error::{Error, Result};

/// The sent message together with the users and chats it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage {
    pub message: Message,
    pub users: HashMap<i64, User>,
    pub chats: HashMap<i64, Chat>,
}

impl NormalizedMessage {
    #[must_use]
    pub fn id(&self) -> i32 {
        self.message.id
    }

    /// Author of the message, when it was sent by a user.
    #[must_use]
    pub fn sender(&self) -> Option<&User> {
        self.message.from_id.and_then(|id| self.users.get(&id))
    }

    /// Destination chat, if the response described it.
    #[must_use]
    pub fn chat(&self) -> Option<&Chat> {
        self.chats.get(&self.message.peer_id)
    }
}

/// Pick the first new-message update out of a send response.
///
/// Channel and non-channel messages are handled alike. The user and chat
/// lists are indexed by id so the message can be read without the envelope.
pub fn normalize(updates: Updates) -> Result<NormalizedMessage> {
    let Updates {
        updates: list,
        users,
        chats,
        ..
    } = updates;
    let update_count = list.len();

    let message = list
        .into_iter()
        .find_map(|update| match update {
            Update::NewMessage { message, .. } | Update::NewChannelMessage { message, .. } => {
                Some(message)
            },
            _ => None,
        })
        .ok_or(Error::MissingNewMessage { update_count })?;

    Ok(NormalizedMessage {
        message,
        users: users.into_iter().map(|u| (u.id, u)).collect(),
        chats: chats.into_iter().map(|c| (c.id, c)).collect(),
    })
}
