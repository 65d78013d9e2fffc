use std::sync::Arc;

use tracing::{debug, info};

use murmur_db::{AccountStore, MessageStore};
use murmur_types::MAX_MESSAGE_LEN;
use murmur_types::api::NewMessage;
use murmur_types::models::Message;

use crate::error::ApiError;

pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    accounts: Arc<dyn AccountStore>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { messages, accounts }
    }

    pub fn create_message(&self, candidate: &NewMessage) -> Result<Message, ApiError> {
        validate_text(&candidate.message_text)?;

        if !self.accounts.account_exists(candidate.posted_by)? {
            debug!("Message rejected: unknown poster {}", candidate.posted_by);
            return Err(ApiError::InvalidMessage("invalid posted_by id"));
        }

        let row = self.messages.insert_message(
            candidate.posted_by,
            &candidate.message_text,
            candidate.time_posted_epoch,
        )?;

        info!("Message {} posted by {}", row.message_id, row.posted_by);
        Ok(row.into())
    }

    pub fn list_all_messages(&self) -> Result<Vec<Message>, ApiError> {
        let rows = self.messages.all_messages()?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    /// `None` when no message has this id. Not an error.
    pub fn get_message(&self, message_id: i64) -> Result<Option<Message>, ApiError> {
        Ok(self.messages.find_message(message_id)?.map(Message::from))
    }

    /// `Some(1)` when the message existed and was removed, `None` otherwise.
    pub fn delete_message(&self, message_id: i64) -> Result<Option<usize>, ApiError> {
        let removed = self.messages.delete_message(message_id)?;
        if removed == 0 {
            return Ok(None);
        }

        info!("Message {} deleted", message_id);
        Ok(Some(removed))
    }

    /// Rewrites the text of an existing message. Unlike get and delete, an
    /// unknown id here is an `InvalidMessage` error.
    pub fn update_message(&self, message_id: i64, new_text: &str) -> Result<usize, ApiError> {
        validate_text(new_text)?;

        let mut row = self.messages.find_message(message_id)?.ok_or_else(|| {
            debug!("Update rejected: no message {}", message_id);
            ApiError::InvalidMessage("invalid message id")
        })?;

        row.message_text = new_text.to_string();
        let changed = self.messages.save_message(&row)?;

        info!("Message {} updated", message_id);
        Ok(changed)
    }

    pub fn list_messages_by_account(&self, account_id: i64) -> Result<Vec<Message>, ApiError> {
        let rows = self.messages.messages_by_poster(account_id)?;
        Ok(rows.into_iter().map(Message::from).collect())
    }
}

/// Text must be 1..=255 characters, counted in `char`s (not bytes or
/// UTF-16 units).
fn validate_text(text: &str) -> Result<(), ApiError> {
    if text.is_empty() {
        debug!("Message rejected: blank text");
        return Err(ApiError::InvalidMessage("message cannot be blank"));
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        debug!("Message rejected: text longer than {} characters", MAX_MESSAGE_LEN);
        return Err(ApiError::InvalidMessage("message too long"));
    }
    Ok(())
}
