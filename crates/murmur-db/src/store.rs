//! Persistence interface consumed by the account and message workflows.
//!
//! `Database` implements both traits over SQLite (see `queries.rs`). The
//! workflows only see the traits, so any engine offering create,
//! find-by-id, find-by-unique-field, find-by-foreign-key, save and delete
//! can stand in.

use anyhow::Result;

use crate::models::{AccountRow, MessageRow};

pub trait AccountStore: Send + Sync {
    /// Inserts a new account and returns it with its assigned id.
    /// A taken username surfaces as an error for which
    /// [`is_unique_violation`](crate::is_unique_violation) holds.
    fn insert_account(&self, username: &str, password: &str) -> Result<AccountRow>;

    fn account_exists(&self, account_id: i64) -> Result<bool>;

    fn username_exists(&self, username: &str) -> Result<bool>;

    /// Exact, case-sensitive match on both fields.
    fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>>;
}

pub trait MessageStore: Send + Sync {
    fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<MessageRow>;

    fn find_message(&self, message_id: i64) -> Result<Option<MessageRow>>;

    /// Every message, oldest id first.
    fn all_messages(&self) -> Result<Vec<MessageRow>>;

    /// Messages whose `posted_by` equals `account_id`, oldest id first.
    fn messages_by_poster(&self, account_id: i64) -> Result<Vec<MessageRow>>;

    /// Writes back an existing row. Returns the number of rows changed.
    fn save_message(&self, row: &MessageRow) -> Result<usize>;

    /// Returns the number of rows removed (0 or 1).
    fn delete_message(&self, message_id: i64) -> Result<usize>;
}
