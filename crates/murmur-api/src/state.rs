use std::sync::Arc;

use murmur_db::{AccountStore, Database, MessageStore};

use crate::service::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl AppStateInner {
    pub fn new(accounts: Arc<dyn AccountStore>, messages: Arc<dyn MessageStore>) -> Self {
        Self {
            accounts: AccountService::new(accounts.clone()),
            messages: MessageService::new(messages, accounts),
        }
    }

    /// Both workflows backed by the same SQLite database.
    pub fn with_database(db: Arc<Database>) -> Self {
        Self::new(db.clone(), db)
    }
}
