//! Validation and persistence workflows. Handlers call into these on the
//! blocking pool; nothing here touches HTTP.

mod accounts;
mod messages;

pub use accounts::AccountService;
pub use messages::MessageService;
