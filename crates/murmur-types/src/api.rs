use serde::Deserialize;

// -- Accounts --

/// Body of `/register` and `/login`.
///
/// Missing fields read as empty strings so that they fail validation
/// (400/401) instead of JSON extraction. Unknown fields such as a
/// client-sent `accountId` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMessage {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

/// Body of `PATCH /messages/{id}`. Only the text is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateMessageRequest {
    pub message_text: String,
}
