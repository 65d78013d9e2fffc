use serde::{Deserialize, Serialize};

/// A registered account as returned by `/register` and `/login`.
///
/// The password is echoed back unchanged: login is a plain credential
/// check and there is no session or token to hand out instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Caller-supplied, stored as-is.
    pub time_posted_epoch: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_camel_case() {
        let msg = Message {
            message_id: 7,
            posted_by: 1,
            message_text: "hi".into(),
            time_posted_epoch: 1669947792,
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messageId": 7,
                "postedBy": 1,
                "messageText": "hi",
                "timePostedEpoch": 1669947792,
            })
        );
    }

    #[test]
    fn account_serializes_camel_case() {
        let account = Account {
            account_id: 3,
            username: "alice".into(),
            password: "pass1".into(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["accountId"], 3);
        assert_eq!(json["username"], "alice");
    }
}
