use crate::models::{AccountRow, MessageRow};
use crate::store::{AccountStore, MessageStore};
use crate::Database;
use anyhow::Result;
use rusqlite::{Connection, Row};

impl AccountStore for Database {
    fn insert_account(&self, username: &str, password: &str) -> Result<AccountRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                (username, password),
            )?;
            Ok(AccountRow {
                account_id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password.to_string(),
            })
        })
    }

    fn account_exists(&self, account_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM account WHERE account_id = ?1)",
                [account_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    fn username_exists(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM account WHERE username = ?1)",
                [username],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| query_account_by_credentials(conn, username, password))
    }
}

impl MessageStore for Database {
    fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted_epoch)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![posted_by, message_text, time_posted_epoch],
            )?;
            Ok(MessageRow {
                message_id: conn.last_insert_rowid(),
                posted_by,
                message_text: message_text.to_string(),
                time_posted_epoch,
            })
        })
    }

    fn find_message(&self, message_id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT message_id, posted_by, message_text, time_posted_epoch
                 FROM message WHERE message_id = ?1",
                [message_id],
                message_from_row,
            )
            .optional()
        })
    }

    fn all_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT message_id, posted_by, message_text, time_posted_epoch
                 FROM message ORDER BY message_id",
            )?;

            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    fn messages_by_poster(&self, account_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_messages_by_poster(conn, account_id))
    }

    fn save_message(&self, row: &MessageRow) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE message SET message_text = ?1 WHERE message_id = ?2",
                rusqlite::params![row.message_text, row.message_id],
            )?;
            Ok(changed)
        })
    }

    fn delete_message(&self, message_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM message WHERE message_id = ?1", [message_id])?;
            Ok(removed)
        })
    }
}

fn query_account_by_credentials(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Option<AccountRow>> {
    let mut stmt = conn.prepare(
        "SELECT account_id, username, password FROM account
         WHERE username = ?1 AND password = ?2",
    )?;

    let row = stmt
        .query_row([username, password], |row| {
            Ok(AccountRow {
                account_id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_messages_by_poster(conn: &Connection, account_id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT message_id, posted_by, message_text, time_posted_epoch
         FROM message
         WHERE posted_by = ?1
         ORDER BY message_id",
    )?;

    let rows = stmt
        .query_map([account_id], message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

/// True when `err` is SQLite rejecting a write on a UNIQUE constraint.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn insert_account_assigns_increasing_ids() {
        let db = db();
        let a = db.insert_account("alice", "pass1").unwrap();
        let b = db.insert_account("bob", "pass2").unwrap();

        assert!(b.account_id > a.account_id);
        assert!(db.account_exists(a.account_id).unwrap());
        assert!(!db.account_exists(b.account_id + 1).unwrap());
    }

    #[test]
    fn duplicate_username_is_unique_violation() {
        let db = db();
        db.insert_account("alice", "pass1").unwrap();

        let err = db.insert_account("alice", "other").unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(db.username_exists("alice").unwrap());
        assert!(!db.username_exists("Alice").unwrap());
    }

    #[test]
    fn credentials_must_match_exactly() {
        let db = db();
        let alice = db.insert_account("alice", "pass1").unwrap();

        assert_eq!(
            db.find_account_by_credentials("alice", "pass1").unwrap(),
            Some(alice)
        );
        assert_eq!(db.find_account_by_credentials("alice", "pass").unwrap(), None);
        assert_eq!(db.find_account_by_credentials("alice ", "pass1").unwrap(), None);
    }

    #[test]
    fn messages_round_trip_through_store() {
        let db = db();
        let alice = db.insert_account("alice", "pass1").unwrap();
        let bob = db.insert_account("bob", "pass2").unwrap();

        let first = db.insert_message(alice.account_id, "first", 100).unwrap();
        let second = db.insert_message(bob.account_id, "second", 200).unwrap();
        let third = db.insert_message(alice.account_id, "third", 300).unwrap();

        assert_eq!(db.find_message(second.message_id).unwrap(), Some(second.clone()));
        assert_eq!(
            db.all_messages().unwrap(),
            vec![first.clone(), second, third.clone()]
        );
        assert_eq!(
            db.messages_by_poster(alice.account_id).unwrap(),
            vec![first, third]
        );
        assert!(db.messages_by_poster(999).unwrap().is_empty());
    }

    #[test]
    fn save_message_only_rewrites_text() {
        let db = db();
        let alice = db.insert_account("alice", "pass1").unwrap();
        let mut msg = db.insert_message(alice.account_id, "before", 42).unwrap();

        msg.message_text = "after".into();
        msg.posted_by = 999;
        msg.time_posted_epoch = 0;
        assert_eq!(db.save_message(&msg).unwrap(), 1);

        let stored = db.find_message(msg.message_id).unwrap().unwrap();
        assert_eq!(stored.message_text, "after");
        assert_eq!(stored.posted_by, alice.account_id);
        assert_eq!(stored.time_posted_epoch, 42);
    }

    #[test]
    fn delete_message_reports_rows_removed() {
        let db = db();
        let msg = db.insert_message(1, "bye", 0).unwrap();

        assert_eq!(db.delete_message(msg.message_id).unwrap(), 1);
        assert_eq!(db.delete_message(msg.message_id).unwrap(), 0);
        assert_eq!(db.find_message(msg.message_id).unwrap(), None);
    }
}
