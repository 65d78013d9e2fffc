use std::sync::Arc;

use tracing::{debug, info, warn};

use murmur_db::{AccountStore, is_unique_violation};
use murmur_types::MIN_PASSWORD_LEN;
use murmur_types::api::Credentials;
use murmur_types::models::Account;

use crate::error::ApiError;

pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Validates the candidate, then stores it. Shape checks run before
    /// any store access.
    pub fn register(&self, candidate: &Credentials) -> Result<Account, ApiError> {
        // Stricter than non-empty: whitespace-only usernames are blank too.
        if candidate.username.trim().is_empty() {
            debug!("Registration rejected: blank username");
            return Err(ApiError::InvalidRegistration("username cannot be blank"));
        }
        if candidate.password.chars().count() < MIN_PASSWORD_LEN {
            debug!("Registration rejected for '{}': password too short", candidate.username);
            return Err(ApiError::InvalidRegistration("password too short"));
        }

        if self.store.username_exists(&candidate.username)? {
            debug!("Registration rejected: '{}' already taken", candidate.username);
            return Err(ApiError::DuplicateUsername);
        }

        // The existence check above can race a concurrent registration;
        // the UNIQUE constraint settles it.
        let row = self
            .store
            .insert_account(&candidate.username, &candidate.password)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    warn!("Lost registration race for '{}'", candidate.username);
                    ApiError::DuplicateUsername
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!("Registered account {} ({})", row.account_id, row.username);
        Ok(row.into())
    }

    /// One-shot credential check. Both fields are compared verbatim.
    pub fn login(&self, credentials: &Credentials) -> Result<Account, ApiError> {
        let row = self
            .store
            .find_account_by_credentials(&credentials.username, &credentials.password)?
            .ok_or_else(|| {
                debug!("Login failed for '{}'", credentials.username);
                ApiError::AuthenticationFailure
            })?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::UntouchableStore;
    use anyhow::bail;
    use murmur_db::Database;
    use murmur_db::models::AccountRow;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn service() -> AccountService {
        AccountService::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn register_returns_stored_account() {
        let svc = service();
        let account = svc.register(&creds("alice", "pass1")).unwrap();

        assert!(account.account_id > 0);
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "pass1");
    }

    #[rstest]
    #[case("", "pass1")]
    #[case("   ", "pass1")]
    #[case("alice", "")]
    #[case("alice", "abc")]
    fn register_rejects_bad_shape_without_store(#[case] username: &str, #[case] password: &str) {
        let svc = AccountService::new(Arc::new(UntouchableStore));
        let err = svc.register(&creds(username, password)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRegistration(_)), "got {err:?}");
    }

    #[test]
    fn register_accepts_four_character_password() {
        let svc = service();
        assert!(svc.register(&creds("alice", "abcd")).is_ok());
    }

    #[test]
    fn register_same_username_twice_is_duplicate() {
        let svc = service();
        svc.register(&creds("alice", "pass1")).unwrap();

        let err = svc.register(&creds("alice", "another")).unwrap_err();
        assert!(matches!(err, ApiError::DuplicateUsername), "got {err:?}");
    }

    /// Never sees an existing username, like a registration that passed its
    /// existence check just before a concurrent one committed.
    struct RacingStore {
        db: Database,
    }

    impl AccountStore for RacingStore {
        fn insert_account(&self, username: &str, password: &str) -> anyhow::Result<AccountRow> {
            self.db.insert_account(username, password)
        }

        fn account_exists(&self, account_id: i64) -> anyhow::Result<bool> {
            self.db.account_exists(account_id)
        }

        fn username_exists(&self, _: &str) -> anyhow::Result<bool> {
            Ok(false)
        }

        fn find_account_by_credentials(
            &self,
            username: &str,
            password: &str,
        ) -> anyhow::Result<Option<AccountRow>> {
            self.db.find_account_by_credentials(username, password)
        }
    }

    /// Passes the existence check, then fails the insert for a reason
    /// other than a taken username.
    struct BrokenInsertStore;

    impl AccountStore for BrokenInsertStore {
        fn insert_account(&self, _: &str, _: &str) -> anyhow::Result<AccountRow> {
            bail!("disk I/O error")
        }

        fn account_exists(&self, _: i64) -> anyhow::Result<bool> {
            Ok(false)
        }

        fn username_exists(&self, _: &str) -> anyhow::Result<bool> {
            Ok(false)
        }

        fn find_account_by_credentials(
            &self,
            _: &str,
            _: &str,
        ) -> anyhow::Result<Option<AccountRow>> {
            Ok(None)
        }
    }

    #[test]
    fn register_race_lost_on_insert_is_duplicate() {
        let svc = AccountService::new(Arc::new(RacingStore {
            db: Database::open_in_memory().unwrap(),
        }));
        svc.register(&creds("alice", "pass1")).unwrap();

        let err = svc.register(&creds("alice", "pass2")).unwrap_err();
        assert!(matches!(err, ApiError::DuplicateUsername), "got {err:?}");
    }

    #[test]
    fn register_insert_failure_is_internal() {
        let svc = AccountService::new(Arc::new(BrokenInsertStore));

        let err = svc.register(&creds("alice", "pass1")).unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)), "got {err:?}");
    }

    #[test]
    fn login_returns_matching_account() {
        let svc = service();
        let registered = svc.register(&creds("alice", "pass1")).unwrap();

        let logged_in = svc.login(&creds("alice", "pass1")).unwrap();
        assert_eq!(logged_in, registered);
    }

    #[rstest]
    #[case("alice", "wrong")]
    #[case("alice", "PASS1")]
    #[case("bob", "pass1")]
    #[case("", "")]
    fn login_mismatch_is_authentication_failure(#[case] username: &str, #[case] password: &str) {
        let svc = service();
        svc.register(&creds("alice", "pass1")).unwrap();

        let err = svc.login(&creds(username, password)).unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationFailure), "got {err:?}");
    }
}
