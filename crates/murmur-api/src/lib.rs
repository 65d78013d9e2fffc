pub mod auth;
pub mod error;
pub mod messages;
pub mod router;
pub mod service;
pub mod state;

pub use error::ApiError;
pub use router::router;
pub use state::{AppState, AppStateInner};

use tracing::error;

/// Runs a workflow call on the blocking pool. Store access is synchronous
/// SQLite and must stay off the async workers.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(e.into())
    })?
}
