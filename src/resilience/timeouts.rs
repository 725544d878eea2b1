//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap remote calls with a deadline
//! - Convert the inner error into the crate taxonomy
//! - Report elapsed deadlines as [`Error::Timeout`]

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::error::{Error, Result};

/// Await `fut` for at most `duration`.
///
/// `operation` names the call in logs.
pub async fn with_deadline<F, T, E>(duration: Duration, operation: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Into<Error>,
{
    match timeout(duration, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            let err = e.into();
            tracing::warn!(operation, kind = %err.kind(), error = %err, "RPC call failed");
            Err(err)
        }
        Err(_) => {
            tracing::warn!(operation, timeout_secs = duration.as_secs(), "RPC timeout");
            Err(Error::Timeout(duration))
        }
    }
}
