use std::future::Future;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation did not settle within {deadline_ms}ms")]
pub struct DeadlineElapsed {
    pub deadline_ms: u64,
}

/// Races `operation` against `deadline`.
///
/// When the deadline wins the operation future is dropped, aborting any
/// in-flight request it owns.
pub async fn race_deadline<F, T>(deadline: Duration, operation: F) -> Result<T, DeadlineElapsed>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(deadline, operation)
        .await
        .map_err(|_| DeadlineElapsed {
            deadline_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        })
}
