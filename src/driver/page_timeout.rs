//! Bounded waits for browser operations

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

/// Run `operation` under `timeout`; an elapsed timer becomes an error naming
/// `operation_name` and the budget
///
/// # Errors
///
/// The operation's own error, or the timeout error.
pub async fn with_page_timeout<F, T>(operation: F, timeout: Duration, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(timeout, operation)
        .await
        .unwrap_or_else(|_| {
            Err(anyhow::anyhow!(
                "{operation_name} timeout after {} ms",
                timeout.as_millis()
            ))
        })
}
