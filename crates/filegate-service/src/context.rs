//! Operation context carrying cancellation and an optional deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use filegate_core::error::AppError;
use filegate_core::result::AppResult;

/// Context for one service operation.
///
/// Every store and cache call made on behalf of the operation is wrapped in
/// [`OperationContext::run`]. When the token is cancelled or the deadline
/// passes, the in-flight call is dropped and the operation fails with
/// `ErrorKind::Cancelled`. Nothing is retried.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    /// Cancelled by the caller (e.g. client disconnect, shutdown).
    cancel: CancellationToken,
    /// Instant after which the operation is abandoned.
    deadline: Option<Instant>,
}

impl OperationContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// A context driven by an existing token, e.g. a child of the shutdown token.
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Set or replace the deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The token that cancels this operation.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether the operation can no longer make progress.
    #[cfg(test)]
    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Run `fut` unless the context is cancelled or times out first.
    pub async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(AppError::cancelled("Operation cancelled"));
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AppError::cancelled("Operation cancelled")),
            _ = deadline => Err(AppError::cancelled("Operation deadline exceeded")),
            result = fut => result,
        }
    }
}
