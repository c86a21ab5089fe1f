//! Caller-supplied cancellation and deadline for a completion call.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{CompletionError, Result};

/// Execution context for a single call.
///
/// The client only reads the context. Cancelling the token or reaching the
/// deadline drops the in-flight request.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once the token is cancelled or the deadline has passed.
    pub fn is_done(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drives `fut` until it finishes, the token is cancelled, or the
    /// deadline passes. `fut` is dropped in the latter two cases.
    pub(crate) async fn run<F>(&self, fut: F) -> Result<F::Output>
    where
        F: Future,
    {
        if self.cancel.is_cancelled() {
            return Err(CompletionError::Cancelled);
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CompletionError::Cancelled),
            () = deadline => Err(CompletionError::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_context_runs_to_completion() {
        let ctx = Context::background();
        assert!(!ctx.is_done());

        let out = ctx.run(async { 42 }).await.unwrap();
        assert_eq!(out, 42);
    }

    #[tokio::test]
    async fn pre_cancelled_context_never_polls_future() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = Context::background().with_cancellation(token);

        let polled = std::sync::atomic::AtomicBool::new(false);
        let result = ctx
            .run(async {
                polled.store(true, std::sync::atomic::Ordering::SeqCst);
            })
            .await;

        assert!(matches!(result, Err(CompletionError::Cancelled)));
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
        assert!(ctx.is_done());
    }

    #[tokio::test]
    async fn cancellation_interrupts_pending_future() {
        let token = CancellationToken::new();
        let ctx = Context::background().with_cancellation(token.clone());

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let result = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(result, Err(CompletionError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_pending_future() {
        let ctx = Context::background().with_timeout(Duration::from_secs(5));

        let result = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(result, Err(CompletionError::DeadlineExceeded)));
        assert!(ctx.is_done());
    }

    #[tokio::test]
    async fn expired_deadline_wins_over_ready_future() {
        let ctx = Context::background().with_deadline(Instant::now() - Duration::from_millis(1));

        let result = ctx.run(async { "too late" }).await;
        assert!(matches!(result, Err(CompletionError::DeadlineExceeded)));
    }
}
