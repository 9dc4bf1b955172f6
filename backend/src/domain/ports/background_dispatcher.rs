//! Best-effort side effects.
//!
//! A use case that has already succeeded may hand follow-up work to a
//! [`BackgroundDispatcher`]. The dispatcher runs the task elsewhere and
//! reports failures on its own channel; the caller never waits for it and
//! never sees its errors.

use std::fmt;
use std::future::Future;

use futures_util::future::BoxFuture;

/// Named unit of background work.
pub struct BestEffortTask {
    name: &'static str,
    work: BoxFuture<'static, Result<(), String>>,
}

impl BestEffortTask {
    /// Wrap `work`; `name` labels failures and log records.
    pub fn new<F>(name: &'static str, work: F) -> Self
    where
        F: Future<Output = Result<(), String>> + Send + 'static,
    {
        Self {
            name,
            work: Box::pin(work),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Split into name and future for execution.
    pub fn into_parts(self) -> (&'static str, BoxFuture<'static, Result<(), String>>) {
        (self.name, self.work)
    }
}

impl fmt::Debug for BestEffortTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BestEffortTask")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Failure report emitted on the dispatcher's failure channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestEffortFailure {
    pub task: &'static str,
    pub message: String,
    pub trace_id: Option<String>,
}

/// Hands best-effort tasks to a background executor.
#[cfg_attr(test, mockall::automock)]
pub trait BackgroundDispatcher: Send + Sync {
    /// Schedule `task`. Must not block and must not fail the caller.
    fn dispatch(&self, task: BestEffortTask);
}
