//! Tokio-backed best-effort dispatcher.
//!
//! Each task is spawned on the runtime with the dispatching request's trace
//! id re-scoped around it. Failures are sent on an unbounded channel; a
//! drain task turns them into `warn` records.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::TraceId;
use crate::domain::ports::{BackgroundDispatcher, BestEffortFailure, BestEffortTask};

/// Receiving end of the dispatcher's failure channel.
pub type FailureReceiver = mpsc::UnboundedReceiver<BestEffortFailure>;

/// [`BackgroundDispatcher`] spawning onto a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioBackgroundDispatcher {
    runtime: Handle,
    failures: mpsc::UnboundedSender<BestEffortFailure>,
}

impl TokioBackgroundDispatcher {
    /// Build a dispatcher and hand back its failure channel.
    pub fn new(runtime: Handle) -> (Self, FailureReceiver) {
        let (failures, receiver) = mpsc::unbounded_channel();
        (Self { runtime, failures }, receiver)
    }

    /// Build a dispatcher whose failures are logged by a drain task spawned
    /// on the same runtime.
    pub fn with_logging(runtime: Handle) -> Self {
        let (dispatcher, receiver) = Self::new(runtime.clone());
        runtime.spawn(drain_failures(receiver));
        dispatcher
    }
}

impl BackgroundDispatcher for TokioBackgroundDispatcher {
    fn dispatch(&self, task: BestEffortTask) {
        let (name, work) = task.into_parts();
        let failures = self.failures.clone();
        let trace_id = TraceId::current().map(|id| id.to_string());
        debug!(task = name, "best-effort task dispatched");
        self.runtime.spawn(TraceId::propagate(async move {
            let Err(message) = work.await else {
                debug!(task = name, "best-effort task finished");
                return;
            };
            let failure = BestEffortFailure {
                task: name,
                message,
                trace_id,
            };
            if let Err(unsent) = failures.send(failure) {
                let failure = unsent.0;
                warn!(
                    task = failure.task,
                    error = %failure.message,
                    "best-effort task failed; failure channel closed"
                );
            }
        }));
    }
}

/// Log every failure until all senders are dropped.
pub async fn drain_failures(mut receiver: FailureReceiver) {
    while let Some(failure) = receiver.recv().await {
        warn!(
            task = failure.task,
            error = %failure.message,
            trace_id = failure.trace_id.as_deref().unwrap_or("-"),
            "best-effort task failed"
        );
    }
}
