//! Single background worker for queued sync operations
//!
//! Jobs are processed one at a time in submission order. Each job runs in
//! its own task so that a panicking syncer fails only that job.

use super::{SyncOperation, SyncerCore};
use crate::artifact::ArtifactMetadata;
use crate::config::SyncerConfiguration;
use crate::error::{SyncerError, SyncerResult};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

type JobResult = SyncerResult<Vec<ArtifactMetadata>>;

/// A queued operation waiting for the worker
struct Job {
    id: Uuid,
    operation: SyncOperation,
    config: Option<SyncerConfiguration>,
    reply: oneshot::Sender<JobResult>,
}

/// Handle to a queued sync operation
///
/// Await it to get the operation's result. Dropping it does not cancel the
/// operation; the cache is still updated when it completes.
#[derive(Debug)]
pub struct SyncTask {
    id: Uuid,
    rx: oneshot::Receiver<JobResult>,
}

impl SyncTask {
    /// Id used for this job in log lines
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Future for SyncTask {
    type Output = JobResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SyncerError::WorkerStopped)))
    }
}

/// Sending side of the worker queue plus the worker task itself
pub(super) struct SyncWorker {
    tx: mpsc::UnboundedSender<Job>,
    handle: JoinHandle<()>,
}

impl SyncWorker {
    /// Spawn the worker on the current tokio runtime
    pub(super) fn spawn(core: Arc<SyncerCore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(core, rx));
        Self { tx, handle }
    }

    /// Queue an operation behind everything already submitted
    pub(super) fn submit(
        &self,
        operation: SyncOperation,
        config: Option<SyncerConfiguration>,
    ) -> SyncTask {
        let id = Uuid::new_v4();
        let (reply, rx) = oneshot::channel();

        debug!("Queueing {} as job {}", operation, id);

        let job = Job {
            id,
            operation,
            config,
            reply,
        };

        if let Err(mpsc::error::SendError(job)) = self.tx.send(job) {
            warn!("Sync worker is gone, rejecting job {}", id);
            let _ = job.reply.send(Err(SyncerError::WorkerStopped));
        }

        SyncTask { id, rx }
    }

    /// Close the queue and wait for pending jobs to drain
    pub(super) async fn shutdown(self) {
        let Self { tx, handle } = self;
        drop(tx);

        if let Err(e) = handle.await {
            error!("Sync worker terminated abnormally: {}", e);
        }
    }
}

async fn run(core: Arc<SyncerCore>, mut rx: mpsc::UnboundedReceiver<Job>) {
    debug!("Sync worker started");

    while let Some(job) = rx.recv().await {
        let Job {
            id,
            operation,
            config,
            reply,
        } = job;

        debug!("Running job {}: {}", id, operation);

        let task_core = Arc::clone(&core);
        let task_operation = operation.clone();
        let joined =
            tokio::spawn(async move { task_core.execute(&task_operation, config).await }).await;

        let result = match joined {
            Ok(result) => result,
            Err(e) if e.is_panic() => {
                error!("Job {} ({}) panicked", id, operation);
                Err(SyncerError::WorkerPanicked {
                    job: id.to_string(),
                })
            }
            Err(_) => Err(SyncerError::WorkerStopped),
        };

        if let Err(ref e) = result {
            warn!("Job {} ({}) failed: {}", id, operation, e);
        }

        if reply.send(result).is_err() {
            debug!("Result of job {} discarded, handle dropped", id);
        }
    }

    debug!("Sync worker stopped");
}
