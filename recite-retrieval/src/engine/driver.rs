//! Batch retrieval driver
//!
//! One task per identity, at most `worker_pool_size` running at once. The
//! batch waits for every task unless the cancellation token fires first, in
//! which case it returns `false` right away. Tasks already spawned are left
//! to finish; tasks that have not started yet see the cancellation and skip
//! their identity.

use super::orchestrator::RetrievalOrchestrator;
use crate::error::{Result, RetrievalError};
use futures::future::join_all;
use recite_common::model::{Identity, RetrievalMode};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Bounded fan-out of retrieval passes over a batch of identities
#[derive(Clone)]
pub struct RetrievalDriver {
    orchestrator: Arc<RetrievalOrchestrator>,
    worker_pool_size: usize,
}

impl RetrievalDriver {
    /// Pool size is taken from the orchestrator's settings
    pub fn new(orchestrator: Arc<RetrievalOrchestrator>) -> Self {
        let worker_pool_size = orchestrator.settings().worker_pool_size;
        Self::with_pool_size(orchestrator, worker_pool_size)
    }

    pub fn with_pool_size(orchestrator: Arc<RetrievalOrchestrator>, worker_pool_size: usize) -> Self {
        Self {
            orchestrator,
            worker_pool_size: worker_pool_size.max(1),
        }
    }

    pub fn worker_pool_size(&self) -> usize {
        self.worker_pool_size
    }

    /// Run a pass for every identity
    ///
    /// Returns `true` once every task has finished, `false` if the wait was
    /// cancelled. Per-identity failures and task panics are logged and do
    /// not change the result.
    pub async fn run_batch(&self, identities: Vec<Identity>, mode: RetrievalMode, cancel: CancellationToken) -> bool {
        let total = identities.len();
        let semaphore = Arc::new(Semaphore::new(self.worker_pool_size));

        info!(
            identities = total,
            workers = self.worker_pool_size,
            mode = ?mode,
            "Starting retrieval batch"
        );

        let mut uids = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);

        for mut identity in identities {
            let orchestrator = Arc::clone(&self.orchestrator);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            uids.push(identity.uid.clone());

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return None,
                };

                if cancel.is_cancelled() {
                    debug!(uid = %identity.uid, "Batch cancelled, skipping identity");
                    return None;
                }

                match orchestrator.run(&mut identity, &mode).await {
                    Ok(summary) => Some(summary),
                    Err(e) => {
                        error!(uid = %identity.uid, error = %e, "Retrieval pass failed");
                        None
                    }
                }
            }));
        }

        // A finished batch wins over a cancellation that arrived meanwhile
        tokio::select! {
            biased;
            results = join_all(handles) => {
                let mut completed = 0usize;
                for (uid, result) in uids.iter().zip(results) {
                    match result {
                        Ok(Some(_)) => completed += 1,
                        Ok(None) => {}
                        Err(e) => error!(uid = %uid, error = %e, "Retrieval task panicked"),
                    }
                }
                info!(identities = total, completed, "Retrieval batch complete");
                true
            }
            _ = cancel.cancelled() => {
                warn!(identities = total, "Retrieval batch interrupted");
                false
            }
        }
    }

    /// Run a pass for every identity in the identity store
    ///
    /// Fails with `BatchInterrupted` when cancelled before all passes finished.
    pub async fn run_all(&self, mode: RetrievalMode, cancel: CancellationToken) -> Result<()> {
        let identities = self.orchestrator.stores().identities.find_all().await?;
        if self.run_batch(identities, mode, cancel).await {
            Ok(())
        } else {
            Err(RetrievalError::BatchInterrupted)
        }
    }
}
