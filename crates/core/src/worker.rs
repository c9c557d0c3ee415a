//! Background acquisition for sources whose poll would block.
//!
//! A [`WorkerSource`] runs its job on a dedicated thread at a fixed interval
//! and passes each result over a small bounded channel. `poll` never waits:
//! it drains whatever has arrived and keeps only the newest result.

use anyhow::{anyhow, bail, Result};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use log::{debug, trace, warn};
use std::thread;
use std::time::Duration;
use tickboard_types::{FieldMetadata, Snapshot};

use crate::data_source::{DataSource, SourceMetadata};
use crate::error::InitError;

/// Results waiting to be drained. The worker evicts the oldest when full.
const RESULT_CAPACITY: usize = 2;

/// One acquisition run
pub type Job = Box<dyn FnMut() -> Result<Snapshot> + Send>;

type JobResult = std::result::Result<Snapshot, String>;

pub struct WorkerSource {
    metadata: SourceMetadata,
    fields: Vec<FieldMetadata>,
    interval: Duration,
    /// Moved onto the worker thread by `init`
    job: Option<Job>,
    results: Option<Receiver<JobResult>>,
    /// Dropping this tells the worker to exit after its current run
    stop: Option<Sender<()>>,
    last: Option<Snapshot>,
}

impl WorkerSource {
    pub fn new(
        metadata: SourceMetadata,
        fields: Vec<FieldMetadata>,
        interval: Duration,
        job: Job,
    ) -> Self {
        Self {
            metadata,
            fields,
            interval,
            job: Some(job),
            results: None,
            stop: None,
            last: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_some()
    }
}

fn run_worker(
    name: &str,
    mut job: Job,
    interval: Duration,
    tx: Sender<JobResult>,
    evict: Receiver<JobResult>,
    stop: Receiver<()>,
) {
    debug!("Worker {} started ({:?} interval)", name, interval);
    loop {
        let mut item = job().map_err(|e| format!("{e:#}"));
        loop {
            match tx.try_send(item) {
                Ok(()) => break,
                Err(TrySendError::Full(rejected)) => {
                    evict_oldest(name, &evict);
                    item = rejected;
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!("Worker {}: receiver gone, exiting", name);
                    return;
                }
            }
        }

        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            _ => break,
        }
    }
    debug!("Worker {} stopped", name);
}

/// Drop the oldest queued result. Nobody drained since the last runs, so it
/// is stale. Returns whether anything was dropped.
fn evict_oldest(name: &str, evict: &Receiver<JobResult>) -> bool {
    match evict.try_recv() {
        Ok(Ok(_)) => {
            trace!("Worker {}: dropped an undrained result", name);
            true
        }
        Ok(Err(message)) => {
            trace!("Worker {}: dropped an undrained failure: {}", name, message);
            true
        }
        // The poller drained it in the meantime
        Err(_) => false,
    }
}

impl DataSource for WorkerSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        self.fields.clone()
    }

    fn init(&mut self) -> Result<(), InitError> {
        let job = self
            .job
            .take()
            .ok_or_else(|| InitError::Failed("worker already started".to_string()))?;

        let (tx, rx) = channel::bounded(RESULT_CAPACITY);
        let (stop_tx, stop_rx) = channel::bounded(1);
        let evict = rx.clone();
        let interval = self.interval;
        let name = self.metadata.id.clone();

        thread::Builder::new()
            .name(format!("tickboard-{}", name))
            .spawn(move || run_worker(&name, job, interval, tx, evict, stop_rx))
            .map_err(|e| InitError::Failed(format!("failed to spawn worker: {e}")))?;

        self.results = Some(rx);
        self.stop = Some(stop_tx);
        Ok(())
    }

    fn poll(&mut self) -> Result<Snapshot> {
        let Some(results) = &self.results else {
            bail!("worker not started");
        };

        let mut latest = None;
        let mut disconnected = false;
        loop {
            match results.try_recv() {
                Ok(result) => latest = Some(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        match latest {
            Some(Ok(snapshot)) => {
                self.last = Some(snapshot.clone());
                Ok(snapshot)
            }
            Some(Err(message)) => Err(anyhow!(message)),
            None if disconnected => bail!("worker exited"),
            None => Ok(self.last.clone().unwrap_or_else(Snapshot::empty)),
        }
    }

    fn shutdown(&mut self) {
        if self.stop.take().is_some() {
            debug!("Signalled worker {} to stop", self.metadata.id);
        } else {
            warn!("Worker {} was never started", self.metadata.id);
        }
    }
}

impl Drop for WorkerSource {
    fn drop(&mut self) {
        self.stop.take();
    }
}
