//! Execution backends for search scans.
//!
//! A session picks one backend when it starts and keeps it. The threaded backend
//! hands jobs to a dedicated worker thread over a channel; the inline backend
//! runs the scan on the calling thread. Both run the same `search` function, so
//! they produce identical results for identical jobs.

use super::engine::{search, SearchOptions, SearchResult};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Identifies the state a scan was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTag {
    pub file_generation: u64,
    pub search_generation: u64,
}

/// An immutable unit of work for a backend.
#[derive(Debug, Clone)]
pub struct SearchJob {
    pub tag: SearchTag,
    pub text: Arc<str>,
    pub query: String,
    pub options: SearchOptions,
}

/// A finished scan, still carrying the tag of the job that produced it.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub tag: SearchTag,
    pub result: SearchResult,
    pub elapsed: Duration,
}

impl SearchJob {
    fn run(self) -> SearchOutcome {
        let start = Instant::now();
        let result = search(&self.text, &self.query, &self.options);
        SearchOutcome {
            tag: self.tag,
            result,
            elapsed: start.elapsed(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Threaded,
    Inline,
}

/// Runs search jobs and hands back their outcomes in submission order.
pub trait SearchBackend: Send {
    /// Queues a job. Never blocks on the scan itself for threaded backends.
    fn submit(&mut self, job: SearchJob);

    /// Returns a finished outcome if one is ready.
    fn try_recv(&mut self) -> Option<SearchOutcome>;

    /// Waits up to `timeout` for a finished outcome.
    fn recv_timeout(&mut self, timeout: Duration) -> Option<SearchOutcome>;

    fn kind(&self) -> BackendKind;
}

/// Runs every job synchronously inside `submit`.
#[derive(Debug, Default)]
pub struct InlineBackend {
    ready: VecDeque<SearchOutcome>,
}

impl InlineBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchBackend for InlineBackend {
    fn submit(&mut self, job: SearchJob) {
        self.ready.push_back(job.run());
    }

    fn try_recv(&mut self) -> Option<SearchOutcome> {
        self.ready.pop_front()
    }

    fn recv_timeout(&mut self, _timeout: Duration) -> Option<SearchOutcome> {
        self.ready.pop_front()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Inline
    }
}

/// Runs jobs on a dedicated worker thread.
///
/// When several jobs are queued the worker only runs the newest one; earlier
/// ones are superseded before they start.
pub struct ThreadedBackend {
    jobs: Option<Sender<SearchJob>>,
    outcomes: Receiver<SearchOutcome>,
    handle: Option<JoinHandle<()>>,
    // Jobs the worker could not accept are computed here instead.
    fallback: VecDeque<SearchOutcome>,
}

impl ThreadedBackend {
    /// Spawns the worker thread.
    ///
    /// # Errors
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn() -> std::io::Result<Self> {
        let (job_tx, job_rx) = unbounded::<SearchJob>();
        let (outcome_tx, outcome_rx) = unbounded::<SearchOutcome>();

        let handle = thread::Builder::new()
            .name("logview-search".into())
            .spawn(move || worker_loop(job_rx, outcome_tx))?;

        Ok(Self {
            jobs: Some(job_tx),
            outcomes: outcome_rx,
            handle: Some(handle),
            fallback: VecDeque::new(),
        })
    }
}

fn worker_loop(jobs: Receiver<SearchJob>, outcomes: Sender<SearchOutcome>) {
    while let Ok(mut job) = jobs.recv() {
        loop {
            match jobs.try_recv() {
                Ok(newer) => job = newer,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }
        if outcomes.send(job.run()).is_err() {
            return;
        }
    }
    log::debug!("Search worker shutting down");
}

impl SearchBackend for ThreadedBackend {
    fn submit(&mut self, job: SearchJob) {
        let Some(jobs) = &self.jobs else {
            self.fallback.push_back(job.run());
            return;
        };
        if let Err(err) = jobs.send(job) {
            log::warn!("Search worker is gone, running scan inline");
            self.fallback.push_back(err.into_inner().run());
        }
    }

    fn try_recv(&mut self) -> Option<SearchOutcome> {
        if let Some(outcome) = self.fallback.pop_front() {
            return Some(outcome);
        }
        self.outcomes.try_recv().ok()
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Option<SearchOutcome> {
        if let Some(outcome) = self.fallback.pop_front() {
            return Some(outcome);
        }
        match self.outcomes.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("Search worker disconnected");
                None
            }
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Threaded
    }
}

impl Drop for ThreadedBackend {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                log::warn!("Search worker panicked: {:?}", e);
            }
        }
    }
}

/// How a session chooses its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerMode {
    /// Threaded when more than one CPU is available, inline otherwise.
    #[default]
    Auto,
    Threaded,
    Inline,
}

/// Creates the backend for `mode`, falling back to inline if the worker
/// thread cannot be spawned.
pub fn select_backend(mode: WorkerMode) -> Box<dyn SearchBackend> {
    let want_thread = match mode {
        WorkerMode::Inline => false,
        WorkerMode::Threaded => true,
        WorkerMode::Auto => thread::available_parallelism()
            .map(|n| n.get() > 1)
            .unwrap_or(false),
    };
    if !want_thread {
        log::debug!("Using inline search backend");
        return Box::new(InlineBackend::new());
    }
    match ThreadedBackend::spawn() {
        Ok(backend) => {
            log::debug!("Using threaded search backend");
            Box::new(backend)
        }
        Err(e) => {
            log::warn!(
                "Could not start search worker ({}), searching on the calling thread",
                e
            );
            Box::new(InlineBackend::new())
        }
    }
}
