//! Case-insensitive literal search over the loaded text of a file.
//!
//! - `engine`: the scan itself and its rendering helpers.
//! - `worker`: threaded and inline execution backends.
//! - `debounce`: quiet-period gating of query changes.
//! - `state`: the per-file result and cyclic match navigation.

pub mod debounce;
pub mod engine;
pub mod state;
pub mod worker;

pub use debounce::Debouncer;
pub use engine::{effective_query, search, SearchOptions, SearchResult, Segment};
pub use state::{SearchSnapshot, SearchState};
pub use worker::{
    select_backend, BackendKind, InlineBackend, SearchBackend, SearchJob, SearchOutcome,
    SearchTag, ThreadedBackend, WorkerMode,
};
