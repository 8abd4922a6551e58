//! The view session: owner of everything shown for the current file.
//!
//! A `ViewSession` holds the open file, its pagination and search state, the
//! search backend and the debouncer. Nothing here is global; two sessions over
//! the same source are fully independent.
//!
//! Asynchronous work is tracked with generations. Every fetch carries a
//! `FetchTicket` and every search job a `SearchTag`; results whose generation no
//! longer matches the session are dropped on arrival.

use crate::classify::classify;
use crate::constants::{DEFAULT_PAGE_SIZE, SEARCH_DEBOUNCE, SEARCH_WAIT};
use crate::core_types::{ContentClass, FilePayload, LineRecord, Window};
use crate::errors::{Error, Result};
use crate::filter::{filter_lines, LevelFilter};
use crate::format::{escape_html, format, FormattedContent};
use crate::pagination::{PageCommand, PaginationController, PaginationSnapshot};
use crate::search::{
    effective_query, select_backend, BackendKind, Debouncer, SearchBackend, SearchJob,
    SearchOptions, SearchOutcome, SearchResult, SearchSnapshot, SearchState, SearchTag,
    WorkerMode,
};
use crate::source::ContentSource;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub page_size: usize,
    pub search: SearchOptions,
    pub debounce: Duration,
    /// Longest [`ViewSession::find_next`] blocks on a flushed query.
    pub search_wait: Duration,
    pub worker_mode: WorkerMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search: SearchOptions::default(),
            debounce: SEARCH_DEBOUNCE,
            search_wait: SEARCH_WAIT,
            worker_mode: WorkerMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Open,
    Page,
}

/// An outstanding fetch. Hand it back to [`ViewSession::complete_fetch`]
/// together with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    file_generation: u64,
    fetch_generation: u64,
    kind: FetchKind,
    path: String,
    window: Option<Window>,
}

impl FetchTicket {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The window to request, `None` for an initial open.
    pub fn window(&self) -> Option<Window> {
        self.window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch or file superseded this one; nothing changed.
    Stale,
}

#[derive(Debug)]
struct CurrentView {
    path: String,
    class: ContentClass,
    formatted: FormattedContent,
    text: Arc<str>,
}

/// Serializable summary of what the session is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub path: Option<String>,
    pub class: Option<ContentClass>,
    pub is_log_like: bool,
    pub line_count: usize,
    pub first_line: Option<usize>,
    pub pagination: PaginationSnapshot,
    pub search_enabled: bool,
    pub search: Option<SearchSnapshot>,
    pub search_pending: bool,
    pub backend: BackendKind,
    pub error: Option<String>,
}

/// Coordinates fetching, rendering, pagination and search for one viewer.
pub struct ViewSession<S: ContentSource> {
    source: S,
    backend: Box<dyn SearchBackend>,
    options: SessionOptions,
    file_generation: u64,
    fetch_generation: u64,
    search_generation: u64,
    current: Option<CurrentView>,
    pagination: PaginationController,
    search: Option<SearchState>,
    awaiting: Option<SearchTag>,
    debouncer: Debouncer<String>,
    error: Option<String>,
}

impl<S: ContentSource> ViewSession<S> {
    /// Creates a session, choosing its search backend from `options.worker_mode`.
    pub fn new(source: S, options: SessionOptions) -> Self {
        let backend = select_backend(options.worker_mode);
        Self::with_backend(source, options, backend)
    }

    /// Creates a session with an explicit search backend.
    pub fn with_backend(
        source: S,
        options: SessionOptions,
        backend: Box<dyn SearchBackend>,
    ) -> Self {
        Self {
            source,
            backend,
            pagination: PaginationController::new(options.page_size),
            debouncer: Debouncer::new(options.debounce),
            options,
            file_generation: 0,
            fetch_generation: 0,
            search_generation: 0,
            current: None,
            search: None,
            awaiting: None,
            error: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    // --- Fetching ---

    /// Starts opening `path`. The current view, pagination and search are
    /// dropped immediately; anything still in flight for them becomes stale.
    pub fn begin_open(&mut self, path: &str) -> FetchTicket {
        self.file_generation += 1;
        self.fetch_generation += 1;
        self.reset_view();
        log::debug!("Opening '{}' (file generation {})", path, self.file_generation);
        FetchTicket {
            file_generation: self.file_generation,
            fetch_generation: self.fetch_generation,
            kind: FetchKind::Open,
            path: path.to_string(),
            window: None,
        }
    }

    /// Starts loading another page of the current file.
    ///
    /// Returns `None` when nothing is open, the file is not paginated, or the
    /// command is a no-op at the current boundary.
    pub fn begin_page(&mut self, command: PageCommand) -> Option<FetchTicket> {
        let path = self.current.as_ref()?.path.clone();
        let window = self.pagination.request(command)?;
        self.fetch_generation += 1;
        Some(FetchTicket {
            file_generation: self.file_generation,
            fetch_generation: self.fetch_generation,
            kind: FetchKind::Page,
            path,
            window: Some(window),
        })
    }

    /// Applies the result of a fetch started with `begin_open` or `begin_page`.
    ///
    /// # Errors
    /// A failed fetch clears the view and returns `Error::ContentUnavailable`
    /// carrying the source's message. Stale tickets never fail.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<FilePayload>,
    ) -> Result<FetchOutcome> {
        if ticket.file_generation != self.file_generation
            || ticket.fetch_generation != self.fetch_generation
        {
            log::debug!(
                "Discarding stale fetch of '{}' (generation {}/{})",
                ticket.path,
                ticket.file_generation,
                ticket.fetch_generation
            );
            return Ok(FetchOutcome::Stale);
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                self.reset_view();
                let error = match e {
                    Error::ContentUnavailable { path, message } => {
                        Error::ContentUnavailable { path, message }
                    }
                    other => Error::ContentUnavailable {
                        path: ticket.path.clone(),
                        message: other.to_string(),
                    },
                };
                log::warn!("Could not load '{}': {}", ticket.path, error);
                self.error = Some(error.to_string());
                return Err(error);
            }
        };

        match ticket.kind {
            FetchKind::Open => self.apply_new_payload(payload),
            FetchKind::Page => self.apply_page(payload),
        }
        Ok(FetchOutcome::Applied)
    }

    /// Opens `path` through the content source and renders it.
    pub fn open(&mut self, path: &str) -> Result<()> {
        let ticket = self.begin_open(path);
        let result = self.source.fetch(path, None);
        self.complete_fetch(ticket, result).map(|_| ())
    }

    /// Opens `path` and moves to the page containing line `offset`.
    ///
    /// Small files are shown whole regardless of `offset`.
    pub fn open_at(&mut self, path: &str, offset: usize) -> Result<()> {
        self.open(path)?;
        if offset > 0 && self.pagination.is_paginated() {
            self.navigate(PageCommand::Goto(offset))?;
        }
        Ok(())
    }

    /// Runs a page command against the content source.
    ///
    /// Returns `Ok(false)` when the command does nothing in the current state.
    pub fn navigate(&mut self, command: PageCommand) -> Result<bool> {
        let Some(ticket) = self.begin_page(command) else {
            return Ok(false);
        };
        let result = self.source.fetch(&ticket.path, ticket.window);
        self.complete_fetch(ticket, result)
            .map(|outcome| outcome == FetchOutcome::Applied)
    }

    /// Shows a payload obtained elsewhere as a newly opened file.
    pub fn load_payload(&mut self, payload: FilePayload) -> Result<()> {
        let ticket = self.begin_open(&payload.path);
        self.complete_fetch(ticket, Ok(payload)).map(|_| ())
    }

    fn reset_view(&mut self) {
        self.current = None;
        self.pagination.reset();
        self.search = None;
        self.awaiting = None;
        self.debouncer.cancel();
        self.error = None;
    }

    fn apply_new_payload(&mut self, payload: FilePayload) {
        let class = classify(payload.declared_type, payload.file_name(), &payload.content);
        let formatted = format(&payload.content, class, payload.offset);
        let text: Arc<str> = Arc::from(formatted.text.as_str());
        log::debug!(
            "Rendered '{}' as {} ({} lines)",
            payload.path,
            formatted.class,
            formatted.lines.len()
        );

        match payload.total_lines {
            Some(total) => {
                self.pagination.enter(total, payload.offset);
                self.search = None;
            }
            None => {
                self.pagination.reset();
                self.search = Some(SearchState::new(Arc::clone(&text)));
            }
        }
        self.current = Some(CurrentView {
            path: payload.path,
            class,
            formatted,
            text,
        });
    }

    fn apply_page(&mut self, payload: FilePayload) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        // Class stays fixed across pages of one file.
        let formatted = format(&payload.content, current.class, payload.offset);
        current.text = Arc::from(formatted.text.as_str());
        current.formatted = formatted;
        match payload.total_lines {
            Some(total) => self.pagination.enter(total, payload.offset),
            None => self.pagination.commit(payload.offset),
        }
    }

    // --- Search ---

    fn check_searchable(&self) -> Result<()> {
        if self.current.is_none() {
            return Err(Error::NoFileOpen);
        }
        if self.pagination.is_paginated() {
            return Err(Error::SearchDisabled);
        }
        Ok(())
    }

    /// Records a query change. The scan starts once the query has been quiet
    /// for the debounce period; see [`ViewSession::tick`].
    ///
    /// A scan already running for an earlier query is superseded and its
    /// result dropped. An empty query clears the search at once.
    ///
    /// # Errors
    /// `Error::NoFileOpen` without a file, `Error::SearchDisabled` while paginated.
    pub fn set_query(&mut self, query: &str, now: Instant) -> Result<()> {
        self.check_searchable()?;
        if query.trim().is_empty() {
            self.clear_search();
            return Ok(());
        }
        self.search_generation += 1;
        self.awaiting = None;
        self.debouncer.push(query.to_string(), now);
        Ok(())
    }

    /// Starts the debounced scan if its quiet period is over, then applies any
    /// finished result. Returns `true` if a scan was started.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = match self.debouncer.poll(now) {
            Some(query) => {
                self.start_search(&query);
                true
            }
            None => false,
        };
        self.poll_search();
        fired
    }

    /// Scans for `query` immediately, skipping the debounce.
    pub fn search_now(&mut self, query: &str) -> Result<()> {
        self.check_searchable()?;
        self.debouncer.cancel();
        if query.trim().is_empty() {
            self.clear_search();
            return Ok(());
        }
        self.start_search(query);
        self.poll_search();
        Ok(())
    }

    fn start_search(&mut self, query: &str) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        self.search_generation += 1;
        let tag = SearchTag {
            file_generation: self.file_generation,
            search_generation: self.search_generation,
        };

        if effective_query(query, &self.options.search).is_none() {
            // Too short to scan: show the text as is.
            self.awaiting = None;
            if let Some(state) = self.search.as_mut() {
                state.apply(SearchResult {
                    query: query.trim().to_string(),
                    ..Default::default()
                });
            }
            return;
        }

        self.awaiting = Some(tag);
        self.backend.submit(SearchJob {
            tag,
            text: Arc::clone(&current.text),
            query: query.to_string(),
            options: self.options.search,
        });
    }

    fn accept(&mut self, outcome: SearchOutcome) -> bool {
        if self.awaiting != Some(outcome.tag) {
            log::debug!(
                "Discarding stale search result for '{}'",
                outcome.result.query
            );
            return false;
        }
        self.awaiting = None;
        log::debug!(
            "Search for '{}' finished in {:?}: {} matches",
            outcome.result.query,
            outcome.elapsed,
            outcome.result.total_matches
        );
        match self.search.as_mut() {
            Some(state) => {
                state.apply(outcome.result);
                true
            }
            None => false,
        }
    }

    /// Applies finished search results without blocking. Stale ones are dropped.
    /// Returns `true` if the displayed result changed.
    pub fn poll_search(&mut self) -> bool {
        let mut updated = false;
        while let Some(outcome) = self.backend.try_recv() {
            updated |= self.accept(outcome);
        }
        updated
    }

    /// Blocks until the outstanding search finishes or `timeout` elapses.
    /// Returns `true` if a result was applied.
    pub fn wait_for_search(&mut self, timeout: Duration) -> bool {
        if self.poll_search() {
            return true;
        }
        let deadline = Instant::now() + timeout;
        while self.awaiting.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.backend.recv_timeout(remaining) {
                Some(outcome) => {
                    if self.accept(outcome) {
                        return true;
                    }
                }
                None => return false,
            }
        }
        false
    }

    /// Moves to the next match. A query still waiting out its debounce period
    /// is scanned right away instead, making its first match active.
    pub fn find_next(&mut self) -> Option<usize> {
        if let Some(query) = self.debouncer.flush() {
            self.start_search(&query);
            self.wait_for_search(self.options.search_wait);
            return self.search.as_ref()?.current_match();
        }
        self.search.as_mut()?.next()
    }

    /// Moves to the previous match, wrapping around to the last one.
    pub fn find_previous(&mut self) -> Option<usize> {
        self.search.as_mut()?.previous()
    }

    /// Drops the query and any pending or running scan. Returns the original
    /// text, unchanged.
    pub fn clear_search(&mut self) -> Option<Arc<str>> {
        self.debouncer.cancel();
        self.awaiting = None;
        self.search_generation += 1;
        self.search.as_mut().map(SearchState::clear)
    }

    // --- Queries ---

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.path.as_str())
    }

    pub fn formatted(&self) -> Option<&FormattedContent> {
        self.current.as_ref().map(|c| &c.formatted)
    }

    /// Lines of the rendered window.
    pub fn lines(&self) -> &[LineRecord] {
        self.current
            .as_ref()
            .map(|c| c.formatted.lines.as_slice())
            .unwrap_or(&[])
    }

    /// Lines of the rendered window at `level`, in order.
    pub fn filter(&self, level: LevelFilter) -> Vec<&LineRecord> {
        filter_lines(self.lines(), level)
    }

    pub fn search_state(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    /// The rendered text currently displayed, including search highlights.
    pub fn current_text(&self) -> Option<&Arc<str>> {
        self.current.as_ref().map(|c| &c.text)
    }

    /// HTML for the current view: search highlights over the raw text while a
    /// search has matches, the formatted lines otherwise.
    pub fn to_html(&self) -> String {
        let Some(current) = self.current.as_ref() else {
            return self
                .error
                .as_deref()
                .map(|e| format!("<div class=\"error\">{}</div>", escape_html(e)))
                .unwrap_or_default();
        };
        match &self.search {
            Some(state) if state.result().highlighted() > 0 => {
                format!("<pre class=\"text-content\">{}</pre>", state.to_html())
            }
            _ => current.formatted.to_html(),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let formatted = self.formatted();
        ViewSnapshot {
            path: self.current_path().map(str::to_string),
            class: formatted.map(|f| f.class),
            is_log_like: formatted.map(|f| f.is_log_like).unwrap_or(false),
            line_count: self.lines().len(),
            first_line: self.lines().first().map(|l| l.number),
            pagination: self.pagination.snapshot(),
            search_enabled: self.current.is_some() && !self.pagination.is_paginated(),
            search: self.search.as_ref().map(SearchState::snapshot),
            search_pending: self.debouncer.is_pending() || self.awaiting.is_some(),
            backend: self.backend.kind(),
            error: self.error.clone(),
        }
    }
}
