//! Pagination state machine for files served in windows.
//!
//! A controller starts in single-shot mode. It becomes paginated when a payload
//! carries a total line count and stays that way until it is reset for another
//! file. Navigation produces window requests; the offset only moves once the
//! requested window is committed.

use crate::core_types::Window;
use serde::Serialize;

/// Pagination bookkeeping for the current file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub total_lines: usize,
    /// Always a multiple of `page_size`, and below `total_lines` when that is non-zero.
    pub current_offset: usize,
    pub page_size: usize,
    pub is_paginated: bool,
}

/// A page navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    First,
    Prev,
    Next,
    Last,
    /// Any line offset; clamped and aligned down to a page boundary.
    Goto(usize),
}

/// What a paginated view shows to drive its controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationSnapshot {
    pub is_paginated: bool,
    pub total_lines: usize,
    pub current_offset: usize,
    pub page_size: usize,
    /// One-based page number.
    pub current_page: usize,
    pub total_pages: usize,
    /// `"{current} / {total}"`.
    pub page_label: String,
    /// `"{first} - {last} of {total}"`, one-based and inclusive.
    pub range_label: String,
    pub can_first: bool,
    pub can_prev: bool,
    pub can_next: bool,
    pub can_last: bool,
}

/// Owns a `PaginationState` and enforces its invariants.
#[derive(Debug, Clone)]
pub struct PaginationController {
    state: PaginationState,
}

impl PaginationController {
    /// # Panics
    /// Panics if `page_size` is zero. Configuration validation rejects that earlier.
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be greater than zero");
        Self {
            state: PaginationState {
                total_lines: 0,
                current_offset: 0,
                page_size,
                is_paginated: false,
            },
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn is_paginated(&self) -> bool {
        self.state.is_paginated
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    /// Back to single-shot mode with nothing loaded.
    pub fn reset(&mut self) {
        self.state.total_lines = 0;
        self.state.current_offset = 0;
        self.state.is_paginated = false;
    }

    /// Switches to paginated mode for a file of `total_lines` lines, positioned
    /// at the window the first payload started at.
    pub fn enter(&mut self, total_lines: usize, offset: usize) {
        self.state.total_lines = total_lines;
        self.state.is_paginated = true;
        self.state.current_offset = self.clamp(offset);
    }

    /// The offset of the last page.
    pub fn last_offset(&self) -> usize {
        if self.state.total_lines == 0 {
            0
        } else {
            (self.state.total_lines - 1) / self.state.page_size * self.state.page_size
        }
    }

    fn clamp(&self, target: usize) -> usize {
        let aligned = target / self.state.page_size * self.state.page_size;
        aligned.min(self.last_offset())
    }

    /// Computes the window a command should load.
    ///
    /// Returns `None` when not paginated, or when the command is a no-op at the
    /// current boundary (its control is disabled).
    pub fn request(&self, command: PageCommand) -> Option<Window> {
        if !self.state.is_paginated {
            return None;
        }
        let current = self.state.current_offset;
        let size = self.state.page_size;
        let target = match command {
            PageCommand::First if current > 0 => 0,
            PageCommand::Prev if current > 0 => current.saturating_sub(size),
            PageCommand::Next if current < self.last_offset() => current + size,
            PageCommand::Last if current < self.last_offset() => self.last_offset(),
            PageCommand::Goto(offset) => self.clamp(offset),
            _ => return None,
        };
        Some(Window {
            offset: target,
            limit: size,
        })
    }

    /// Records that the window at `offset` has been loaded and rendered.
    pub fn commit(&mut self, offset: usize) {
        self.state.current_offset = self.clamp(offset);
    }

    pub fn snapshot(&self) -> PaginationSnapshot {
        let s = &self.state;
        let total_pages = s.total_lines.div_ceil(s.page_size);
        let current_page = if s.total_lines == 0 {
            0
        } else {
            s.current_offset / s.page_size + 1
        };
        let range_label = if s.total_lines == 0 {
            "0 - 0 of 0".to_string()
        } else {
            let end = (s.current_offset + s.page_size).min(s.total_lines);
            format!("{} - {} of {}", s.current_offset + 1, end, s.total_lines)
        };
        let at_start = s.current_offset == 0;
        let at_end = s.current_offset >= self.last_offset();
        PaginationSnapshot {
            is_paginated: s.is_paginated,
            total_lines: s.total_lines,
            current_offset: s.current_offset,
            page_size: s.page_size,
            current_page,
            total_pages,
            page_label: format!("{} / {}", current_page, total_pages),
            range_label,
            can_first: s.is_paginated && !at_start,
            can_prev: s.is_paginated && !at_start,
            can_next: s.is_paginated && !at_end,
            can_last: s.is_paginated && !at_end,
        }
    }
}
