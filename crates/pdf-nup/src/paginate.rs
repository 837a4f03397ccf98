//! Slot assignment across fixed-capacity output pages

use crate::types::{NupError, Result};

/// Tracks the next free slot of the output page being assembled.
///
/// A page is closed when its grid is full, or when input ends with at
/// least one item on it. No page is ever emitted for zero items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    capacity: usize,
    cursor: usize,
}

impl Paginator {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(NupError::LayoutInvariant(
                "paginator capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            cursor: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items placed on the current page so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_full(&self) -> bool {
        self.cursor == self.capacity
    }

    /// Assign the next item to a slot and return that slot's index.
    ///
    /// Placing onto a full page is a caller bug: the page must be flushed
    /// first, never silently overwritten.
    pub fn place(&mut self) -> Result<usize> {
        if self.is_full() {
            return Err(NupError::LayoutInvariant(format!(
                "place called on a full page ({} of {} slots used)",
                self.cursor, self.capacity
            )));
        }
        let slot = self.cursor;
        self.cursor += 1;
        Ok(slot)
    }

    /// Returns true when the current page must be emitted, and resets the
    /// cursor for the next page.
    pub fn flush_if_needed(&mut self, is_last_item: bool) -> bool {
        let flush = self.is_full() || (is_last_item && self.cursor > 0);
        if flush {
            self.cursor = 0;
        }
        flush
    }
}
