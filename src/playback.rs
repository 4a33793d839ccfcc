//! Caller-owned cursor for stepping through a trace.

use crate::error::{Error, Result};

/// Position within a borrowed trace. Never copies or mutates the records.
#[derive(Debug, Clone, Copy)]
pub struct Playback<'a, R> {
    records: &'a [R],
    position: usize,
}

impl<'a, R> Playback<'a, R> {
    /// Start at the first record.
    pub fn new(records: &'a [R]) -> Self {
        Self {
            records,
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The record under the cursor, `None` only for an empty trace.
    pub fn current(&self) -> Option<&'a R> {
        self.records.get(self.position)
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.records.len()
    }

    /// Advance one record. Returns `None` and stays put at the end.
    pub fn next(&mut self) -> Option<&'a R> {
        if self.is_at_end() {
            return None;
        }
        self.position += 1;
        self.current()
    }

    /// Step back one record. Returns `None` and stays put at the start.
    pub fn prev(&mut self) -> Option<&'a R> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.current()
    }

    /// Jump to `index`.
    pub fn seek(&mut self, index: usize) -> Result<&'a R> {
        let record = self.records.get(index).ok_or(Error::StepOutOfRange {
            index,
            len: self.records.len(),
        })?;
        self.position = index;
        Ok(record)
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }
}
