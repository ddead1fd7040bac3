//! Passive edit history: whole-document snapshots with undo/redo.
//!
//! The history never interprets edits. The owning `Document` records a
//! snapshot immediately before each mutation, so replace operations from
//! the search engine arrive here as ordinary buffer edits. Successive
//! identical snapshots are skipped via a content hash, the stack is trimmed
//! at a fixed depth, and any new edit clears the redo stack.

use core_text::Buffer;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Maximum number of snapshots retained.
pub const HISTORY_MAX: usize = 200;

/// A full-document snapshot. Cloning the rope is cheap enough that coarse
/// whole-buffer capture beats differential edits at this document scale.
#[derive(Clone)]
pub struct EditSnapshot {
    pub buffer: Buffer,
    /// Content hash at capture, used to skip identical successive snapshots.
    pub hash: u64,
}

pub struct EditHistory {
    undo_stack: Vec<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    snapshots_skipped: u64,
    limit: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_MAX)
    }

    /// A history bounded at `limit` snapshots (at least 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            snapshots_skipped: 0,
            limit: limit.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    /// Capture the pre-edit state of `buffer`. Call immediately before a
    /// mutation.
    pub fn record(&mut self, buffer: &Buffer) {
        let hash = buffer_hash(buffer);
        if let Some(last) = self.undo_stack.last()
            && last.hash == hash
        {
            self.snapshots_skipped += 1;
            trace!(
                target: "session.history",
                undo_depth = self.undo_stack.len(),
                hash,
                "snapshot_dedupe_skip"
            );
            return;
        }
        self.undo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            hash,
        });
        trace!(
            target: "session.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            hash,
            "record_snapshot"
        );
        if self.undo_stack.len() > self.limit {
            let _ = self.undo_stack.remove(0);
            trace!(target: "session.history", "undo_stack_trimmed");
        }
        self.redo_stack.clear();
    }

    /// Restore the most recent snapshot into `buffer`. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut Buffer) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(
            target: "session.history",
            undo_depth = self.undo_stack.len(),
            "undo_pop"
        );
        self.redo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            hash: buffer_hash(buffer),
        });
        *buffer = last.buffer;
        true
    }

    /// Re-apply the most recently undone snapshot. Returns false when there
    /// is nothing to redo.
    pub fn redo(&mut self, buffer: &mut Buffer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(
            target: "session.history",
            redo_depth = self.redo_stack.len(),
            "redo_pop"
        );
        self.undo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            hash: buffer_hash(buffer),
        });
        *buffer = next.buffer;
        true
    }
}

fn buffer_hash(buffer: &Buffer) -> u64 {
    let mut h = DefaultHasher::new();
    h.write(buffer.text().as_bytes());
    h.finish()
}
