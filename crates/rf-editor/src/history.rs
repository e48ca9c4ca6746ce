//! Raster undo/redo stacks.
//!
//! A full snapshot of the overlay is pushed immediately before every
//! pixel-mutating action (stroke start, fill). Undo and redo swap the
//! current pixels with the top of the opposite stack, so undoing N times
//! and redoing N times restores the raster bit-for-bit.

use rf_render::{Raster, RasterSnapshot};

pub struct History {
    undo_stack: Vec<RasterSnapshot>,
    redo_stack: Vec<RasterSnapshot>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Snapshot `raster` before a mutation. Clears the redo stack and drops
    /// the oldest snapshot once the depth limit is exceeded.
    pub fn checkpoint(&mut self, raster: &Raster) {
        self.undo_stack.push(raster.snapshot());
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        log::debug!("checkpoint: undo depth {}", self.undo_stack.len());
    }

    /// Restore the most recent checkpoint. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, raster: &mut Raster) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(raster.snapshot());
        raster.restore(&previous);
        true
    }

    /// Re-apply the most recently undone pixels. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self, raster: &mut Raster) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(raster.snapshot());
        raster.restore(&next);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
