use crate::surface::SurfaceSnapshot;
use std::collections::VecDeque;

/// Maximum number of snapshots kept by default.
pub const DEFAULT_MAX_SNAPSHOTS: usize = 20;

/// Bounded undo/redo history of full surface snapshots.
///
/// Checkpointing after an undo drops the redo branch. When the history is
/// full the oldest snapshot is evicted.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<SurfaceSnapshot>,
    /// Index of the snapshot matching the current surface. Meaningless while empty.
    current: usize,
    max_len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SNAPSHOTS)
    }
}

impl History {
    /// Creates an empty history. A limit of zero is treated as one.
    pub fn new(max_len: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            current: 0,
            max_len: max_len.max(1),
        }
    }

    /// Records `snapshot` as the newest state.
    pub fn checkpoint(&mut self, snapshot: SurfaceSnapshot) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.current + 1);
        }
        self.snapshots.push_back(snapshot);
        self.current = self.snapshots.len() - 1;

        if self.snapshots.len() > self.max_len {
            self.snapshots.pop_front();
            self.current -= 1;
        }
        log::debug!("History checkpoint {}/{}", self.current + 1, self.snapshots.len());
    }

    /// Steps back and returns the snapshot to restore, if any.
    pub fn undo(&mut self) -> Option<&SurfaceSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.current -= 1;
        self.snapshots.get(self.current)
    }

    /// Steps forward and returns the snapshot to restore, if any.
    pub fn redo(&mut self) -> Option<&SurfaceSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.current += 1;
        self.snapshots.get(self.current)
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.current < self.snapshots.len() - 1
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then_some(self.current)
    }

    /// The snapshot the current surface is expected to match.
    pub fn current(&self) -> Option<&SurfaceSnapshot> {
        self.snapshots.get(self.current)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &SurfaceSnapshot> {
        self.snapshots.iter()
    }
}
