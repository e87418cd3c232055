//=========================================================================
// Pending Changes
//=========================================================================
//
// Stack mutations requested during a traversal.
//
// States queue changes here while the stack walks them. The stack applies
// the queue in request order once the walk is over.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::StateKey;

//=== PendingChange =======================================================

/// A deferred stack operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingChange<K: StateKey> {
    /// Construct the registered state and put it on top.
    Push(K),

    /// Remove the top state.
    Pop,

    /// Remove every state.
    Clear,
}

//=== PendingChanges ======================================================

/// FIFO of requested stack operations.
#[derive(Debug)]
pub struct PendingChanges<K: StateKey> {
    queue: Vec<PendingChange<K>>,
}

impl<K: StateKey> PendingChanges<K> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn request_push(&mut self, id: K) {
        self.queue.push(PendingChange::Push(id));
    }

    pub fn request_pop(&mut self) {
        self.queue.push(PendingChange::Pop);
    }

    pub fn request_clear(&mut self) {
        self.queue.push(PendingChange::Clear);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all changes, leaving the queue empty.
    pub fn take(&mut self) -> Vec<PendingChange<K>> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: StateKey> Default for PendingChanges<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
