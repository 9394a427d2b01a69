use std::time::{Duration, Instant};

use super::record::Expense;

/// How long a deleted expense stays restorable.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(10);

/// Bounded-lifetime stack of recently deleted expenses.
///
/// There is never more than one live deadline: every push resets it
/// (cancel-and-replace), and once it passes the whole stack is discarded.
/// Expiry is enforced lazily on access instead of by a background timer, so
/// the buffer stays single-threaded like the rest of the store.
#[derive(Debug)]
pub struct UndoBuffer {
    entries: Vec<Expense>,
    deadline: Option<Instant>,
    window: Duration,
}

impl UndoBuffer {
    pub fn new(window: Duration) -> Self {
        Self {
            entries: Vec::new(),
            deadline: None,
            window,
        }
    }

    /// Records a deletion and restarts the expiry window.
    pub fn push(&mut self, expense: Expense) {
        self.purge_expired();
        self.entries.push(expense);
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Takes back the most recently deleted expense, if still within the
    /// window. Popping the last entry cancels the deadline.
    pub fn pop(&mut self) -> Option<Expense> {
        self.purge_expired();
        let entry = self.entries.pop();
        if self.entries.is_empty() {
            self.deadline = None;
        }
        entry
    }

    pub fn is_empty(&mut self) -> bool {
        self.purge_expired();
        self.entries.is_empty()
    }

    fn purge_expired(&mut self) {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.entries.clear();
                self.deadline = None;
            }
        }
    }
}

impl Default for UndoBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_WINDOW)
    }
}
