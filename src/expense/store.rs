use std::time::Duration;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::errors::{Result, SplitError};
use crate::storage::StorageBackend;

use super::record::{Expense, ExpenseDraft};
use super::undo::UndoBuffer;
use super::validate::validate_draft;

/// Which side of the drop target a dragged row lands on. The presentation
/// layer maps pointer position (top half / bottom half of the row) to this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

/// Owner of the ordered expense collection and its undo buffer.
///
/// Every successful mutation is written through to the storage backend. A
/// failed save is logged and swallowed: the in-memory collection stays
/// authoritative and the next mutation retries the write.
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    undo: UndoBuffer,
    storage: Box<dyn StorageBackend>,
}

impl ExpenseStore {
    /// An empty store over the given backend, ignoring any stored state.
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            expenses: Vec::new(),
            undo: UndoBuffer::default(),
            storage,
        }
    }

    /// Loads the stored collection; unreadable or malformed state downgrades
    /// to an empty collection with a logged warning, never an error.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let expenses = match storage.load() {
            Ok(expenses) => expenses,
            Err(err) => {
                tracing::warn!("failed to load stored expenses, starting empty: {err}");
                Vec::new()
            }
        };
        Self {
            expenses,
            undo: UndoBuffer::default(),
            storage,
        }
    }

    /// Overrides the undo expiry window (default 10 seconds).
    pub fn with_undo_window(mut self, window: Duration) -> Self {
        self.undo = UndoBuffer::new(window);
        self
    }

    /// Validates the draft, appends it with a fresh id, and persists.
    pub fn add(&mut self, draft: ExpenseDraft) -> Result<&Expense> {
        let draft = validate_draft(draft, today())?;
        let expense = Expense::from_draft(Uuid::new_v4(), draft);
        self.expenses.push(expense);
        self.persist();
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Replaces the identified record in place; its position is unchanged.
    pub fn update(&mut self, id: Uuid, draft: ExpenseDraft) -> Result<&Expense> {
        let pos = self.position(id).ok_or(SplitError::NotFound(id))?;
        let draft = validate_draft(draft, today())?;
        self.expenses[pos] = Expense::from_draft(id, draft);
        self.persist();
        Ok(&self.expenses[pos])
    }

    /// Removes the record and parks it in the undo buffer, restarting the
    /// expiry window.
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let pos = self.position(id).ok_or(SplitError::NotFound(id))?;
        let removed = self.expenses.remove(pos);
        self.undo.push(removed);
        self.persist();
        Ok(())
    }

    /// Restores the most recently deleted expense, appending it to the end of
    /// the collection. Returns `None` when the buffer is empty or expired.
    pub fn undo_delete(&mut self) -> Option<Expense> {
        let expense = self.undo.pop()?;
        self.expenses.push(expense.clone());
        self.persist();
        Some(expense)
    }

    /// Drag-and-drop reorder: moves `moved` next to `target` on the given
    /// side. No-op (returns false) when the ids match or either is absent.
    pub fn move_before(&mut self, moved: Uuid, target: Uuid, side: DropSide) -> bool {
        if moved == target {
            return false;
        }
        let Some(src) = self.position(moved) else {
            return false;
        };
        let Some(mut dst) = self.position(target) else {
            return false;
        };
        let item = self.expenses.remove(src);
        if src < dst {
            dst -= 1;
        }
        let insert_at = match side {
            DropSide::Before => dst,
            DropSide::After => dst + 1,
        };
        self.expenses.insert(insert_at, item);
        self.persist();
        true
    }

    /// Swaps the record with its predecessor. No-op at the top.
    pub fn move_up(&mut self, id: Uuid) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => {
                self.expenses.swap(pos - 1, pos);
                self.persist();
                true
            }
            _ => false,
        }
    }

    /// Swaps the record with its successor. No-op at the bottom.
    pub fn move_down(&mut self, id: Uuid) -> bool {
        match self.position(id) {
            Some(pos) if pos + 1 < self.expenses.len() => {
                self.expenses.swap(pos, pos + 1);
                self.persist();
                true
            }
            _ => false,
        }
    }

    /// Read-only view of the collection in user order.
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn find(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.expenses) {
            tracing::warn!("failed to persist expenses, keeping in-memory state: {err}");
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
