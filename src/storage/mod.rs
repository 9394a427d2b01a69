pub mod json_backend;

pub use json_backend::JsonStorage;

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::Result;
use crate::expense::Expense;

/// Trait that abstracts the key-value persistence boundary.
///
/// Implementations receive the full ordered collection on every save; the
/// store treats a failed save as non-fatal and retries on the next mutation.
pub trait StorageBackend {
    fn save(&self, expenses: &[Expense]) -> Result<()>;
    fn load(&self) -> Result<Vec<Expense>>;
}

/// In-process backend, shared by cloning. Used as a test double and for
/// callers that want a purely ephemeral store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    saved: Rc<RefCell<Vec<Expense>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the most recently saved collection.
    pub fn saved(&self) -> Vec<Expense> {
        self.saved.borrow().clone()
    }
}

impl StorageBackend for MemoryStorage {
    fn save(&self, expenses: &[Expense]) -> Result<()> {
        *self.saved.borrow_mut() = expenses.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<Expense>> {
        Ok(self.saved.borrow().clone())
    }
}
