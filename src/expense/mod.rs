pub mod record;
pub mod store;
pub mod undo;
pub mod validate;

pub use record::{Expense, ExpenseDraft, Participant};
pub use store::{DropSide, ExpenseStore};
pub use undo::DEFAULT_UNDO_WINDOW;
