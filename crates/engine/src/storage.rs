//! Storage adapters for the expense collection.
//!
//! Every adapter works on the whole collection at once: [`ExpenseStore::load`]
//! returns all records and [`ExpenseStore::save`] replaces all of them. The
//! provided methods build id assignment, insertion and removal on top of
//! those two primitives, so a new backend only has to implement them.

use chrono::Utc;

use crate::{Expense, ExpenseDraft, ResultEngine};

pub use json::JsonFileStore;
pub use memory::MemoryStore;

mod json;
mod memory;

pub trait ExpenseStore: Send + Sync {
    /// Returns every stored expense, in stored order.
    fn load(&self) -> ResultEngine<Vec<Expense>>;

    /// Replaces the stored collection with `expenses`.
    fn save(&self, expenses: &[Expense]) -> ResultEngine<()>;

    /// Stores a new expense with the next free id and the current time.
    fn add(&self, draft: ExpenseDraft) -> ResultEngine<Expense> {
        let mut expenses = self.load()?;
        let expense = draft.into_expense(next_id(&expenses), Utc::now());
        expenses.push(expense.clone());
        self.save(&expenses)?;
        Ok(expense)
    }

    /// Removes the expense with `id`. Returns `false`, without writing
    /// anything, when no such expense exists.
    fn delete(&self, id: u64) -> ResultEngine<bool> {
        let mut expenses = self.load()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            return Ok(false);
        }
        self.save(&expenses)?;
        Ok(true)
    }

    fn get(&self, id: u64) -> ResultEngine<Option<Expense>> {
        Ok(self.load()?.into_iter().find(|e| e.id == id))
    }
}

/// Highest id in the collection plus one, `1` for an empty collection.
pub fn next_id(expenses: &[Expense]) -> u64 {
    expenses.iter().map(|e| e.id).max().unwrap_or(0) + 1
}
