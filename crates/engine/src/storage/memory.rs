use std::sync::Mutex;

use super::ExpenseStore;
use crate::{EngineError, Expense, ResultEngine};

/// Keeps the collection in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: Mutex<Vec<Expense>>,
}

impl ExpenseStore for MemoryStore {
    fn load(&self) -> ResultEngine<Vec<Expense>> {
        let guard = self
            .expenses
            .lock()
            .map_err(|_| EngineError::Storage("memory store poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, expenses: &[Expense]) -> ResultEngine<()> {
        let mut guard = self
            .expenses
            .lock()
            .map_err(|_| EngineError::Storage("memory store poisoned".to_string()))?;
        *guard = expenses.to_vec();
        Ok(())
    }
}
