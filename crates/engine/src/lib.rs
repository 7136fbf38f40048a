use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

pub use error::EngineError;
pub use expense::{DEFAULT_CATEGORY, Expense, ExpenseDraft, ExpenseInput, parse_date};
pub use storage::{ExpenseStore, JsonFileStore, MemoryStore};
pub use summary::Summary;

mod error;
mod expense;
pub mod storage;
mod summary;

type ResultEngine<T> = Result<T, EngineError>;

/// Entry point for every expense operation.
///
/// The engine holds no copy of the collection: each call goes through the
/// configured [`ExpenseStore`]. Mutations take the write half of an internal
/// lock for their whole load-modify-save cycle, so two requests served by
/// the same process never overwrite each other's changes.
pub struct Engine {
    store: Arc<dyn ExpenseStore>,
    lock: RwLock<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn run_blocking<T, F>(&self, op: F) -> ResultEngine<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ExpenseStore) -> ResultEngine<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|err| EngineError::Storage(format!("storage task failed: {err}")))?
    }

    /// All expenses, in stored order.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let _guard = self.lock.read().await;
        self.run_blocking(|store| store.load()).await
    }

    pub async fn expense(&self, id: u64) -> ResultEngine<Expense> {
        let _guard = self.lock.read().await;
        self.run_blocking(move |store| store.get(id))
            .await?
            .ok_or(EngineError::NotFound(id))
    }

    /// Validates `input` and stores it as a new expense.
    pub async fn create_expense(&self, input: ExpenseInput) -> ResultEngine<Expense> {
        let draft = input.validate()?;

        let _guard = self.lock.write().await;
        let expense = self.run_blocking(move |store| store.add(draft)).await?;
        tracing::debug!(
            "created expense {} ({} in {})",
            expense.id,
            expense.amount,
            expense.category
        );
        Ok(expense)
    }

    pub async fn delete_expense(&self, id: u64) -> ResultEngine<()> {
        let _guard = self.lock.write().await;
        if !self.run_blocking(move |store| store.delete(id)).await? {
            return Err(EngineError::NotFound(id));
        }
        tracing::debug!("deleted expense {id}");
        Ok(())
    }

    pub async fn summary(&self) -> ResultEngine<Summary> {
        let expenses = self.list_expenses().await?;
        Ok(Summary::from_expenses(&expenses))
    }

    /// Expenses whose category is exactly `category`.
    pub async fn expenses_by_category(&self, category: &str) -> ResultEngine<Vec<Expense>> {
        let mut expenses = self.list_expenses().await?;
        expenses.retain(|e| e.category == category);
        Ok(expenses)
    }

    /// Expenses dated between `from` and `to`, both inclusive.
    pub async fn expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<Expense>> {
        if from > to {
            return Err(EngineError::Validation(format!(
                "start date {from} is after end date {to}"
            )));
        }
        let mut expenses = self.list_expenses().await?;
        expenses.retain(|e| (from..=to).contains(&e.date));
        Ok(expenses)
    }
}

#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn ExpenseStore>>,
}

impl EngineBuilder {
    /// Pass the storage backend
    pub fn store(mut self, store: Arc<dyn ExpenseStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`.
    ///
    /// The store is read once as a startup check. A collection that cannot
    /// be read is only logged: the engine is still returned and each
    /// operation reports the storage error until the file is fixed.
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = self
            .store
            .ok_or_else(|| EngineError::Storage("no storage backend configured".to_string()))?;

        let engine = Engine {
            store,
            lock: RwLock::new(()),
        };
        match engine.run_blocking(|store| store.load()).await {
            Ok(loaded) => tracing::info!("loaded {} expenses", loaded.len()),
            Err(err) => tracing::warn!("expense collection is unreadable: {err}"),
        }

        Ok(engine)
    }
}
