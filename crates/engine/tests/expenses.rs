use std::sync::Arc;

use chrono::NaiveDate;
use engine::{Engine, EngineError, ExpenseInput, JsonFileStore, MemoryStore};
use tempfile::TempDir;

async fn engine_in_memory() -> Engine {
    Engine::builder()
        .store(Arc::new(MemoryStore::default()))
        .build()
        .await
        .unwrap()
}

async fn engine_with_file() -> (Engine, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("expenses.json"));
    let engine = Engine::builder()
        .store(Arc::new(store))
        .build()
        .await
        .unwrap();
    (engine, dir)
}

fn input(description: &str, amount: f64, category: Option<&str>, date: &str) -> ExpenseInput {
    ExpenseInput {
        description: Some(description.to_string()),
        amount: Some(amount),
        category: category.map(str::to_string),
        date: Some(date.to_string()),
    }
}

#[tokio::test]
async fn groceries_scenario_round_trips_through_the_file() {
    let (engine, _dir) = engine_with_file().await;

    let created = engine
        .create_expense(input("Groceries", 45.50, Some("Food"), "2024-01-15"))
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let listed = engine.list_expenses().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(listed[0].description, "Groceries");
    assert_eq!(listed[0].amount, 45.5);
    assert_eq!(listed[0].category, "Food");
    assert_eq!(listed[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

    let summary = engine.summary().await.unwrap();
    assert_eq!(summary.total_expenses, 1);
    assert_eq!(summary.total_amount, 45.5);
    assert_eq!(summary.average_amount, 45.5);
    assert_eq!(summary.category_breakdown.len(), 1);
    assert_eq!(summary.category_breakdown["Food"], 45.5);

    engine.delete_expense(created.id).await.unwrap();
    assert!(engine.list_expenses().await.unwrap().is_empty());

    let summary = engine.summary().await.unwrap();
    assert_eq!(summary.total_expenses, 0);
    assert_eq!(summary.total_amount, 0.0);
    assert_eq!(summary.average_amount, 0.0);
    assert!(summary.category_breakdown.is_empty());
}

#[tokio::test]
async fn ids_are_unique_and_increasing() {
    let engine = engine_in_memory().await;

    let mut last = 0;
    for i in 1..=5 {
        let expense = engine
            .create_expense(input("Coffee", f64::from(i), None, "2024-02-01"))
            .await
            .unwrap();
        assert!(expense.id > last);
        last = expense.id;
    }

    engine.delete_expense(2).await.unwrap();
    let expense = engine
        .create_expense(input("Tea", 1.0, None, "2024-02-01"))
        .await
        .unwrap();
    let ids: Vec<u64> = engine
        .list_expenses()
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(expense.id, 6);
    assert_eq!(ids, vec![1, 3, 4, 5, 6]);
}

#[tokio::test]
async fn deleting_unknown_id_is_not_found_and_changes_nothing() {
    let engine = engine_in_memory().await;
    engine
        .create_expense(input("Bus", 2.5, Some("Transportation"), "2024-02-01"))
        .await
        .unwrap();
    let before = engine.list_expenses().await.unwrap();

    let err = engine.delete_expense(999).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound(999));
    assert_eq!(engine.list_expenses().await.unwrap(), before);
}

#[tokio::test]
async fn negative_amount_is_rejected_without_writing() {
    let engine = engine_in_memory().await;

    let err = engine
        .create_expense(input("Refund?", -5.0, None, "2024-01-15"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(engine.list_expenses().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_category_defaults_to_general() {
    let engine = engine_in_memory().await;
    let expense = engine
        .create_expense(input("Stamps", 3.0, None, "2024-01-20"))
        .await
        .unwrap();
    assert_eq!(expense.category, "General");
}

#[tokio::test]
async fn get_by_id() {
    let engine = engine_in_memory().await;
    let created = engine
        .create_expense(input("Movie", 15.0, Some("Entertainment"), "2024-01-20"))
        .await
        .unwrap();

    assert_eq!(engine.expense(created.id).await.unwrap(), created);
    assert_eq!(
        engine.expense(created.id + 1).await.unwrap_err(),
        EngineError::NotFound(created.id + 1)
    );
}

#[tokio::test]
async fn filters_by_category_and_date_range() {
    let engine = engine_in_memory().await;
    for (description, category, date) in [
        ("Food", "Food", "2024-01-05"),
        ("Gas", "Transportation", "2024-01-10"),
        ("Dinner", "Food", "2024-02-01"),
    ] {
        engine
            .create_expense(input(description, 10.0, Some(category), date))
            .await
            .unwrap();
    }

    let food = engine.expenses_by_category("Food").await.unwrap();
    assert_eq!(food.len(), 2);
    assert!(food.iter().all(|e| e.category == "Food"));

    let january = engine
        .expenses_between(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
        .await
        .unwrap();
    let descriptions: Vec<&str> = january.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Food", "Gas"]);

    let err = engine
        .expenses_between(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn concurrent_creates_do_not_lose_updates() {
    let engine = Arc::new(engine_in_memory().await);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..20 {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move {
            engine
                .create_expense(input("Snack", f64::from(i) + 1.0, None, "2024-03-01"))
                .await
        });
    }
    while let Some(res) = tasks.join_next().await {
        res.unwrap().unwrap();
    }

    let mut ids: Vec<u64> = engine
        .list_expenses()
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn corrupt_file_still_builds_and_fails_per_request() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("expenses.json");
    std::fs::write(&path, "not json").unwrap();

    let engine = Engine::builder()
        .store(Arc::new(JsonFileStore::new(&path)))
        .build()
        .await
        .unwrap();
    assert!(matches!(engine.list_expenses().await, Err(EngineError::Storage(_))));
    assert!(matches!(engine.summary().await, Err(EngineError::Storage(_))));

    std::fs::write(&path, "[]").unwrap();
    assert!(engine.list_expenses().await.unwrap().is_empty());
}
