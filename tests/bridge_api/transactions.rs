//! Transaction lifecycle through the bridge.

use dbbridge::{Error, Output, Payload, StoreError, TransactionId, Value};

use crate::setup;

fn in_txn(txn: &Value) -> Payload {
    Payload::new().with("transactionId", txn.clone())
}

async fn execute(bridge: &dbbridge::Bridge, query: &str, txn: Value) -> dbbridge::Result<Output> {
    bridge
        .call(
            "Query_Execute",
            Some(Payload::new().with("query", query).with("transactionId", txn)),
        )
        .await
}

async fn start(bridge: &dbbridge::Bridge) -> Value {
    let out = bridge.call("Transaction_Start", None).await.unwrap();
    out.into_payload()
        .and_then(|p| p.get("transactionId").cloned())
        .unwrap()
}

async fn table_names(bridge: &dbbridge::Bridge, txn: Value) -> Value {
    bridge
        .call("GetTableNames", Some(in_txn(&txn)))
        .await
        .unwrap()
        .into_payload()
        .and_then(|p| p.get("tableNames").cloned())
        .unwrap()
}

#[tokio::test]
async fn test_commit_publishes_buffered_writes() {
    let (store, bridge) = setup();

    let txn = start(&bridge).await;
    assert_eq!(txn, Value::Int(1));

    let out = execute(&bridge, "CREATE TABLE users (id INTEGER NOT NULL, name TEXT)", txn.clone())
        .await
        .unwrap();
    assert!(out.is_unit());

    // Visible inside the transaction, not outside it.
    assert_eq!(
        table_names(&bridge, txn.clone()).await,
        Value::Array(vec![Value::String("users".into())])
    );
    assert_eq!(table_names(&bridge, Value::Null).await, Value::Array(vec![]));

    let finish = Payload::new().with("transactionId", txn.clone()).with("commit", true);
    let out = bridge.call("Transaction_Finish", Some(finish)).await.unwrap();
    assert_eq!(out, Output::Unit);

    assert_eq!(
        table_names(&bridge, Value::Null).await,
        Value::Array(vec![Value::String("users".into())])
    );
    assert_eq!(store.finished(), vec![(TransactionId(1), true)]);
    assert_eq!(store.open_transactions(), 0);
}

#[tokio::test]
async fn test_rollback_discards_buffered_writes() {
    let (store, bridge) = setup();
    execute(&bridge, "CREATE TABLE notes (body TEXT)", Value::Null)
        .await
        .unwrap();

    let txn = start(&bridge).await;
    execute(&bridge, "INSERT INTO notes VALUES ('draft')", txn.clone())
        .await
        .unwrap();

    let select = |txn: Value| {
        Payload::new()
            .with("query", "SELECT * FROM notes")
            .with("columnTypes", vec![Value::Int(2)])
            .with("transactionId", txn)
    };
    let out = bridge.call("Query_Select", Some(select(txn.clone()))).await.unwrap();
    assert_eq!(
        out.payload().and_then(|p| p.get("rows")),
        Some(&Value::Array(vec![Value::Array(vec![Value::String("draft".into())])]))
    );

    let finish = Payload::new().with("transactionId", txn).with("commit", false);
    bridge.call("Transaction_Finish", Some(finish)).await.unwrap();

    let out = bridge.call("Query_Select", Some(select(Value::Null))).await.unwrap();
    assert_eq!(
        out.payload().and_then(|p| p.get("rows")),
        Some(&Value::Array(vec![]))
    );
    assert_eq!(store.finished(), vec![(TransactionId(1), false)]);
}

#[tokio::test]
async fn test_is_autocommit_reports_open_transaction() {
    let (_store, bridge) = setup();

    let out = bridge.call("Transaction_IsAutocommit", None).await.unwrap();
    assert_eq!(out, Output::Payload(Payload::new().with("transactionId", Value::Null)));

    let txn = start(&bridge).await;
    let out = bridge
        .call("Transaction_IsAutocommit", Some(Payload::new()))
        .await
        .unwrap();
    assert_eq!(out, Output::Payload(Payload::new().with("transactionId", txn)));
}

#[tokio::test]
async fn test_finishing_unknown_transaction_is_a_store_error() {
    let (store, bridge) = setup();

    let finish = Payload::new().with("transactionId", 42i64).with("commit", true);
    let result = bridge.call("Transaction_Finish", Some(finish)).await;

    match result {
        Err(Error::Store(e)) => assert_eq!(e.to_string(), "no such transaction: 42"),
        other => panic!("Expected store error, got {:?}", other),
    }
    assert!(store.finished().is_empty());
}

#[tokio::test]
async fn test_constraint_failure_keeps_transaction_open() {
    let (store, bridge) = setup();
    execute(&bridge, "CREATE TABLE t (id INTEGER NOT NULL)", Value::Null)
        .await
        .unwrap();

    let txn = start(&bridge).await;
    let result = execute(&bridge, "INSERT INTO t VALUES (NULL)", txn.clone()).await;
    assert!(matches!(&result, Err(Error::Store(e)) if e.to_string().contains("NOT NULL")));
    assert_eq!(store.open_transactions(), 1);

    execute(&bridge, "INSERT INTO t VALUES (7)", txn.clone()).await.unwrap();
    let finish = Payload::new().with("transactionId", txn).with("commit", true);
    bridge.call("Transaction_Finish", Some(finish)).await.unwrap();

    let out = bridge
        .call(
            "Query_Select",
            Some(
                Payload::new()
                    .with("query", "SELECT * FROM t")
                    .with("columnTypes", vec![Value::Int(0)])
                    .with("transactionId", Value::Null),
            ),
        )
        .await
        .unwrap();
    assert_eq!(
        out.payload().and_then(|p| p.get("rows")),
        Some(&Value::Array(vec![Value::Array(vec![Value::Int(7)])]))
    );
}

#[tokio::test]
async fn test_column_infos_see_transaction_schema() {
    let (_store, bridge) = setup();
    let txn = start(&bridge).await;
    execute(&bridge, "CREATE TABLE pets (name TEXT NOT NULL, age INTEGER)", txn.clone())
        .await
        .unwrap();

    let args = Payload::new().with("tableName", "pets").with("transactionId", txn);
    let out = bridge.call("GetTableColumnInfos", Some(args)).await.unwrap();

    let column = |name: &str, column_type: &str, not_null: bool| {
        Value::Object(
            Payload::new()
                .with("name", name)
                .with("type", column_type)
                .with("notNull", not_null)
                .into_inner(),
        )
    };
    assert_eq!(
        out.payload().and_then(|p| p.get("columnInfos")),
        Some(&Value::Array(vec![
            column("name", "TEXT", true),
            column("age", "INTEGER", false),
        ]))
    );

    // Outside the transaction the table does not exist yet.
    let args = Payload::new()
        .with("tableName", "pets")
        .with("transactionId", Value::Null);
    let result = bridge.call("GetTableColumnInfos", Some(args)).await;
    assert!(matches!(result, Err(Error::Store(e)) if e.to_string() == "no such table: pets"));
}

#[tokio::test]
async fn test_store_error_passes_through_unchanged() {
    let (_store, bridge) = setup();
    let result = execute(&bridge, "DROP TABLE nothing", Value::Null).await;
    let err = match result {
        Err(Error::Store(e)) => e,
        other => panic!("Expected store error, got {:?}", other),
    };
    assert_eq!(err.to_string(), StoreError::msg("unsupported query: DROP TABLE nothing").to_string());
}
