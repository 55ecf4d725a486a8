//! In-memory store with real transaction buffering, driven by a tiny SQL
//! subset:
//!
//! - `CREATE TABLE name (col TYPE [NOT NULL], ...)`
//! - `INSERT INTO name VALUES (v, ...)` with integers, `'text'`, or `NULL`
//! - `SELECT * FROM name`
//!
//! Writes inside a transaction are buffered until `transaction_finish`
//! commits them; reads inside a transaction see its own pending writes.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use dbbridge::{
    ColumnInfo, ColumnType, DatabaseStore, Row, StoreError, StoreResult, TransactionId, Value,
};
use parking_lot::Mutex;

#[derive(Debug, Clone)]
enum Write {
    Create { table: String, columns: Vec<ColumnInfo> },
    Insert { table: String, row: Row },
}

#[derive(Debug, Clone, Default)]
struct Table {
    columns: Vec<ColumnInfo>,
    rows: Vec<Row>,
}

#[derive(Default)]
struct State {
    tables: BTreeMap<String, Table>,
    open: HashMap<TransactionId, Vec<Write>>,
    next_id: i64,
    finished: Vec<(TransactionId, bool)>,
}

impl State {
    /// Committed tables plus the pending writes of `transaction`.
    fn view(&self, transaction: Option<TransactionId>) -> StoreResult<BTreeMap<String, Table>> {
        let mut tables = self.tables.clone();
        if let Some(id) = transaction {
            let pending = self
                .open
                .get(&id)
                .ok_or_else(|| StoreError::msg(format!("no such transaction: {}", id)))?;
            for write in pending {
                apply(&mut tables, write.clone())?;
            }
        }
        Ok(tables)
    }
}

fn apply(tables: &mut BTreeMap<String, Table>, write: Write) -> StoreResult<()> {
    match write {
        Write::Create { table, columns } => {
            if tables.contains_key(&table) {
                return Err(StoreError::msg(format!("table {} already exists", table)));
            }
            tables.insert(table, Table { columns, rows: vec![] });
        }
        Write::Insert { table, row } => {
            let target = tables
                .get_mut(&table)
                .ok_or_else(|| StoreError::msg(format!("no such table: {}", table)))?;
            if target.columns.len() != row.len() {
                return Err(StoreError::msg(format!(
                    "table {} has {} columns but {} values were supplied",
                    table,
                    target.columns.len(),
                    row.len()
                )));
            }
            for (column, value) in target.columns.iter().zip(&row) {
                if column.not_null && value.is_null() {
                    return Err(StoreError::msg(format!(
                        "NOT NULL constraint failed: {}.{}",
                        table, column.name
                    )));
                }
            }
            target.rows.push(row);
        }
    }
    Ok(())
}

/// The store under test.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished transactions with their commit flag, in finish order.
    pub fn finished(&self) -> Vec<(TransactionId, bool)> {
        self.state.lock().finished.clone()
    }

    pub fn open_transactions(&self) -> usize {
        self.state.lock().open.len()
    }
}

#[async_trait]
impl DatabaseStore for MemoryStore {
    async fn table_column_infos(
        &self,
        table_name: &str,
        transaction: Option<TransactionId>,
    ) -> StoreResult<Vec<ColumnInfo>> {
        let tables = self.state.lock().view(transaction)?;
        tables
            .get(table_name)
            .map(|t| t.columns.clone())
            .ok_or_else(|| StoreError::msg(format!("no such table: {}", table_name)))
    }

    async fn table_names(&self, transaction: Option<TransactionId>) -> StoreResult<Vec<String>> {
        let tables = self.state.lock().view(transaction)?;
        Ok(tables.keys().cloned().collect())
    }

    async fn transaction_start(&self) -> StoreResult<Option<TransactionId>> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = TransactionId(state.next_id);
        state.open.insert(id, Vec::new());
        Ok(Some(id))
    }

    async fn transaction_is_autocommit(&self) -> StoreResult<Option<TransactionId>> {
        let state = self.state.lock();
        Ok(state.open.keys().max().copied())
    }

    async fn transaction_finish(&self, transaction: TransactionId, commit: bool) -> StoreResult<()> {
        let mut state = self.state.lock();
        let pending = state
            .open
            .remove(&transaction)
            .ok_or_else(|| StoreError::msg(format!("no such transaction: {}", transaction)))?;
        if commit {
            let mut tables = state.tables.clone();
            for write in pending {
                apply(&mut tables, write)?;
            }
            state.tables = tables;
        }
        state.finished.push((transaction, commit));
        Ok(())
    }

    async fn query_execute(&self, query: &str, transaction: Option<TransactionId>) -> StoreResult<()> {
        let write = parse_write(query)?;
        let mut state = self.state.lock();
        match transaction {
            Some(id) => {
                // Validate against the transaction's own view before buffering.
                let mut view = state.view(Some(id))?;
                apply(&mut view, write.clone())?;
                if let Some(pending) = state.open.get_mut(&id) {
                    pending.push(write);
                }
                Ok(())
            }
            None => apply(&mut state.tables, write),
        }
    }

    async fn query_select(
        &self,
        query: &str,
        column_types: &[ColumnType],
        transaction: Option<TransactionId>,
    ) -> StoreResult<Vec<Row>> {
        let table_name = query
            .strip_prefix("SELECT * FROM ")
            .map(str::trim)
            .ok_or_else(|| StoreError::msg(format!("unsupported query: {}", query)))?;
        let tables = self.state.lock().view(transaction)?;
        let table = tables
            .get(table_name)
            .ok_or_else(|| StoreError::msg(format!("no such table: {}", table_name)))?;
        if table.columns.len() != column_types.len() {
            return Err(StoreError::msg(format!(
                "{} column types declared for {} columns",
                column_types.len(),
                table.columns.len()
            )));
        }
        Ok(table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(column_types)
                    .map(|(v, t)| coerce(v, *t))
                    .collect()
            })
            .collect())
    }
}

fn coerce(value: &Value, column_type: ColumnType) -> Value {
    match (column_type, value) {
        (_, Value::Null) | (ColumnType::Null, _) => Value::Null,
        (ColumnType::Integer, Value::Int(i)) => Value::Int(*i),
        (ColumnType::Float, Value::Int(i)) => Value::Float(*i as f64),
        (ColumnType::Boolean, Value::Int(i)) => Value::Bool(*i != 0),
        (ColumnType::Text, Value::Int(i)) => Value::String(i.to_string()),
        (ColumnType::Binary, Value::String(s)) => Value::Bytes(s.as_bytes().to_vec()),
        (_, other) => other.clone(),
    }
}

fn parse_write(query: &str) -> StoreResult<Write> {
    let unsupported = || StoreError::msg(format!("unsupported query: {}", query));

    if let Some(rest) = query.strip_prefix("CREATE TABLE ") {
        let (table, body) = rest.split_once('(').ok_or_else(unsupported)?;
        let body = body.trim_end().strip_suffix(')').ok_or_else(unsupported)?;
        let columns = body
            .split(',')
            .map(|column| -> StoreResult<ColumnInfo> {
                let mut words = column.split_whitespace();
                let name = words.next().ok_or_else(unsupported)?;
                let declared = words.next().ok_or_else(unsupported)?;
                let not_null = words.collect::<Vec<_>>() == ["NOT", "NULL"];
                Ok(ColumnInfo::new(name, declared, not_null))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        return Ok(Write::Create {
            table: table.trim().to_string(),
            columns,
        });
    }

    if let Some(rest) = query.strip_prefix("INSERT INTO ") {
        let (table, values) = rest.split_once(" VALUES ").ok_or_else(unsupported)?;
        let values = values
            .trim()
            .strip_prefix('(')
            .and_then(|v| v.strip_suffix(')'))
            .ok_or_else(unsupported)?;
        let row = values
            .split(',')
            .map(|v| {
                let v = v.trim();
                if v == "NULL" {
                    Ok(Value::Null)
                } else if let Some(text) = v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
                    Ok(Value::String(text.to_string()))
                } else {
                    v.parse::<i64>().map(Value::Int).map_err(|_| unsupported())
                }
            })
            .collect::<StoreResult<Row>>()?;
        return Ok(Write::Insert {
            table: table.trim().to_string(),
            row,
        });
    }

    Err(unsupported())
}
