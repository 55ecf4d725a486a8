//! Result payload construction.
//!
//! Encoding never fails: every value handed to these functions already
//! came out of the store as a valid domain value.

use dbbridge_core::{ColumnInfo, Payload, Row, TransactionId, Value};

/// Result key names.
pub mod keys {
    /// `columnInfos`
    pub const COLUMN_INFOS: &str = "columnInfos";
    /// `tableNames`
    pub const TABLE_NAMES: &str = "tableNames";
    /// `rows`
    pub const ROWS: &str = "rows";
    /// `transactionId`
    pub const TRANSACTION_ID: &str = "transactionId";

    /// `name` (column info)
    pub const NAME: &str = "name";
    /// `type` (column info)
    pub const TYPE: &str = "type";
    /// `notNull` (column info)
    pub const NOT_NULL: &str = "notNull";
}

/// `{columnInfos: [{name, type, notNull}, ...]}`
pub fn encode_column_infos(infos: Vec<ColumnInfo>) -> Payload {
    let infos = infos
        .into_iter()
        .map(|info| {
            Value::from(
                Payload::new()
                    .with(keys::NAME, info.name)
                    .with(keys::TYPE, info.column_type)
                    .with(keys::NOT_NULL, info.not_null),
            )
        })
        .collect::<Vec<_>>();
    Payload::new().with(keys::COLUMN_INFOS, infos)
}

/// `{tableNames: [string, ...]}`
pub fn encode_names(names: Vec<String>) -> Payload {
    let names = names.into_iter().map(Value::String).collect::<Vec<_>>();
    Payload::new().with(keys::TABLE_NAMES, names)
}

/// `{rows: [[value, ...], ...]}`
pub fn encode_rows(rows: Vec<Row>) -> Payload {
    let rows = rows.into_iter().map(Value::Array).collect::<Vec<_>>();
    Payload::new().with(keys::ROWS, rows)
}

/// `{transactionId: int | null}`
pub fn encode_transaction_id(id: Option<TransactionId>) -> Payload {
    Payload::new().with(keys::TRANSACTION_ID, id)
}
