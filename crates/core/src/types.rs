//! Identifier and row types shared by the store contract and the executor

use std::fmt;

use crate::value::Value;

/// Opaque transaction identifier minted by the store
///
/// The bridge never interprets the number; it only carries it between the
/// host and the store. "No transaction" is `Option::<TransactionId>::None`,
/// meaning the store's autocommit context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(pub i64);

impl TransactionId {
    /// Raw wire value
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for TransactionId {
    fn from(id: i64) -> Self {
        TransactionId(id)
    }
}

impl From<TransactionId> for Value {
    fn from(id: TransactionId) -> Self {
        Value::Int(id.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One result row, one value per selected column
pub type Row = Vec<Value>;
