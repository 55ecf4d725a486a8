//! Typed argument extraction from untyped payloads.
//!
//! Every helper only inspects the payload. None of them touch the store,
//! so a failure here short-circuits a handler before any side effect.

use dbbridge_core::{ColumnType, Payload, TransactionId, Value};

use crate::config::TransactionIdPolicy;
use crate::error::DecodeError;

/// Whether a nullable key must be present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPresence {
    /// The key must exist; only its value may be null
    Required,
    /// A missing key is read the same as null
    Optional,
}

/// The argument payload, or `MissingArgs` if the host sent none.
pub fn require_args(args: Option<&Payload>) -> Result<&Payload, DecodeError> {
    args.ok_or(DecodeError::MissingArgs)
}

/// A string value.
pub fn require_string(payload: &Payload, key: &str) -> Result<String, DecodeError> {
    match lookup(payload, key)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(wrong_type(key, "String", other)),
    }
}

/// A non-null integer value.
pub fn require_int(payload: &Payload, key: &str) -> Result<i64, DecodeError> {
    match lookup(payload, key)? {
        Value::Int(i) => Ok(*i),
        other => Err(wrong_type(key, "Int", other)),
    }
}

/// A boolean value.
pub fn require_bool(payload: &Payload, key: &str) -> Result<bool, DecodeError> {
    match lookup(payload, key)? {
        Value::Bool(b) => Ok(*b),
        other => Err(wrong_type(key, "Bool", other)),
    }
}

/// An integer that may be null.
///
/// Null decodes to `None`. A missing key is `None` under
/// [`KeyPresence::Optional`] and an error under [`KeyPresence::Required`].
pub fn require_optional_int(
    payload: &Payload,
    key: &str,
    presence: KeyPresence,
) -> Result<Option<i64>, DecodeError> {
    match payload.get(key) {
        None => match presence {
            KeyPresence::Required => Err(missing(key)),
            KeyPresence::Optional => Ok(None),
        },
        Some(Value::Null) => Ok(None),
        Some(Value::Int(i)) => Ok(Some(*i)),
        Some(other) => Err(wrong_type(key, "Int or Null", other)),
    }
}

/// A sequence whose elements are all integers.
pub fn require_int_sequence(payload: &Payload, key: &str) -> Result<Vec<i64>, DecodeError> {
    let items = match lookup(payload, key)? {
        Value::Array(items) => items,
        other => return Err(wrong_type(key, "Array", other)),
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Int(i) => Ok(*i),
            other => Err(DecodeError::WrongElementType {
                key: key.to_string(),
                index,
                expected: "Int",
                actual: other.type_name(),
            }),
        })
        .collect()
}

/// The `transactionId` key, honouring the configured presence rule.
///
/// `presence` is the command's own rule; [`TransactionIdPolicy::Strict`]
/// upgrades it to [`KeyPresence::Required`].
pub fn transaction_id(
    payload: &Payload,
    presence: KeyPresence,
    policy: TransactionIdPolicy,
) -> Result<Option<TransactionId>, DecodeError> {
    let presence = match policy {
        TransactionIdPolicy::Strict => KeyPresence::Required,
        TransactionIdPolicy::PerCommand => presence,
    };
    Ok(require_optional_int(payload, keys::TRANSACTION_ID, presence)?.map(TransactionId))
}

/// Convert wire column-type indices, stopping at the first invalid one.
pub fn column_types(indices: &[i64]) -> Result<Vec<ColumnType>, dbbridge_core::UnknownColumnType> {
    indices.iter().map(|&i| ColumnType::from_index(i)).collect()
}

/// Wire key names.
pub mod keys {
    /// `tableName`
    pub const TABLE_NAME: &str = "tableName";
    /// `transactionId`
    pub const TRANSACTION_ID: &str = "transactionId";
    /// `commit`
    pub const COMMIT: &str = "commit";
    /// `query`
    pub const QUERY: &str = "query";
    /// `columnTypes`
    pub const COLUMN_TYPES: &str = "columnTypes";
}

fn lookup<'a>(payload: &'a Payload, key: &str) -> Result<&'a Value, DecodeError> {
    payload.get(key).ok_or_else(|| missing(key))
}

fn missing(key: &str) -> DecodeError {
    DecodeError::Missing {
        key: key.to_string(),
    }
}

fn wrong_type(key: &str, expected: &'static str, actual: &Value) -> DecodeError {
    DecodeError::WrongType {
        key: key.to_string(),
        expected,
        actual: actual.type_name(),
    }
}
