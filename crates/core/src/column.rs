//! Column types and column metadata
//!
//! [`ColumnType`] tells the store how to coerce each column of a select
//! result. On the wire it is a small non-negative integer whose meaning is
//! fixed by declaration order:
//!
//! | Index | Kind |
//! |-------|------|
//! | 0 | `Integer` |
//! | 1 | `Float` |
//! | 2 | `Text` |
//! | 3 | `Binary` |
//! | 4 | `Boolean` |
//! | 5 | `Null` |
//!
//! Any other index is rejected with [`UnknownColumnType`]; there is no
//! fallback kind.

use std::fmt;

/// Semantic kind of a result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
    /// UTF-8 text
    Text,
    /// Opaque bytes
    Binary,
    /// Boolean
    Boolean,
    /// Column that only ever holds null
    Null,
}

/// Wire index outside the declared [`ColumnType`] range
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown column type: {0}")]
pub struct UnknownColumnType(pub i64);

impl ColumnType {
    /// Every kind, in wire-index order
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Integer,
        ColumnType::Float,
        ColumnType::Text,
        ColumnType::Binary,
        ColumnType::Boolean,
        ColumnType::Null,
    ];

    /// Map a wire index to its kind.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumnType`] carrying `index` when it is negative or
    /// past the last declared kind.
    pub fn from_index(index: i64) -> Result<Self, UnknownColumnType> {
        match index {
            0 => Ok(ColumnType::Integer),
            1 => Ok(ColumnType::Float),
            2 => Ok(ColumnType::Text),
            3 => Ok(ColumnType::Binary),
            4 => Ok(ColumnType::Boolean),
            5 => Ok(ColumnType::Null),
            other => Err(UnknownColumnType(other)),
        }
    }

    /// The wire index of this kind
    pub fn index(self) -> i64 {
        match self {
            ColumnType::Integer => 0,
            ColumnType::Float => 1,
            ColumnType::Text => 2,
            ColumnType::Binary => 3,
            ColumnType::Boolean => 4,
            ColumnType::Null => 5,
        }
    }

    /// Lowercase name, used in log fields
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Binary => "binary",
            ColumnType::Boolean => "boolean",
            ColumnType::Null => "null",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for ColumnType {
    type Error = UnknownColumnType;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        ColumnType::from_index(index)
    }
}

/// Table column metadata reported by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared type as written in the table schema (e.g. `"INTEGER"`)
    pub column_type: String,
    /// Whether the column carries a NOT NULL constraint
    pub not_null: bool,
}

impl ColumnInfo {
    /// Create column metadata
    pub fn new(name: impl Into<String>, column_type: impl Into<String>, not_null: bool) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            not_null,
        }
    }
}
