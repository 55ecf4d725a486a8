//! Core types for dbbridge
//!
//! This crate defines the foundational types used by the bridge:
//! - Value: Untyped value enum exchanged with the host
//! - Payload: String-keyed mapping carried by every command
//! - ColumnType: Validated column-type enumeration for select results
//! - ColumnInfo, Row, TransactionId: Store-facing domain types
//! - DatabaseStore: The async data-store contract, with its opaque StoreError

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod payload;
pub mod store;
pub mod types;
pub mod value;

pub use column::{ColumnInfo, ColumnType, UnknownColumnType};
pub use payload::{Payload, PayloadJsonError};
pub use store::{DatabaseStore, StoreError, StoreResult};
pub use types::{Row, TransactionId};
pub use value::Value;
