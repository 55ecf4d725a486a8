//! # dbbridge Executor
//!
//! Command dispatch and marshalling between a host environment and a
//! structured data store.
//!
//! This is the only crate hosts need to import. It provides:
//! - [`Bridge`] - The entry point: invoke a command by name with a payload
//! - [`Payload`]/[`Value`] - The untyped argument and result shape
//! - [`Output`]/[`Error`] - What a command resolves to
//! - [`DatabaseStore`] - The async contract the data store implements
//!
//! ## Quick Start
//!
//! ```text
//! use dbbridge_executor::{Bridge, Payload, Value};
//!
//! let bridge = Bridge::new(store)?;
//!
//! let out = bridge
//!     .call("Query_Select", Some(
//!         Payload::new()
//!             .with("query", "SELECT id, name FROM users")
//!             .with("columnTypes", vec![Value::Int(0), Value::Int(2)])
//!             .with("transactionId", Value::Null),
//!     ))
//!     .await?;
//! ```
//!
//! ## Commands
//!
//! | Command | Store operation |
//! |---------|-----------------|
//! | `GetTableColumnInfos` | `table_column_infos` |
//! | `GetTableNames` | `table_names` |
//! | `Transaction_Start` | `transaction_start` |
//! | `Transaction_IsAutocommit` | `transaction_is_autocommit` |
//! | `Transaction_Finish` | `transaction_finish` |
//! | `Query_Execute` | `query_execute` |
//! | `Query_Select` | `query_select` |

#![warn(missing_docs)]

mod bridge;
mod command;
mod config;
pub mod decode;
pub mod encode;
mod error;
mod output;
mod registry;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything hosts need is re-exported here
// =============================================================================

pub use bridge::{Bridge, BridgeBuilder};
pub use command::Command;
pub use config::{BridgeConfig, TransactionIdPolicy, CONFIG_FILE_NAME};
pub use error::{DecodeError, Error};
pub use handlers::HandlerContext;
pub use output::Output;
pub use registry::{CommandHandler, Registry, RegistryBuilder};

// Re-export core types so hosts don't need dbbridge-core directly
pub use dbbridge_core::{
    ColumnInfo, ColumnType, DatabaseStore, Payload, Row, StoreError, StoreResult, TransactionId,
    UnknownColumnType, Value,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
