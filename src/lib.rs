//! dbbridge - asynchronous command bridge to a structured data store
//!
//! A host environment invokes named commands with untyped payloads; the
//! bridge decodes the arguments, calls the data store, and returns an
//! untyped result or a typed error.
//!
//! # Quick Start
//!
//! ```ignore
//! use dbbridge::{Bridge, Payload, Value};
//!
//! let bridge = Bridge::new(store)?;
//!
//! let out = bridge
//!     .call("GetTableNames", Some(Payload::new().with("transactionId", Value::Null)))
//!     .await?;
//! ```
//!
//! # Architecture
//!
//! All commands go through the [`Bridge`], which routes them through a
//! frozen registry to one handler per command. The data store itself is
//! supplied by the host as a [`DatabaseStore`] implementation.

// Re-export the public API from dbbridge-executor
pub use dbbridge_executor::*;
