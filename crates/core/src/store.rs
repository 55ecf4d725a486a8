//! The data-store contract consumed by the bridge
//!
//! The bridge implements no storage, querying, or transaction logic. It
//! calls a [`DatabaseStore`] with decoded arguments and forwards whatever
//! comes back. Errors from the store are carried as an opaque
//! [`StoreError`] and are never inspected.
//!
//! Implementations may complete on any runtime worker; all methods must be
//! safe to call concurrently (requires Send + Sync).

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::column::{ColumnInfo, ColumnType};
use crate::types::{Row, TransactionId};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Asynchronous operations of the structured data store
///
/// One method per bridge command. `transaction` is `None` for the store's
/// autocommit context.
#[async_trait]
pub trait DatabaseStore: Send + Sync {
    /// Column metadata of a table
    async fn table_column_infos(
        &self,
        table_name: &str,
        transaction: Option<TransactionId>,
    ) -> StoreResult<Vec<ColumnInfo>>;

    /// Names of all tables
    async fn table_names(&self, transaction: Option<TransactionId>) -> StoreResult<Vec<String>>;

    /// Open a transaction; `None` if the store assigns no identifier
    async fn transaction_start(&self) -> StoreResult<Option<TransactionId>>;

    /// Current autocommit transaction, if the store tracks one
    async fn transaction_is_autocommit(&self) -> StoreResult<Option<TransactionId>>;

    /// Commit (`commit == true`) or roll back a transaction
    async fn transaction_finish(&self, transaction: TransactionId, commit: bool)
        -> StoreResult<()>;

    /// Execute a statement that produces no rows
    async fn query_execute(
        &self,
        query: &str,
        transaction: Option<TransactionId>,
    ) -> StoreResult<()>;

    /// Run a select, coercing each column to the declared type
    async fn query_select(
        &self,
        query: &str,
        column_types: &[ColumnType],
        transaction: Option<TransactionId>,
    ) -> StoreResult<Vec<Row>>;
}

/// Opaque error raised by the store
///
/// Cloning shares the underlying error. Hosts that know the concrete store
/// type can recover it with [`StoreError::downcast_ref`].
#[derive(Clone)]
pub struct StoreError(Arc<dyn StdError + Send + Sync + 'static>);

impl StoreError {
    /// Wrap any error raised by a store implementation
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        StoreError(Arc::new(err))
    }

    /// Wrap a plain message
    pub fn msg(message: impl Into<String>) -> Self {
        StoreError(Arc::new(MessageError(message.into())))
    }

    /// Borrow the wrapped error as a concrete type
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Whether two handles share the same underlying error
    pub fn ptr_eq(&self, other: &StoreError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoreError").field(&self.0).finish()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.0)
    }
}

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}
