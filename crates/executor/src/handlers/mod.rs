//! Command handlers organized by store area.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `schema` | GetTableColumnInfos, GetTableNames |
//! | `transaction` | Transaction_Start, Transaction_IsAutocommit, Transaction_Finish |
//! | `query` | Query_Execute, Query_Select |
//!
//! Every handler runs the same three steps: decode the payload, await the
//! store, then encode the value or forward the error. A decode failure
//! returns before the store is called.

pub mod query;
pub mod schema;
pub mod transaction;

use std::sync::Arc;

use dbbridge_core::DatabaseStore;
use futures::FutureExt;

use crate::config::BridgeConfig;
use crate::registry::RegistryBuilder;
use crate::Command;

/// Everything a handler may use besides its payload.
///
/// Cheap to clone; each invocation gets its own copy.
#[derive(Clone)]
pub struct HandlerContext {
    /// The data store
    pub store: Arc<dyn DatabaseStore>,
    /// Bridge configuration
    pub config: Arc<BridgeConfig>,
}

impl HandlerContext {
    /// Create a context.
    pub fn new(store: Arc<dyn DatabaseStore>, config: Arc<BridgeConfig>) -> Self {
        Self { store, config }
    }
}

/// Register every built-in command handler.
pub fn register_all(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register(Command::GetTableColumnInfos.name(), |ctx, args| {
            schema::get_table_column_infos(ctx, args).boxed()
        })
        .register(Command::GetTableNames.name(), |ctx, args| {
            schema::get_table_names(ctx, args).boxed()
        })
        .register(Command::TransactionStart.name(), |ctx, args| {
            transaction::transaction_start(ctx, args).boxed()
        })
        .register(Command::TransactionIsAutocommit.name(), |ctx, args| {
            transaction::transaction_is_autocommit(ctx, args).boxed()
        })
        .register(Command::TransactionFinish.name(), |ctx, args| {
            transaction::transaction_finish(ctx, args).boxed()
        })
        .register(Command::QueryExecute.name(), |ctx, args| {
            query::query_execute(ctx, args).boxed()
        })
        .register(Command::QuerySelect.name(), |ctx, args| {
            query::query_select(ctx, args).boxed()
        })
}
