//! Schema command handlers.
//!
//! - GetTableColumnInfos: column metadata of one table
//! - GetTableNames: names of all tables

use dbbridge_core::Payload;

use super::HandlerContext;
use crate::decode::{self, keys, KeyPresence};
use crate::encode;
use crate::{Output, Result};

/// Handle GetTableColumnInfos command.
///
/// `transactionId` must be present; only its value may be null.
pub async fn get_table_column_infos(ctx: HandlerContext, args: Option<Payload>) -> Result<Output> {
    let args = decode::require_args(args.as_ref())?;
    let table_name = decode::require_string(args, keys::TABLE_NAME)?;
    let transaction =
        decode::transaction_id(args, KeyPresence::Required, ctx.config.transaction_id)?;

    tracing::debug!(
        target: "dbbridge::handler",
        table = %table_name,
        transaction = ?transaction,
        "GetTableColumnInfos"
    );

    let infos = ctx
        .store
        .table_column_infos(&table_name, transaction)
        .await?;
    Ok(encode::encode_column_infos(infos).into())
}

/// Handle GetTableNames command.
pub async fn get_table_names(ctx: HandlerContext, args: Option<Payload>) -> Result<Output> {
    let args = decode::require_args(args.as_ref())?;
    let transaction =
        decode::transaction_id(args, KeyPresence::Optional, ctx.config.transaction_id)?;

    tracing::debug!(target: "dbbridge::handler", transaction = ?transaction, "GetTableNames");

    let names = ctx.store.table_names(transaction).await?;
    Ok(encode::encode_names(names).into())
}
