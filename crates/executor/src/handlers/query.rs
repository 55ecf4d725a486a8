//! Query command handlers.

use dbbridge_core::Payload;

use super::HandlerContext;
use crate::decode::{self, keys, KeyPresence};
use crate::encode;
use crate::{Output, Result};

/// Handle Query_Execute command.
pub async fn query_execute(ctx: HandlerContext, args: Option<Payload>) -> Result<Output> {
    let args = decode::require_args(args.as_ref())?;
    let transaction =
        decode::transaction_id(args, KeyPresence::Optional, ctx.config.transaction_id)?;
    let query = decode::require_string(args, keys::QUERY)?;

    tracing::debug!(
        target: "dbbridge::handler",
        transaction = ?transaction,
        query = %query,
        "Query_Execute"
    );

    ctx.store.query_execute(&query, transaction).await?;
    Ok(Output::Unit)
}

/// Handle Query_Select command.
///
/// Every declared column type is validated before the store is called; the
/// first unknown index fails the whole command.
pub async fn query_select(ctx: HandlerContext, args: Option<Payload>) -> Result<Output> {
    let args = decode::require_args(args.as_ref())?;
    let transaction =
        decode::transaction_id(args, KeyPresence::Optional, ctx.config.transaction_id)?;
    let query = decode::require_string(args, keys::QUERY)?;
    let indices = decode::require_int_sequence(args, keys::COLUMN_TYPES)?;
    let column_types = decode::column_types(&indices)?;

    tracing::debug!(
        target: "dbbridge::handler",
        transaction = ?transaction,
        query = %query,
        columns = column_types.len(),
        "Query_Select"
    );

    let rows = ctx
        .store
        .query_select(&query, &column_types, transaction)
        .await?;
    Ok(encode::encode_rows(rows).into())
}
