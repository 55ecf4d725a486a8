//! Transaction command handlers.
//!
//! Transaction_Start and Transaction_IsAutocommit read no arguments, so they
//! succeed even when the host sends none.

use dbbridge_core::{Payload, TransactionId};

use super::HandlerContext;
use crate::decode::{self, keys};
use crate::encode;
use crate::{Output, Result};

/// Handle Transaction_Start command.
pub async fn transaction_start(ctx: HandlerContext, _args: Option<Payload>) -> Result<Output> {
    let transaction = ctx.store.transaction_start().await?;
    tracing::debug!(target: "dbbridge::handler", transaction = ?transaction, "Transaction_Start");
    Ok(encode::encode_transaction_id(transaction).into())
}

/// Handle Transaction_IsAutocommit command.
pub async fn transaction_is_autocommit(
    ctx: HandlerContext,
    _args: Option<Payload>,
) -> Result<Output> {
    let transaction = ctx.store.transaction_is_autocommit().await?;
    tracing::debug!(target: "dbbridge::handler", transaction = ?transaction, "Transaction_IsAutocommit");
    Ok(encode::encode_transaction_id(transaction).into())
}

/// Handle Transaction_Finish command.
///
/// Both keys are mandatory and `transactionId` may not be null: there is
/// no implicit transaction to finish.
pub async fn transaction_finish(ctx: HandlerContext, args: Option<Payload>) -> Result<Output> {
    let args = decode::require_args(args.as_ref())?;
    let transaction = TransactionId(decode::require_int(args, keys::TRANSACTION_ID)?);
    let commit = decode::require_bool(args, keys::COMMIT)?;

    tracing::debug!(
        target: "dbbridge::handler",
        transaction = %transaction,
        commit,
        "Transaction_Finish"
    );

    ctx.store.transaction_finish(transaction, commit).await?;
    Ok(Output::Unit)
}
