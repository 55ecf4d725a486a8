//! The fixed set of bridge commands.
//!
//! Commands are addressed by their wire name. The registry is keyed by
//! string, so a name the host invents is still routed (and rejected with
//! `UnknownCommand`); this enum only lists the names the bridge registers.
//!
//! | Command | Arguments | Returns |
//! |---------|-----------|---------|
//! | `GetTableColumnInfos` | `tableName`, `transactionId` (present, nullable) | `columnInfos` |
//! | `GetTableNames` | `transactionId` (nullable) | `tableNames` |
//! | `Transaction_Start` | none | `transactionId` |
//! | `Transaction_IsAutocommit` | none | `transactionId` |
//! | `Transaction_Finish` | `transactionId`, `commit` | no content |
//! | `Query_Execute` | `query`, `transactionId` (nullable) | no content |
//! | `Query_Select` | `query`, `columnTypes`, `transactionId` (nullable) | `rows` |

use std::fmt;
use std::str::FromStr;

/// A command the bridge registers at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Column metadata of a table.
    GetTableColumnInfos,
    /// Names of all tables.
    GetTableNames,
    /// Open a transaction.
    TransactionStart,
    /// Report the autocommit transaction.
    TransactionIsAutocommit,
    /// Commit or roll back a transaction.
    TransactionFinish,
    /// Execute a statement without results.
    QueryExecute,
    /// Run a select with declared column types.
    QuerySelect,
}

impl Command {
    /// Every command, in registration order.
    pub const ALL: [Command; 7] = [
        Command::GetTableColumnInfos,
        Command::GetTableNames,
        Command::TransactionStart,
        Command::TransactionIsAutocommit,
        Command::TransactionFinish,
        Command::QueryExecute,
        Command::QuerySelect,
    ];

    /// Wire name.
    pub fn name(self) -> &'static str {
        match self {
            Command::GetTableColumnInfos => "GetTableColumnInfos",
            Command::GetTableNames => "GetTableNames",
            Command::TransactionStart => "Transaction_Start",
            Command::TransactionIsAutocommit => "Transaction_IsAutocommit",
            Command::TransactionFinish => "Transaction_Finish",
            Command::QueryExecute => "Query_Execute",
            Command::QuerySelect => "Query_Select",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| crate::Error::UnknownCommand {
                name: s.to_string(),
            })
    }
}
