//! Output of a successful command.
//!
//! Every command produces exactly one output shape; the mapping is fixed by
//! the command, never by the data:
//!
//! | Command | Output |
//! |---------|--------|
//! | `Transaction_Finish`, `Query_Execute` | `Unit` |
//! | all others | `Payload` |

use dbbridge_core::Payload;

/// Successful command execution result.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// No content
    Unit,

    /// Result payload
    Payload(Payload),
}

impl Output {
    /// The payload, or `None` for no content.
    pub fn into_payload(self) -> Option<Payload> {
        match self {
            Output::Unit => None,
            Output::Payload(p) => Some(p),
        }
    }

    /// Borrow the payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Output::Unit => None,
            Output::Payload(p) => Some(p),
        }
    }

    /// Whether this is the no-content output.
    pub fn is_unit(&self) -> bool {
        matches!(self, Output::Unit)
    }
}

impl From<Payload> for Output {
    fn from(p: Payload) -> Self {
        Output::Payload(p)
    }
}

impl From<()> for Output {
    fn from(_: ()) -> Self {
        Output::Unit
    }
}
