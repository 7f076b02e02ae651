use thiserror::Error;

use crate::domain::ParseCentsError;

/// Errors raised while interpreting user input. The ledger itself never fails.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Friend not found: {0}")]
    FriendNotFound(String),

    #[error("Invalid amount '{input}': {source}")]
    InvalidAmount {
        input: String,
        #[source]
        source: ParseCentsError,
    },

    #[error("Unknown payer '{0}'. Use 'user' or 'friend'")]
    UnknownPayer(String),

    #[error("Unknown output format '{0}'. Use table, json or csv")]
    UnknownFormat(String),
}
