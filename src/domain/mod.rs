mod balance;
mod friend;
mod ledger;
mod money;
mod transaction;

pub use balance::*;
pub use friend::*;
pub use ledger::*;
pub use money::*;
pub use transaction::*;
