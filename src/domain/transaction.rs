use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::Cents;

/// One recorded split. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Signed amount that was added to the friend's balance
    pub amount: Cents,
    /// Friend's name when the split was recorded
    pub expense: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(amount: Cents, expense: String, date: NaiveDate) -> Self {
        Self {
            amount,
            expense,
            date,
        }
    }
}

/// Today's calendar date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
