use serde::Serialize;

use super::{format_amount, Cents};

/// Who owes whom, derived from the sign of a balance. Amounts are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum BalanceStatus {
    YouOwe(Cents),
    OwesYou(Cents),
    Even,
}

impl BalanceStatus {
    pub fn from_balance(balance: Cents) -> Self {
        match balance {
            b if b < 0 => BalanceStatus::YouOwe(b.saturating_abs()),
            b if b > 0 => BalanceStatus::OwesYou(b),
            _ => BalanceStatus::Even,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::YouOwe(_) => "you_owe",
            BalanceStatus::OwesYou(_) => "owes_you",
            BalanceStatus::Even => "even",
        }
    }

    /// Absolute amount owed either way, zero when even.
    pub fn amount(&self) -> Cents {
        match self {
            BalanceStatus::YouOwe(amount) | BalanceStatus::OwesYou(amount) => *amount,
            BalanceStatus::Even => 0,
        }
    }

    /// Sentence shown next to a friend in the list.
    pub fn describe(&self, name: &str, currency: &str) -> String {
        match self {
            BalanceStatus::YouOwe(amount) => {
                format!("You owe {} {}{}", name, format_amount(*amount), currency)
            }
            BalanceStatus::OwesYou(amount) => {
                format!("{} owes you {}{}", name, format_amount(*amount), currency)
            }
            BalanceStatus::Even => format!("You and {} are even", name),
        }
    }
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
