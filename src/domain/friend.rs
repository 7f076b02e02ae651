use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::{BalanceStatus, Cents, Transaction};

/// Friends loaded at startup keep the numeric ids they were seeded with,
/// friends added during a session get a random UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FriendId {
    Seeded(u64),
    Generated(Uuid),
}

impl FriendId {
    pub fn generate() -> Self {
        FriendId::Generated(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u64>() {
            return Some(FriendId::Seeded(n));
        }
        Uuid::parse_str(s).ok().map(FriendId::Generated)
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriendId::Seeded(n) => write!(f, "{}", n),
            FriendId::Generated(uuid) => write!(f, "{}", uuid),
        }
    }
}

/// Contact details shown when a friend is selected. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Profile {
    pub fn new(
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    pub image: String,
    /// Negative: you owe this friend. Positive: this friend owes you.
    pub balance: Cents,
    /// Append-only, in the order the splits were recorded
    pub transactions: Vec<Transaction>,
    pub profile: Profile,
}

impl Friend {
    /// A friend with a zero balance and no history.
    pub fn new(id: FriendId, name: String, image: String, profile: Profile) -> Self {
        Self {
            id,
            name,
            image,
            balance: 0,
            transactions: Vec::new(),
            profile,
        }
    }

    pub fn with_balance(mut self, balance: Cents) -> Self {
        self.balance = balance;
        self
    }

    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::from_balance(self.balance)
    }

    /// Balance the friend had before any split was recorded.
    pub fn opening_balance(&self) -> Cents {
        self.balance - self.transactions.iter().map(|t| t.amount).sum::<Cents>()
    }

    /// Record a split. Only the ledger calls this, against the selected friend.
    /// A split that would overflow the balance is dropped and `false` returned.
    pub(crate) fn apply(&mut self, transaction: Transaction) -> bool {
        let Some(balance) = self.balance.checked_add(transaction.amount) else {
            return false;
        };
        self.balance = balance;
        self.transactions.push(transaction);
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample_friend() -> Friend {
        Friend::new(
            FriendId::Seeded(1),
            "Clark".into(),
            "https://i.pravatar.cc/48?u=1".into(),
            Profile::new("clark@example.com", "123-456-7890", "123 Main St, City"),
        )
    }

    #[test]
    fn test_new_friend_is_even() {
        let friend = sample_friend();
        assert_eq!(friend.balance, 0);
        assert!(friend.transactions.is_empty());
        assert_eq!(friend.status(), BalanceStatus::Even);
    }

    #[test]
    fn test_friend_id_parse() {
        assert_eq!(FriendId::parse("118836"), Some(FriendId::Seeded(118836)));

        let uuid = Uuid::new_v4();
        assert_eq!(
            FriendId::parse(&uuid.to_string()),
            Some(FriendId::Generated(uuid))
        );
        assert_eq!(FriendId::parse("Clark"), None);
    }

    #[test]
    fn test_friend_id_display_is_bare() {
        assert_eq!(FriendId::Seeded(933372).to_string(), "933372");
        let uuid = Uuid::new_v4();
        assert_eq!(FriendId::Generated(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn test_friend_id_serializes_untagged() {
        let json = serde_json::to_string(&FriendId::Seeded(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_apply_appends_and_moves_balance() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut friend = sample_friend().with_balance(-700);

        assert!(friend.apply(Transaction::new(1500, "Clark".into(), date)));
        assert!(friend.apply(Transaction::new(-200, "Clark".into(), date)));

        assert_eq!(friend.balance, 600);
        assert_eq!(friend.transactions.len(), 2);
        assert_eq!(friend.transactions[0].amount, 1500);
        assert_eq!(friend.transactions[1].amount, -200);
        assert_eq!(friend.opening_balance(), -700);
    }

    #[test]
    fn test_apply_refuses_overflowing_split() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut friend = sample_friend().with_balance(2000);

        assert!(!friend.apply(Transaction::new(Cents::MAX, "Clark".into(), date)));
        assert_eq!(friend.balance, 2000);
        assert!(friend.transactions.is_empty());
    }
}
