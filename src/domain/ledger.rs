use chrono::NaiveDate;
use tracing::debug;

use super::{today, Cents, Friend, FriendId, Profile, Transaction};

/// Which friend, if any, the split form is open for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(FriendId),
}

impl Selection {
    pub fn id(&self) -> Option<FriendId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(*id),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// The friends of one session and the current selection.
///
/// None of the operations fail: a split without a selection is ignored.
#[derive(Debug, Clone, Default)]
pub struct FriendLedger {
    friends: Vec<Friend>,
    selection: Selection,
}

impl FriendLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger preloaded with the three starter friends.
    pub fn seeded() -> Self {
        Self {
            friends: seed_friends(),
            selection: Selection::None,
        }
    }

    pub fn from_friends(friends: Vec<Friend>) -> Self {
        Self {
            friends,
            selection: Selection::None,
        }
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn friend(&self, id: &FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| &f.id == id)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection.id().and_then(|id| self.friend(&id))
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.selection.id().as_ref() == Some(id)
    }

    /// Append a friend. Callers are responsible for id uniqueness.
    pub fn add_friend(&mut self, friend: Friend) {
        debug!(id = %friend.id, name = %friend.name, "adding friend");
        self.friends.push(friend);
    }

    /// Select the friend, or clear the selection if it is already selected.
    pub fn select(&mut self, id: &FriendId) -> Selection {
        self.selection = if self.is_selected(id) {
            Selection::None
        } else {
            Selection::Selected(*id)
        };
        debug!(selection = ?self.selection, "selection changed");
        self.selection
    }

    /// Record a split dated today. See [`FriendLedger::split_bill_on`].
    pub fn split_bill(&mut self, amount: Cents) -> Option<Transaction> {
        self.split_bill_on(amount, today())
    }

    /// Add `amount` to the selected friend's balance, append the matching
    /// transaction and clear the selection. Returns `None` without touching
    /// anything when no friend is selected. The selection is cleared even when
    /// nothing is recorded (unknown id, balance overflow).
    pub fn split_bill_on(&mut self, amount: Cents, date: NaiveDate) -> Option<Transaction> {
        let id = self.selection.id()?;
        self.selection = Selection::None;
        let friend = self.friends.iter_mut().find(|f| f.id == id)?;

        let transaction = Transaction::new(amount, friend.name.clone(), date);
        if !friend.apply(transaction.clone()) {
            debug!(id = %id, amount, "split dropped, balance would overflow");
            return None;
        }
        debug!(id = %id, amount, balance = friend.balance, "bill split");
        Some(transaction)
    }
}

fn seed_friend(id: u64, name: &str, balance: Cents, email: &str) -> Friend {
    Friend::new(
        FriendId::Seeded(id),
        name.to_string(),
        format!("https://i.pravatar.cc/48?u={}", id),
        Profile::new(email, "123-456-7890", "123 Main St, City"),
    )
    .with_balance(balance)
}

fn seed_friends() -> Vec<Friend> {
    vec![
        seed_friend(118836, "Clark", -700, "clark@example.com"),
        seed_friend(933372, "Sarah", 2000, "sarah@example.com"),
        seed_friend(499476, "Anthony", 0, "anthony@example.com"),
    ]
}
