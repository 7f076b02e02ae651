use serde::Serialize;

use crate::domain::{BalanceStatus, Cents, Friend, FriendId, Profile, Transaction};

/// One line of the friend list as the shell renders it.
#[derive(Debug, Clone, Serialize)]
pub struct FriendRow {
    pub position: usize,
    pub id: FriendId,
    pub name: String,
    pub image: String,
    pub balance: Cents,
    pub status: BalanceStatus,
    pub selected: bool,
    /// Only present for the selected friend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl FriendRow {
    pub fn new(position: usize, friend: &Friend, selected: bool) -> Self {
        Self {
            position,
            id: friend.id,
            name: friend.name.clone(),
            image: friend.image.clone(),
            balance: friend.balance,
            status: friend.status(),
            selected,
            profile: selected.then(|| friend.profile.clone()),
        }
    }
}

/// A friend's transaction history, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub friend_id: FriendId,
    pub name: String,
    pub balance: Cents,
    pub transactions: Vec<Transaction>,
}

impl HistoryView {
    pub fn new(friend: &Friend) -> Self {
        Self {
            friend_id: friend.id,
            name: friend.name.clone(),
            balance: friend.balance,
            transactions: friend.transactions.clone(),
        }
    }
}

/// Current state of the split form for the selected friend.
#[derive(Debug, Clone, Serialize)]
pub struct SplitFormView {
    pub friend: String,
    pub bill: Cents,
    pub paid_by_user: Cents,
    pub paid_by_friend: Option<Cents>,
    pub who_is_paying: String,
}
