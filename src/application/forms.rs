use std::str::FromStr;

use crate::domain::{Cents, Friend, FriendId, Profile, MAX_AMOUNT};

use super::AppError;

pub const DEFAULT_IMAGE: &str = "https://i.pravatar.cc/48";

/// Input for a new friend. Every field except the image is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub image: String,
}

impl Default for AddFriendForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            image: DEFAULT_IMAGE.to_string(),
        }
    }
}

impl AddFriendForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.address]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Build the friend and clear the form. Leaves the form untouched and
    /// returns `None` while a required field is blank.
    pub fn submit(&mut self) -> Option<Friend> {
        if !self.is_complete() {
            return None;
        }

        let id = FriendId::generate();
        let form = std::mem::take(self);
        let image = match form.image.trim() {
            "" => DEFAULT_IMAGE,
            image => image,
        };

        Some(Friend::new(
            id,
            form.name.trim().to_string(),
            format!("{}?u={}", image, id),
            Profile::new(
                form.email.trim(),
                form.phone.trim(),
                form.address.trim(),
            ),
        ))
    }
}

/// Who paid the bill up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Payer::User => "user",
            Payer::Friend => "friend",
        }
    }
}

impl FromStr for Payer {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" | "you" | "me" => Ok(Payer::User),
            "friend" => Ok(Payer::Friend),
            other => Err(AppError::UnknownPayer(other.to_string())),
        }
    }
}

impl std::fmt::Display for Payer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Split input for the selected friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitBillForm {
    bill: Cents,
    paid_by_user: Cents,
    who_is_paying: Payer,
}

impl SplitBillForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bill(&self) -> Cents {
        self.bill
    }

    pub fn paid_by_user(&self) -> Cents {
        self.paid_by_user
    }

    pub fn who_is_paying(&self) -> Payer {
        self.who_is_paying
    }

    /// Lowering the bill below the user's share pulls the share down with it.
    /// Negative bills and bills above [`MAX_AMOUNT`] are ignored. Returns
    /// whether the edit was taken.
    pub fn set_bill(&mut self, bill: Cents) -> bool {
        if !(0..=MAX_AMOUNT).contains(&bill) {
            return false;
        }
        self.bill = bill;
        if self.paid_by_user > bill {
            self.paid_by_user = bill;
        }
        true
    }

    /// Ignored when the share is negative or would exceed the bill. Returns
    /// whether it was taken.
    pub fn set_paid_by_user(&mut self, paid: Cents) -> bool {
        if !(0..=self.bill).contains(&paid) {
            return false;
        }
        self.paid_by_user = paid;
        true
    }

    pub fn set_who_is_paying(&mut self, payer: Payer) {
        self.who_is_paying = payer;
    }

    /// The friend's share. Unset (`None`) until a bill is entered.
    pub fn paid_by_friend(&self) -> Option<Cents> {
        if self.bill == 0 {
            None
        } else {
            Some(self.bill - self.paid_by_user)
        }
    }

    /// Signed amount to add to the friend's balance, or `None` while the
    /// bill or the user's share is missing.
    pub fn submit(&self) -> Option<Cents> {
        if self.paid_by_user == 0 {
            return None;
        }
        let paid_by_friend = self.paid_by_friend()?;
        Some(match self.who_is_paying {
            Payer::User => paid_by_friend,
            Payer::Friend => -paid_by_friend,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
