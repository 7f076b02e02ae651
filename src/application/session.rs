use tracing::{debug, info};

use crate::domain::{parse_cents, Cents, Friend, FriendId, FriendLedger, Selection, Transaction};

use super::{
    AddFriendForm, AppError, FriendRow, HistoryView, Payer, SplitBillForm, SplitFormView,
};

pub const DEFAULT_CURRENCY: &str = "€";

/// What happened when the split form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    Applied(Transaction),
    /// No friend is selected, so there is no form to submit
    NoSelection,
    /// Bill or the user's share is still missing
    Incomplete,
}

/// Application shell around one [`FriendLedger`]: the add-friend panel, both
/// forms and the lookups the shell needs. This is the entry point for any
/// front end.
pub struct Session {
    ledger: FriendLedger,
    show_add_friend: bool,
    add_friend_form: AddFriendForm,
    split_form: SplitBillForm,
    currency: String,
}

impl Session {
    pub fn new(ledger: FriendLedger) -> Self {
        Self {
            ledger,
            show_add_friend: false,
            add_friend_form: AddFriendForm::new(),
            split_form: SplitBillForm::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(FriendLedger::seeded())
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn ledger(&self) -> &FriendLedger {
        &self.ledger
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    // ========================
    // Add-friend panel
    // ========================

    pub fn is_add_friend_open(&self) -> bool {
        self.show_add_friend
    }

    /// Label of the button that opens or closes the panel.
    pub fn add_friend_label(&self) -> &'static str {
        if self.show_add_friend {
            "Close"
        } else {
            "Add friend"
        }
    }

    pub fn toggle_add_friend(&mut self) -> bool {
        self.show_add_friend = !self.show_add_friend;
        self.show_add_friend
    }

    pub fn add_friend_form(&self) -> &AddFriendForm {
        &self.add_friend_form
    }

    pub fn add_friend_form_mut(&mut self) -> &mut AddFriendForm {
        &mut self.add_friend_form
    }

    /// Submit the add-friend form. On success the friend joins the ledger and
    /// the panel closes; an incomplete form changes nothing.
    pub fn submit_add_friend(&mut self) -> Option<&Friend> {
        let friend = self.add_friend_form.submit()?;
        info!(id = %friend.id, name = %friend.name, "friend added");
        self.ledger.add_friend(friend);
        self.show_add_friend = false;
        self.ledger.friends().last()
    }

    // ========================
    // Selection
    // ========================

    /// Find a friend by 1-based list position, id, or case-insensitive name.
    pub fn resolve(&self, reference: &str) -> Result<&Friend, AppError> {
        let reference = reference.trim();
        let friends = self.ledger.friends();

        if let Ok(position) = reference.parse::<usize>() {
            if (1..=friends.len()).contains(&position) {
                return Ok(&friends[position - 1]);
            }
        }

        if let Some(id) = FriendId::parse(reference) {
            if let Some(friend) = self.ledger.friend(&id) {
                return Ok(friend);
            }
        }

        friends
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(reference))
            .ok_or_else(|| AppError::FriendNotFound(reference.to_string()))
    }

    /// Toggle the selection of the referenced friend. Switching to another
    /// friend, or clearing the selection, starts a fresh split form.
    pub fn select(&mut self, reference: &str) -> Result<Selection, AppError> {
        let id = self.resolve(reference)?.id;
        let previous = self.ledger.selection();
        let selection = self.ledger.select(&id);
        if selection != previous {
            self.split_form.reset();
        }
        Ok(selection)
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.ledger.selected_friend()
    }

    // ========================
    // Split form
    // ========================

    pub fn split_form(&self) -> &SplitBillForm {
        &self.split_form
    }

    /// Returns whether the edit was accepted; negative or oversized bills are ignored.
    pub fn set_bill(&mut self, input: &str) -> Result<bool, AppError> {
        let bill = parse_amount(input)?;
        Ok(self.split_form.set_bill(bill))
    }

    /// Returns whether the edit was accepted; negative shares and shares above
    /// the bill are ignored.
    pub fn set_paid_by_user(&mut self, input: &str) -> Result<bool, AppError> {
        let paid = parse_amount(input)?;
        Ok(self.split_form.set_paid_by_user(paid))
    }

    pub fn set_who_is_paying(&mut self, input: &str) -> Result<Payer, AppError> {
        let payer: Payer = input.parse()?;
        self.split_form.set_who_is_paying(payer);
        Ok(payer)
    }

    pub fn split_form_view(&self) -> Option<SplitFormView> {
        let friend = self.selected_friend()?;
        Some(SplitFormView {
            friend: friend.name.clone(),
            bill: self.split_form.bill(),
            paid_by_user: self.split_form.paid_by_user(),
            paid_by_friend: self.split_form.paid_by_friend(),
            who_is_paying: match self.split_form.who_is_paying() {
                Payer::User => "You".to_string(),
                Payer::Friend => friend.name.clone(),
            },
        })
    }

    /// Submit the split form against the selected friend.
    pub fn split_bill(&mut self) -> SplitOutcome {
        if self.ledger.selection().is_none() {
            return SplitOutcome::NoSelection;
        }
        let Some(amount) = self.split_form.submit() else {
            debug!(form = ?self.split_form, "split form incomplete");
            return SplitOutcome::Incomplete;
        };

        match self.ledger.split_bill(amount) {
            Some(transaction) => {
                info!(
                    friend = %transaction.expense,
                    amount = transaction.amount,
                    "bill split recorded"
                );
                self.split_form.reset();
                SplitOutcome::Applied(transaction)
            }
            None => SplitOutcome::NoSelection,
        }
    }

    // ========================
    // Views
    // ========================

    pub fn friend_rows(&self) -> Vec<FriendRow> {
        self.ledger
            .friends()
            .iter()
            .enumerate()
            .map(|(i, friend)| FriendRow::new(i + 1, friend, self.ledger.is_selected(&friend.id)))
            .collect()
    }

    /// History of the referenced friend, or of the selected one when no
    /// reference is given. `Ok(None)` when nothing is selected.
    pub fn history(&self, reference: Option<&str>) -> Result<Option<HistoryView>, AppError> {
        let friend = match reference {
            Some(reference) => Some(self.resolve(reference)?),
            None => self.selected_friend(),
        };
        Ok(friend.map(HistoryView::new))
    }

    pub fn describe_status(&self, friend: &Friend) -> String {
        friend.status().describe(&friend.name, &self.currency)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::seeded()
    }
}

fn parse_amount(input: &str) -> Result<Cents, AppError> {
    parse_cents(input).map_err(|source| AppError::InvalidAmount {
        input: input.to_string(),
        source,
    })
}
