//! Client model
//!
//! Represents one client account with its current balance. The balance is
//! only ever changed through deposit/withdraw operations, and may never be
//! negative once the client is saved.

use serde::{Deserialize, Serialize};

use crate::error::{TellerError, TellerResult};
use crate::storage::store::Entity;

use super::ids::ClientId;
use super::money::Money;
use super::operation::OperationKind;

/// A client account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Store-assigned identity, `None` until the first save
    id: Option<ClientId>,

    /// Client name, unique across all clients (case-sensitive)
    pub name: String,

    /// Current balance
    balance: Money,
}

impl Client {
    /// Create a new client with a zero balance
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            balance: Money::zero(),
        }
    }

    /// Current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Apply the balance effect of a single operation
    ///
    /// Rejects a negative amount, and a withdrawal that would leave the
    /// balance below zero. On rejection the balance is left untouched.
    pub(crate) fn apply(&mut self, kind: OperationKind, amount: Money) -> TellerResult<()> {
        if amount.is_negative() {
            return Err(TellerError::Validation(
                "amount must not be negative".into(),
            ));
        }
        let next = match kind {
            OperationKind::Deposit => self.balance + amount,
            OperationKind::Withdraw => self.balance - amount,
        };
        if next.is_negative() {
            return Err(TellerError::Validation(format!(
                "withdrawing {} would overdraw {}'s balance of {}",
                amount, self.name, self.balance
            )));
        }
        self.balance = next;
        Ok(())
    }
}

impl Entity for Client {
    type Id = ClientId;

    const KIND: &'static str = "Client";

    fn id(&self) -> Option<ClientId> {
        self.id
    }

    fn set_id(&mut self, id: ClientId) {
        self.id = Some(id);
    }

    fn validate(&self) -> TellerResult<()> {
        if self.name.trim().is_empty() {
            return Err(TellerError::Validation(
                "client name cannot be empty".into(),
            ));
        }
        if self.balance.is_negative() {
            return Err(TellerError::Validation(format!(
                "balance of client '{}' cannot be negative",
                self.name
            )));
        }
        Ok(())
    }
}
