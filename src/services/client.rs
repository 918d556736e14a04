//! Client service
//!
//! Business logic for client accounts: creation with the duplicate-name
//! check, and deposits/withdrawals committed together with the ledger entry
//! that records them.

use crate::error::{TellerError, TellerResult};
use crate::models::{Client, ClientRef, Money, Operation, OperationKind};
use crate::storage::Storage;

/// Description recorded for the deposit that seeds a new client's balance
pub const INITIAL_DEPOSIT_DESCRIPTION: &str = "Initial deposit";

/// Service for client management
pub struct ClientService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ClientService<'a> {
    /// Create a new client service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create a new client
    ///
    /// A nonzero `initial_balance` is realized as an ordinary deposit with
    /// the [`INITIAL_DEPOSIT_DESCRIPTION`] description. On any validation
    /// failure nothing is persisted.
    pub fn create(&mut self, name: &str, initial_balance: Money) -> TellerResult<Client> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TellerError::Validation(
                "client name cannot be empty".into(),
            ));
        }
        if self.find_by_name(name).is_some() {
            return Err(TellerError::duplicate_client(name));
        }
        if initial_balance.is_negative() {
            return Err(TellerError::Validation(
                "initial balance must not be negative".into(),
            ));
        }

        let client = self.storage.clients.save(Client::new(name))?;
        tracing::debug!(client = %client.name, "Client created");

        if initial_balance.is_zero() {
            return Ok(client);
        }
        self.record(
            &ClientRef::Name(name.to_string()),
            OperationKind::Deposit,
            initial_balance,
            INITIAL_DEPOSIT_DESCRIPTION,
        )
    }

    /// Deposit money into a client's account
    pub fn deposit(
        &mut self,
        client_ref: &ClientRef,
        amount: Money,
        description: &str,
    ) -> TellerResult<Client> {
        self.record(client_ref, OperationKind::Deposit, amount, description)
    }

    /// Withdraw money from a client's account
    ///
    /// A withdrawal that would leave the balance below zero is rejected
    /// whole; the balance keeps its prior value.
    pub fn withdraw(
        &mut self,
        client_ref: &ClientRef,
        amount: Money,
        description: &str,
    ) -> TellerResult<Client> {
        self.record(client_ref, OperationKind::Withdraw, amount, description)
    }

    /// Current balance of a client
    pub fn balance(&self, client_ref: &ClientRef) -> TellerResult<Money> {
        let (_, client) = client_ref.resolve(&self.storage.clients)?;
        Ok(client.balance())
    }

    /// Look up a client by exact, case-sensitive name
    pub fn find_by_name(&self, name: &str) -> Option<Client> {
        self.storage
            .clients
            .iter()
            .find(|client| client.name == name)
            .cloned()
    }

    /// Commit one balance change and the ledger entry recording it
    ///
    /// Both rows are validated before either store is written, so either
    /// both are persisted or neither is.
    fn record(
        &mut self,
        client_ref: &ClientRef,
        kind: OperationKind,
        amount: Money,
        description: &str,
    ) -> TellerResult<Client> {
        let (client_id, mut client) = client_ref.resolve(&self.storage.clients)?;
        client.apply(kind, amount)?;
        let entry =
            Operation::for_client(client_id, client.balance(), kind, amount, description)?;

        let client = self.storage.clients.save(client)?;
        self.storage.operations.save(entry)?;
        tracing::debug!(
            client = %client.name,
            kind = %kind,
            amount = %amount,
            balance = %client.balance(),
            "Operation committed"
        );
        Ok(client)
    }
}
