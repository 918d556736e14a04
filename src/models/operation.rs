//! Operation model
//!
//! An operation is one immutable ledger entry: a deposit or a withdrawal,
//! the client it applied to, the wall-clock time it was recorded, and a
//! snapshot of the balance it produced. Operations are append-only; nothing
//! in the application updates or deletes them after they are saved.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TellerError, TellerResult};
use crate::storage::store::{Entity, Store};

use super::client::Client;
use super::ids::{ClientId, OperationId};
use super::money::Money;

/// Timestamp format used by statement queries: `2024-01-31,13:45:00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d,%H:%M:%S";

/// Parse a statement timestamp in [`TIMESTAMP_FORMAT`]
pub fn parse_timestamp(s: &str) -> TellerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| TellerError::Validation(format!("invalid timestamp '{}': {}", s, e)))
}

/// Kind of balance-affecting operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Deposit,
    Withdraw,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// Reference to a client by exactly one of id or name
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRef {
    Id(ClientId),
    Name(String),
}

impl ClientRef {
    /// Build a reference from optional parts; exactly one must be supplied
    pub fn from_parts(id: Option<ClientId>, name: Option<String>) -> TellerResult<Self> {
        match (id, name) {
            (Some(id), None) => Ok(Self::Id(id)),
            (None, Some(name)) => Ok(Self::Name(name)),
            (None, None) => Err(TellerError::Reference(
                "either a client id or a client name is required".into(),
            )),
            (Some(_), Some(_)) => Err(TellerError::Reference(
                "provide a client id or a client name, not both".into(),
            )),
        }
    }

    /// Resolve this reference against the client store
    ///
    /// Name matching is exact and case-sensitive.
    pub fn resolve(&self, clients: &Store<Client>) -> TellerResult<(ClientId, Client)> {
        match self {
            Self::Id(id) => clients
                .get(*id)
                .map(|client| (*id, client))
                .ok_or_else(|| TellerError::client_not_found(id.to_string())),
            Self::Name(name) => clients
                .iter()
                .find(|client| client.name == *name)
                .and_then(|client| Some((client.id()?, client.clone())))
                .ok_or_else(|| TellerError::client_not_found(name)),
        }
    }
}

/// One immutable ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Store-assigned identity, `None` until the first save
    id: Option<OperationId>,

    /// Owning client; a foreign lookup key, not an ownership relation
    pub client_id: ClientId,

    pub kind: OperationKind,

    pub amount: Money,

    /// Free-text description shown on statements
    pub description: String,

    /// Wall-clock time (UTC) the operation was recorded
    pub timestamp: NaiveDateTime,

    /// Client balance after this operation's effect was applied
    pub balance_after: Money,
}

impl Operation {
    /// Construct a ledger entry for a client resolved through the store
    ///
    /// The balance snapshot is read from the resolved client at construction
    /// time, so callers must apply the operation's effect to the client
    /// before constructing the entry that records it.
    pub fn new(
        clients: &Store<Client>,
        kind: OperationKind,
        amount: Money,
        description: impl Into<String>,
        client_ref: &ClientRef,
    ) -> TellerResult<Self> {
        let (client_id, client) = client_ref.resolve(clients)?;
        Self::for_client(client_id, client.balance(), kind, amount, description)
    }

    /// Construct a ledger entry from already-resolved client state
    pub(crate) fn for_client(
        client_id: ClientId,
        balance_after: Money,
        kind: OperationKind,
        amount: Money,
        description: impl Into<String>,
    ) -> TellerResult<Self> {
        let entry = Self {
            id: None,
            client_id,
            kind,
            amount,
            description: description.into(),
            timestamp: Utc::now().naive_utc(),
            balance_after,
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl Entity for Operation {
    type Id = OperationId;

    const KIND: &'static str = "Operation";

    fn id(&self) -> Option<OperationId> {
        self.id
    }

    fn set_id(&mut self, id: OperationId) {
        self.id = Some(id);
    }

    fn validate(&self) -> TellerResult<()> {
        if self.amount.is_negative() {
            return Err(TellerError::Validation(
                "operation amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}
