//! Operation service
//!
//! Read-side queries over the recorded operations: the raw time-range query
//! and the assembled statement with its carried-forward previous balance
//! and per-kind totals.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{ClientId, Money, Operation, OperationKind};
use crate::storage::Storage;

/// Service for querying recorded operations
pub struct OperationService<'a> {
    storage: &'a Storage,
}

/// A client's activity over a time range
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub client_id: ClientId,
    pub since: NaiveDateTime,
    pub till: NaiveDateTime,

    /// Balance produced by the last operation at or before `since`
    pub previous_balance: Money,

    /// Operations in `[since, till]`, in creation order
    pub operations: Vec<Operation>,

    pub withdrawals_total: Money,
    pub deposits_total: Money,

    /// Balance after the last operation in range; zero when none matched
    pub closing_balance: Money,
}

impl<'a> OperationService<'a> {
    /// Create a new operation service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Every operation for `client_id` with a timestamp in the inclusive
    /// range `[since, till]`, in store insertion order (creation order)
    pub fn query(
        &self,
        client_id: ClientId,
        since: NaiveDateTime,
        till: NaiveDateTime,
    ) -> Vec<Operation> {
        self.storage
            .operations
            .iter()
            .filter(|op| {
                op.client_id == client_id && op.timestamp >= since && op.timestamp <= till
            })
            .cloned()
            .collect()
    }

    /// Assemble the statement for `client_id` over `[since, till]`
    pub fn statement(
        &self,
        client_id: ClientId,
        since: NaiveDateTime,
        till: NaiveDateTime,
    ) -> Statement {
        let operations = self.query(client_id, since, till);

        let previous_balance = self
            .storage
            .operations
            .iter()
            .filter(|op| op.client_id == client_id && op.timestamp <= since)
            .last()
            .map(|op| op.balance_after)
            .unwrap_or_default();

        let total_of = |kind: OperationKind| -> Money {
            operations
                .iter()
                .filter(|op| op.kind == kind)
                .map(|op| op.amount)
                .sum()
        };

        Statement {
            client_id,
            since,
            till,
            previous_balance,
            withdrawals_total: total_of(OperationKind::Withdraw),
            deposits_total: total_of(OperationKind::Deposit),
            closing_balance: operations
                .last()
                .map(|op| op.balance_after)
                .unwrap_or_default(),
            operations,
        }
    }
}
