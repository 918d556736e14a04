//! Core data models for the teller ledger
//!
//! This module contains the data structures that represent the bookkeeping
//! domain: client accounts and the ledger operations recorded against them.

pub mod client;
pub mod ids;
pub mod money;
pub mod operation;

pub use client::Client;
pub use ids::{ClientId, OperationId};
pub use money::Money;
pub use operation::{parse_timestamp, ClientRef, Operation, OperationKind, TIMESTAMP_FORMAT};
