//! Service layer for the teller ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! client lifecycle and balance changes, and statement queries over the
//! recorded operations.

pub mod client;
pub mod operation;

pub use client::ClientService;
pub use operation::{OperationService, Statement};
