//! teller - a single-process bank ledger
//!
//! This library provides the core functionality for the teller prompt: an
//! in-memory bookkeeping ledger of client accounts and the deposit/withdraw
//! operations recorded against them. Nothing is persisted across restarts;
//! the interactive prompt is the lifetime of the ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (clients, operations, money, ids)
//! - `storage`: Generic in-memory store, one per entity kind
//! - `services`: Business logic layer
//! - `display`: Statement table rendering
//! - `cli`: Prompt commands and the line-reading loop

pub mod cli;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TellerError, TellerResult};
