//! In-memory storage layer
//!
//! One [`Store`] per entity kind, owned by a [`Storage`] value that is
//! constructed explicitly and passed to the service layer. There is no
//! global registry and nothing survives the process.

pub mod store;

pub use store::{Entity, Store};

use crate::models::{Client, Operation};

/// Storage coordinator owning one store per entity kind
#[derive(Debug, Default)]
pub struct Storage {
    pub clients: Store<Client>,
    pub operations: Store<Operation>,
}

impl Storage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }
}
