//! Document-store snapshot layer
//!
//! The persistence layer proper lives elsewhere in the back office; this
//! module only materializes its JSON collections into an immutable
//! in-memory [`Snapshot`]. Analytics code never issues queries; it reads
//! the snapshot it is handed.

pub mod file_io;

pub use file_io::{read_json, read_json_required, write_json_atomic};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::paths::CaixaPaths;
use crate::error::CaixaResult;
use crate::models::{Client, ClientId, Invoice, Transaction, TransactionKind};

// Process-wide snapshot version counter. The version is the identity key
// for memoized recomputation: equal versions imply identical contents.
static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Immutable in-memory materialization of the store's collections
///
/// The client-name index is built once at construction, so name lookups
/// during classification and rendering never rebuild ad hoc maps.
#[derive(Debug)]
pub struct Snapshot {
    transactions: Vec<Transaction>,
    invoices: Vec<Invoice>,
    clients: Vec<Client>,
    client_index: HashMap<ClientId, String>,
    version: u64,
}

impl Snapshot {
    /// Build a snapshot from already-materialized collections
    pub fn new(transactions: Vec<Transaction>, invoices: Vec<Invoice>, clients: Vec<Client>) -> Self {
        let client_index = clients
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();

        Self {
            transactions,
            invoices,
            clients,
            client_index,
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// An empty snapshot
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// All transactions, both kinds
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Revenue transactions only
    pub fn revenues(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Revenue)
    }

    /// Expense transactions only
    pub fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
    }

    /// All invoices
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// All clients
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Resolve a client name from the precomputed index
    pub fn client_name(&self, id: ClientId) -> Option<&str> {
        self.client_index.get(&id).map(String::as_str)
    }

    /// Identity version of this snapshot (monotonic per process)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if the snapshot holds no records at all
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.invoices.is_empty()
    }
}

/// Loads snapshots from the JSON document collections on disk
pub struct SnapshotStore {
    paths: CaixaPaths,
}

impl SnapshotStore {
    /// Create a store over the given paths
    pub fn new(paths: CaixaPaths) -> Self {
        Self { paths }
    }

    /// Materialize all collections into a fresh snapshot
    ///
    /// Missing collection files load as empty collections.
    pub fn load(&self) -> CaixaResult<Snapshot> {
        let transactions: Vec<Transaction> = read_json(self.paths.transactions_file())?;
        let invoices: Vec<Invoice> = read_json(self.paths.invoices_file())?;
        let clients: Vec<Client> = read_json(self.paths.clients_file())?;

        Ok(Snapshot::new(transactions, invoices, clients))
    }
}

/// Create the data directory and seed empty collections
pub fn initialize_store(paths: &CaixaPaths) -> CaixaResult<()> {
    paths.ensure_directories()?;

    for file in [
        paths.transactions_file(),
        paths.invoices_file(),
        paths.clients_file(),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &Vec::<serde_json::Value>::new())?;
        }
    }

    Ok(())
}
