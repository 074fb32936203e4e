//! Client lookup records
//!
//! Clients are maintained elsewhere in the back office; this core only
//! reads them to resolve names in analytics views.

use serde::{Deserialize, Serialize};

use super::ClientId;

/// A client of the consultancy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,

    /// Display name
    pub name: String,
}

impl Client {
    /// Create a new client
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClientId::new(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_has_unique_id() {
        let a = Client::new("Acme Ambiental");
        let b = Client::new("Acme Ambiental");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }
}
