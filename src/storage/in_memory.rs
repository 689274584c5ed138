//! In-memory implementation of PersistenceGateway for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::error::StorageError;
use crate::core::invoice::Invoice;
use crate::core::service::PersistenceGateway;
use crate::core::statement::InvoiceStatement;

const BACKEND: &str = "memory";

/// In-memory invoice table
///
/// Interprets the invoice statements against a map keyed by id, with the
/// same row-count semantics as SQL: updating or deleting an unknown id
/// affects zero rows and is not an error. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
}

impl InMemoryGateway {
    /// Create an empty in-memory gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an invoice by id
    pub fn get(&self, id: &str) -> Option<Invoice> {
        self.invoices.read().ok()?.get(id).cloned()
    }

    /// All stored invoices, in no particular order
    pub fn list(&self) -> Vec<Invoice> {
        self.invoices
            .read()
            .map(|invoices| invoices.values().cloned().collect())
            .unwrap_or_default()
    }

    fn lock_error() -> StorageError {
        StorageError::Unavailable {
            backend: BACKEND.to_string(),
        }
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn execute(&self, statement: InvoiceStatement) -> Result<u64, StorageError> {
        let mut invoices = self.invoices.write().map_err(|_| Self::lock_error())?;

        match statement {
            InvoiceStatement::Insert {
                customer_id,
                amount,
                status,
                date,
            } => {
                let id = Uuid::new_v4().to_string();
                invoices.insert(
                    id.clone(),
                    Invoice {
                        id,
                        customer_id,
                        amount,
                        status,
                        date,
                    },
                );
                Ok(1)
            }
            InvoiceStatement::Update {
                id,
                customer_id,
                amount,
                status,
            } => match invoices.get_mut(&id) {
                Some(invoice) => {
                    invoice.customer_id = customer_id;
                    invoice.amount = amount;
                    invoice.status = status;
                    Ok(1)
                }
                None => Ok(0),
            },
            InvoiceStatement::Delete { id } => Ok(u64::from(invoices.remove(&id).is_some())),
        }
    }
}
