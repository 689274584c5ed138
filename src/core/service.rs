//! Persistence gateway trait

use async_trait::async_trait;

use crate::core::error::StorageError;
use crate::core::statement::InvoiceStatement;

/// Executes single parameterized statements against a relational store
///
/// One call is one atomic statement; implementations do not retry and do not
/// wrap calls in transactions. The action pipeline is agnostic to the store
/// behind it.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Execute the statement, returning the number of rows affected
    async fn execute(&self, statement: InvoiceStatement) -> Result<u64, StorageError>;
}
