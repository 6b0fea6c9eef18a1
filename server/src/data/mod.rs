//! Data storage layer
//!
//! - `criteria` - Query-parameter filter engine compiling to SQL predicates
//! - `sqlite` - Embedded transactional store for authors and books
//! - `types` - Row and field-set types shared by the store and the API
//! - `traits` - Repository trait implemented by the store
//! - `error` - Unified error type for the data layer

pub mod criteria;
pub mod error;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use sqlite::SqliteService;
pub use traits::CatalogRepository;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::storage::AppStorage;

/// Transactional database service
///
/// Owns the SQLite service and hands out repository trait objects.
pub struct TransactionalService {
    sqlite: Arc<SqliteService>,
}

impl TransactionalService {
    /// Open (and migrate) the database under the storage directory
    pub async fn init(storage: &AppStorage, log_queries: bool) -> Result<Self, DataError> {
        let service = SqliteService::init(storage, log_queries).await?;
        Ok(Self {
            sqlite: Arc::new(service),
        })
    }

    /// Migrated in-memory store (for testing)
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        Self {
            sqlite: Arc::new(SqliteService::in_memory().await),
        }
    }

    /// Run a WAL checkpoint
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        self.sqlite.checkpoint().await.map_err(Into::into)
    }

    /// Check that the store answers queries
    pub async fn ping(&self) -> Result<(), DataError> {
        self.sqlite.ping().await.map_err(Into::into)
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        self.sqlite.close().await
    }

    /// Start the background checkpoint task
    pub fn start_checkpoint_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        self.sqlite.start_checkpoint_task(shutdown_rx)
    }

    /// Get the repository trait object for data operations
    pub fn repository(&self) -> Box<dyn CatalogRepository + Send + Sync> {
        Box::new(Arc::clone(&self.sqlite))
    }
}
