//! Request-scoped store session

use sea_orm::DatabaseTransaction;

use super::errors::StoreResult;
use super::repository::ItemRepository;

/// A database transaction bound to a single request.
///
/// Writes become visible only after [`commit`](Self::commit). Dropping the
/// session on any other path rolls back and returns the connection to the
/// pool.
pub struct StoreSession {
    txn: DatabaseTransaction,
}

impl StoreSession {
    pub(super) fn new(txn: DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn items(&self) -> ItemRepository<'_, DatabaseTransaction> {
        ItemRepository::new(&self.txn)
    }

    pub async fn commit(self) -> StoreResult<()> {
        self.txn.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> StoreResult<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}
