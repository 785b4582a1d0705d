//! Generic repository and unit-of-work abstraction over the data store.
//!
//! [`Repository`] is a parametric trait offering CRUD and predicate-based
//! query capabilities for one persisted entity type; [`UnitOfWork`] groups
//! the repositories with explicit transaction control. Store errors
//! propagate to the caller untouched, with no retries; converting them into
//! result envelopes is the service layer's job.

pub mod memory;
pub mod pg;

use crate::models::Departament;
use async_trait::async_trait;
use thiserror::Error;

pub use memory::{MemoryRepository, MemoryUnitOfWork};
pub use pg::{PgDepartamentRepository, PgUnitOfWork};

/// Errors surfaced by the data access layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A concurrent writer invalidated this operation (SQLSTATE 40001).
    #[error("concurrency conflict")]
    Conflict,
    #[error("transaction error: {0}")]
    Transaction(String),
}

/// A persisted entity with a primary key.
pub trait Entity: Clone + Send + Sync {
    type Id: Copy + Eq + Send + Sync;

    fn id(&self) -> Self::Id;
}

/// Predicate used by the filtered query capabilities.
pub type Predicate<E> = dyn Fn(&E) -> bool + Send + Sync;

/// Generic data access contract for one entity type.
///
/// Mutators report the number of rows affected so callers can distinguish
/// a no-op from a persisted change.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Fetch every row.
    async fn get(&self) -> Result<Vec<E>, RepositoryError>;

    /// Fetch the row with the given id, if any.
    async fn find(&self, id: E::Id) -> Result<Option<E>, RepositoryError>;

    /// Persist a new row.
    async fn add(&self, entity: &E) -> Result<u64, RepositoryError>;

    /// Persist a batch of new rows.
    async fn add_range(&self, entities: &[E]) -> Result<u64, RepositoryError> {
        let mut affected = 0;
        for entity in entities {
            affected += self.add(entity).await?;
        }
        Ok(affected)
    }

    /// Overwrite the row matching the entity's id.
    async fn update(&self, entity: &E) -> Result<u64, RepositoryError>;

    /// Delete the row with the given id.
    async fn remove(&self, id: E::Id) -> Result<u64, RepositoryError>;

    /// Delete a batch of rows by id. Missing ids are skipped, so the
    /// returned count can be lower than the number of ids given.
    async fn remove_range(&self, ids: &[E::Id]) -> Result<u64, RepositoryError> {
        let mut affected = 0;
        for id in ids {
            affected += self.remove(*id).await?;
        }
        Ok(affected)
    }

    /// Fetch rows matching a predicate.
    async fn get_where(&self, predicate: &Predicate<E>) -> Result<Vec<E>, RepositoryError> {
        Ok(self
            .get()
            .await?
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect())
    }

    /// Fetch the first row matching a predicate, if any.
    async fn find_where(&self, predicate: &Predicate<E>) -> Result<Option<E>, RepositoryError> {
        Ok(self
            .get()
            .await?
            .into_iter()
            .find(|entity| predicate(entity)))
    }

    /// Delete every row matching a predicate.
    async fn remove_where(&self, predicate: &Predicate<E>) -> Result<u64, RepositoryError> {
        let matches = self.get_where(predicate).await?;
        let mut affected = 0;
        for entity in matches {
            affected += self.remove(entity.id()).await?;
        }
        Ok(affected)
    }
}

/// Transactional boundary exposing one repository per entity type.
///
/// `begin_transaction` opens a single explicit transaction; nesting is an
/// error. Callers must commit or roll back what they begin.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn departaments(&self) -> &dyn Repository<Departament>;

    async fn begin_transaction(&self) -> Result<(), RepositoryError>;

    async fn commit_transaction(&self) -> Result<(), RepositoryError>;

    async fn rollback_transaction(&self) -> Result<(), RepositoryError>;
}
