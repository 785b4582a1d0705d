//! In-memory repository and unit of work.
//!
//! Backs the test suite with the same contract as the PostgreSQL
//! implementation. Ids are assigned sequentially on insert when the entity
//! carries a non-positive id.

use crate::models::Departament;
use crate::repository::{Entity, Repository, RepositoryError, UnitOfWork};
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// Mutex-guarded map of rows keyed by entity id.
#[derive(Clone)]
pub struct MemoryRepository<E: Entity>
where
    E::Id: Hash,
{
    storage: Arc<Mutex<HashMap<E::Id, E>>>,
}

impl<E: Entity> MemoryRepository<E>
where
    E::Id: Hash,
{
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn snapshot(&self) -> HashMap<E::Id, E> {
        self.storage.lock().unwrap().clone()
    }

    fn restore(&self, rows: HashMap<E::Id, E>) {
        *self.storage.lock().unwrap() = rows;
    }
}

impl<E: Entity> Default for MemoryRepository<E>
where
    E::Id: Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Departament> for MemoryRepository<Departament> {
    async fn get(&self) -> Result<Vec<Departament>, RepositoryError> {
        let mut rows: Vec<Departament> =
            self.storage.lock().unwrap().values().cloned().collect();
        rows.sort_by_key(|row| row.departament_id);
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<Departament>, RepositoryError> {
        Ok(self.storage.lock().unwrap().get(&id).cloned())
    }

    async fn add(&self, entity: &Departament) -> Result<u64, RepositoryError> {
        let mut storage = self.storage.lock().unwrap();
        let mut row = entity.clone();
        if row.departament_id <= 0 {
            row.departament_id = storage.keys().max().copied().unwrap_or(0) + 1;
        }
        storage.insert(row.departament_id, row);
        Ok(1)
    }

    async fn update(&self, entity: &Departament) -> Result<u64, RepositoryError> {
        let mut storage = self.storage.lock().unwrap();
        match storage.get_mut(&entity.departament_id) {
            Some(row) => {
                *row = entity.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove(&self, id: i32) -> Result<u64, RepositoryError> {
        let removed = self.storage.lock().unwrap().remove(&id);
        Ok(if removed.is_some() { 1 } else { 0 })
    }
}

/// Unit of work over the in-memory store.
///
/// Transactions are snapshot-based: `begin_transaction` captures the map,
/// `rollback_transaction` restores it, `commit_transaction` discards the
/// snapshot.
pub struct MemoryUnitOfWork {
    repository: MemoryRepository<Departament>,
    checkpoint: Mutex<Option<HashMap<i32, Departament>>>,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self {
            repository: MemoryRepository::new(),
            checkpoint: Mutex::new(None),
        }
    }

    /// Seed the store with initial rows; handy for tests.
    pub fn with_rows(rows: Vec<Departament>) -> Self {
        let uow = Self::new();
        {
            let mut storage = uow.repository.storage.lock().unwrap();
            for row in rows {
                storage.insert(row.departament_id, row);
            }
        }
        uow
    }
}

impl Default for MemoryUnitOfWork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn departaments(&self) -> &dyn Repository<Departament> {
        &self.repository
    }

    async fn begin_transaction(&self) -> Result<(), RepositoryError> {
        let mut checkpoint = self.checkpoint.lock().unwrap();
        if checkpoint.is_some() {
            return Err(RepositoryError::Transaction(
                "a transaction is already open".to_string(),
            ));
        }
        *checkpoint = Some(self.repository.snapshot());
        Ok(())
    }

    async fn commit_transaction(&self) -> Result<(), RepositoryError> {
        self.checkpoint
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| RepositoryError::Transaction("no transaction to commit".to_string()))?;
        Ok(())
    }

    async fn rollback_transaction(&self) -> Result<(), RepositoryError> {
        let rows = self.checkpoint.lock().unwrap().take().ok_or_else(|| {
            RepositoryError::Transaction("no transaction to roll back".to_string())
        })?;
        self.repository.restore(rows);
        Ok(())
    }
}
