//! PostgreSQL repository and unit of work backed by `sqlx`.

use crate::models::Departament;
use crate::repository::{Repository, RepositoryError, UnitOfWork};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, Postgres};
use sqlx::Transaction;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column list for the `departament` table.
const COLUMNS: &str = "departament_id, name, state";

/// SQLSTATE for a serialization failure under concurrent writers.
const SERIALIZATION_FAILURE: &str = "40001";

/// Slot holding the unit of work's open transaction, shared with the
/// repository so statements join it instead of running in autocommit.
type TransactionSlot = Arc<Mutex<Option<Transaction<'static, Postgres>>>>;

/// Translate a sqlx error, surfacing concurrency conflicts distinctly so
/// the service layer can treat a conflicting delete as "already deleted".
fn map_db_error(err: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(SERIALIZATION_FAILURE) {
            return RepositoryError::Conflict;
        }
    }
    RepositoryError::Database(err)
}

/// CRUD operations for the `departament` table.
///
/// Every statement first checks the shared transaction slot: while the
/// owning [`PgUnitOfWork`] has a transaction open, statements execute on
/// that transaction's connection; otherwise they run on the pool in
/// autocommit.
#[derive(Clone)]
pub struct PgDepartamentRepository {
    pool: PgPool,
    transaction: TransactionSlot,
}

impl PgDepartamentRepository {
    /// Standalone repository with no enclosing unit of work; statements
    /// always run in autocommit.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            transaction: Arc::new(Mutex::new(None)),
        }
    }

    fn with_slot(pool: PgPool, transaction: TransactionSlot) -> Self {
        Self { pool, transaction }
    }

    /// Run a raw SQL statement (stored procedure call, maintenance script)
    /// and report the rows affected.
    pub async fn execute_raw(&self, sql: &str) -> Result<u64, RepositoryError> {
        let mut guard = self.transaction.lock().await;
        let result = match guard.as_mut() {
            Some(tx) => sqlx::query(sql).execute(&mut **tx).await,
            None => sqlx::query(sql).execute(&self.pool).await,
        }
        .map_err(map_db_error)?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Repository<Departament> for PgDepartamentRepository {
    async fn get(&self) -> Result<Vec<Departament>, RepositoryError> {
        let query = format!("SELECT {COLUMNS} FROM departament ORDER BY departament_id");
        let mut guard = self.transaction.lock().await;
        match guard.as_mut() {
            Some(tx) => {
                sqlx::query_as::<_, Departament>(&query)
                    .fetch_all(&mut **tx)
                    .await
            }
            None => {
                sqlx::query_as::<_, Departament>(&query)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)
    }

    async fn find(&self, id: i32) -> Result<Option<Departament>, RepositoryError> {
        let query = format!("SELECT {COLUMNS} FROM departament WHERE departament_id = $1");
        let mut guard = self.transaction.lock().await;
        match guard.as_mut() {
            Some(tx) => {
                sqlx::query_as::<_, Departament>(&query)
                    .bind(id)
                    .fetch_optional(&mut **tx)
                    .await
            }
            None => {
                sqlx::query_as::<_, Departament>(&query)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)
    }

    async fn add(&self, entity: &Departament) -> Result<u64, RepositoryError> {
        let query = sqlx::query("INSERT INTO departament (name, state) VALUES ($1, $2)")
            .bind(&entity.name)
            .bind(entity.state);
        let mut guard = self.transaction.lock().await;
        let result = match guard.as_mut() {
            Some(tx) => query.execute(&mut **tx).await,
            None => query.execute(&self.pool).await,
        }
        .map_err(map_db_error)?;
        Ok(result.rows_affected())
    }

    async fn update(&self, entity: &Departament) -> Result<u64, RepositoryError> {
        let query =
            sqlx::query("UPDATE departament SET name = $1, state = $2 WHERE departament_id = $3")
                .bind(&entity.name)
                .bind(entity.state)
                .bind(entity.departament_id);
        let mut guard = self.transaction.lock().await;
        let result = match guard.as_mut() {
            Some(tx) => query.execute(&mut **tx).await,
            None => query.execute(&self.pool).await,
        }
        .map_err(map_db_error)?;
        Ok(result.rows_affected())
    }

    async fn remove(&self, id: i32) -> Result<u64, RepositoryError> {
        let query = sqlx::query("DELETE FROM departament WHERE departament_id = $1").bind(id);
        let mut guard = self.transaction.lock().await;
        let result = match guard.as_mut() {
            Some(tx) => query.execute(&mut **tx).await,
            None => query.execute(&self.pool).await,
        }
        .map_err(map_db_error)?;
        Ok(result.rows_affected())
    }
}

/// Unit of work over a PostgreSQL pool.
///
/// Holds at most one open transaction; nested `begin_transaction` calls are
/// rejected instead of silently stacking. The slot is shared with the
/// repository, so between `begin_transaction` and commit/rollback every
/// repository statement executes inside that transaction.
pub struct PgUnitOfWork {
    repository: PgDepartamentRepository,
    transaction: TransactionSlot,
    pool: PgPool,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        let transaction: TransactionSlot = Arc::new(Mutex::new(None));
        Self {
            repository: PgDepartamentRepository::with_slot(pool.clone(), transaction.clone()),
            transaction,
            pool,
        }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    fn departaments(&self) -> &dyn Repository<Departament> {
        &self.repository
    }

    async fn begin_transaction(&self) -> Result<(), RepositoryError> {
        let mut guard = self.transaction.lock().await;
        if guard.is_some() {
            return Err(RepositoryError::Transaction(
                "a transaction is already open".to_string(),
            ));
        }
        *guard = Some(self.pool.begin().await.map_err(map_db_error)?);
        Ok(())
    }

    async fn commit_transaction(&self) -> Result<(), RepositoryError> {
        let mut guard = self.transaction.lock().await;
        let tx = guard.take().ok_or_else(|| {
            RepositoryError::Transaction("no transaction to commit".to_string())
        })?;
        tx.commit().await.map_err(map_db_error)
    }

    async fn rollback_transaction(&self) -> Result<(), RepositoryError> {
        let mut guard = self.transaction.lock().await;
        let tx = guard.take().ok_or_else(|| {
            RepositoryError::Transaction("no transaction to roll back".to_string())
        })?;
        tx.rollback().await.map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must point at a disposable test database");
        let pool = PgPool::connect(&url).await.expect("connect to test database");
        sqlx::migrate!().run(&pool).await.expect("apply migrations");
        pool
    }

    fn departament(name: &str) -> Departament {
        Departament {
            departament_id: 0,
            name: name.to_string(),
            state: 1,
        }
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL server via DATABASE_URL"]
    async fn rollback_discards_writes_made_through_the_repository() {
        let pool = test_pool().await;
        let uow = PgUnitOfWork::new(pool);
        let name = format!("tx-{}", Uuid::new_v4());

        uow.begin_transaction().await.unwrap();
        uow.departaments().add(&departament(&name)).await.unwrap();

        // Visible inside the transaction.
        let staged_name = name.clone();
        let staged = uow
            .departaments()
            .find_where(&move |d| d.name == staged_name)
            .await
            .unwrap();
        assert!(staged.is_some());

        uow.rollback_transaction().await.unwrap();

        let after_name = name.clone();
        let after = uow
            .departaments()
            .find_where(&move |d| d.name == after_name)
            .await
            .unwrap();
        assert!(after.is_none());
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL server via DATABASE_URL"]
    async fn commit_persists_writes_made_through_the_repository() {
        let pool = test_pool().await;
        let uow = PgUnitOfWork::new(pool.clone());
        let name = format!("tx-{}", Uuid::new_v4());

        uow.begin_transaction().await.unwrap();
        uow.departaments().add(&departament(&name)).await.unwrap();
        uow.commit_transaction().await.unwrap();

        let committed_name = name.clone();
        let committed = uow
            .departaments()
            .find_where(&move |d| d.name == committed_name)
            .await
            .unwrap();
        assert!(committed.is_some());

        let repo = PgDepartamentRepository::new(pool);
        let purged = repo
            .execute_raw(&format!("DELETE FROM departament WHERE name = '{name}'"))
            .await
            .unwrap();
        assert_eq!(purged, 1);
    }
}
