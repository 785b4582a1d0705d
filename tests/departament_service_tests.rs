//! Service-level tests for the departament read/write flow and its
//! cache-invalidation policy, run against the in-memory store.

use async_trait::async_trait;
use departament_api::config::CacheConfig;
use departament_api::models::{Departament, DepartamentDto};
use departament_api::repository::{MemoryUnitOfWork, Repository, RepositoryError, UnitOfWork};
use departament_api::services::DepartamentService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn departament(id: i32, name: &str, state: i16) -> Departament {
    Departament {
        departament_id: id,
        name: name.to_string(),
        state,
    }
}

fn dto(id: i32, name: &str, state: i16) -> DepartamentDto {
    DepartamentDto {
        departament_id: id,
        name: name.to_string(),
        state,
        name_state: None,
    }
}

fn seeded() -> (Arc<MemoryUnitOfWork>, DepartamentService) {
    let uow = Arc::new(MemoryUnitOfWork::with_rows(vec![
        departament(1, "Finance", 1),
        departament(2, "Human Resources", 0),
    ]));
    let service = DepartamentService::new(uow.clone(), &CacheConfig::default());
    (uow, service)
}

fn storage_fault() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolTimedOut)
}

/// Store double whose operations fail: with a storage fault by default,
/// with a concurrency conflict on `remove` when so configured. When
/// recovery rows are supplied, only the first `get` fails and later calls
/// return the rows.
struct FaultyRepository {
    conflict_on_remove: bool,
    recovery_rows: Option<Vec<Departament>>,
    get_failed: AtomicBool,
}

impl FaultyRepository {
    fn new() -> Self {
        Self {
            conflict_on_remove: false,
            recovery_rows: None,
            get_failed: AtomicBool::new(false),
        }
    }

    fn conflicting() -> Self {
        Self {
            conflict_on_remove: true,
            ..Self::new()
        }
    }

    fn recovering(rows: Vec<Departament>) -> Self {
        Self {
            recovery_rows: Some(rows),
            ..Self::new()
        }
    }
}

#[async_trait]
impl Repository<Departament> for FaultyRepository {
    async fn get(&self) -> Result<Vec<Departament>, RepositoryError> {
        if let Some(rows) = &self.recovery_rows {
            if self.get_failed.swap(true, Ordering::SeqCst) {
                return Ok(rows.clone());
            }
        }
        Err(storage_fault())
    }

    async fn find(&self, _id: i32) -> Result<Option<Departament>, RepositoryError> {
        Err(storage_fault())
    }

    async fn add(&self, _entity: &Departament) -> Result<u64, RepositoryError> {
        Err(storage_fault())
    }

    async fn update(&self, _entity: &Departament) -> Result<u64, RepositoryError> {
        Err(storage_fault())
    }

    async fn remove(&self, _id: i32) -> Result<u64, RepositoryError> {
        if self.conflict_on_remove {
            Err(RepositoryError::Conflict)
        } else {
            Err(storage_fault())
        }
    }
}

struct FaultyUnitOfWork {
    repository: FaultyRepository,
}

#[async_trait]
impl UnitOfWork for FaultyUnitOfWork {
    fn departaments(&self) -> &dyn Repository<Departament> {
        &self.repository
    }

    async fn begin_transaction(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn commit_transaction(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn rollback_transaction(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

fn faulty_service(repository: FaultyRepository) -> DepartamentService {
    let uow = Arc::new(FaultyUnitOfWork { repository });
    DepartamentService::new(uow, &CacheConfig::default())
}

#[tokio::test]
async fn list_is_served_from_cache_between_writes() {
    let (uow, service) = seeded();

    let first = service.list().await;
    assert!(!first.has_error);
    assert_eq!(first.messages.as_deref(), Some("Departaments listed successfully"));
    assert_eq!(first.data.as_ref().unwrap().len(), 2);

    // A write that bypasses the service must not be visible: the second
    // read comes from the cache, not the store.
    uow.departaments()
        .add(&departament(0, "Shadow", 1))
        .await
        .unwrap();

    let second = service.list().await;
    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn successful_add_invalidates_the_cache() {
    let (_uow, service) = seeded();

    service.list().await;

    let added = service.add(&dto(0, "Finance", 1)).await;
    assert!(!added.has_error);
    assert_eq!(
        added.messages.as_deref(),
        Some("Departament successfully created")
    );

    let listed = service.list().await;
    assert_eq!(listed.data.unwrap().len(), 3);
}

#[tokio::test]
async fn successful_update_invalidates_the_cache() {
    let (_uow, service) = seeded();
    service.list().await;

    let updated = service.update(&dto(1, "Accounting", 1)).await;
    assert!(!updated.has_error);
    assert_eq!(
        updated.messages.as_deref(),
        Some("Departament updated successfully")
    );

    let listed = service.list().await;
    let names: Vec<String> = listed
        .data
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert!(names.contains(&"Accounting".to_string()));
}

#[tokio::test]
async fn successful_delete_invalidates_the_cache() {
    let (_uow, service) = seeded();
    service.list().await;

    let deleted = service.delete(2).await;
    assert!(!deleted.has_error);
    assert_eq!(
        deleted.messages.as_deref(),
        Some("Departament deleted successfully")
    );

    let listed = service.list().await;
    assert_eq!(listed.data.unwrap().len(), 1);
}

#[tokio::test]
async fn get_by_id_rejects_non_positive_ids() {
    let (_uow, service) = seeded();

    for id in [0, -1] {
        let result = service.get_by_id(id).await;
        assert!(result.has_error);
        assert_eq!(result.messages.as_deref(), Some("Invalid departament ID"));
        assert!(result.data.is_none());
    }
}

#[tokio::test]
async fn get_by_id_scans_the_cached_list_first() {
    let (uow, service) = seeded();
    service.list().await;

    // Remove the row behind the cache; a cache hit must still find it.
    uow.departaments().remove(1).await.unwrap();

    let result = service.get_by_id(1).await;
    assert!(!result.has_error);
    assert_eq!(result.messages.as_deref(), Some("Departament found"));
    assert_eq!(result.data.unwrap().name, "Finance");
}

#[tokio::test]
async fn get_by_id_falls_back_to_the_store_on_cache_miss() {
    let (_uow, service) = seeded();

    let result = service.get_by_id(2).await;
    assert!(!result.has_error);
    assert_eq!(
        result.messages.as_deref(),
        Some("Departament found successfully")
    );
    let found = result.data.unwrap();
    assert_eq!(found.name, "Human Resources");
    assert_eq!(found.name_state.as_deref(), Some("Inactivo"));
}

#[tokio::test]
async fn get_by_id_not_found_is_a_success() {
    let (_uow, service) = seeded();

    let result = service.get_by_id(99).await;
    assert!(!result.has_error);
    assert_eq!(result.messages.as_deref(), Some("Departament not found"));
    assert!(result.data.is_none());
}

#[tokio::test]
async fn update_rejects_invalid_id_and_blank_name() {
    let (_uow, service) = seeded();

    let bad_id = service.update(&dto(0, "Finance", 1)).await;
    assert!(bad_id.has_error);
    assert_eq!(bad_id.messages.as_deref(), Some("Invalid departament ID"));

    let blank = service.update(&dto(1, "   ", 1)).await;
    assert!(blank.has_error);
    assert_eq!(
        blank.messages.as_deref(),
        Some("Departament name is required")
    );
}

#[tokio::test]
async fn update_of_missing_row_is_a_success() {
    let (_uow, service) = seeded();

    let result = service.update(&dto(99, "Ghost", 1)).await;
    assert!(!result.has_error);
    assert_eq!(result.messages.as_deref(), Some("Departament not found"));
}

#[tokio::test]
async fn unchanged_update_is_a_no_op() {
    let (_uow, service) = seeded();

    let result = service.update(&dto(1, "Finance", 1)).await;
    assert!(!result.has_error);
    assert_eq!(
        result.messages.as_deref(),
        Some("No changes detected, departament is up to date")
    );
}

#[tokio::test]
async fn update_rejects_case_insensitive_duplicate_names() {
    let (_uow, service) = seeded();

    let result = service.update(&dto(1, "hUmAn ReSoUrCeS", 1)).await;
    assert!(result.has_error);
    assert_eq!(
        result.messages.as_deref(),
        Some("A departament with this name already exists")
    );
}

#[tokio::test]
async fn renaming_to_own_name_with_new_state_is_allowed() {
    let (_uow, service) = seeded();

    // Same name, different state: the uniqueness check must not fire.
    let result = service.update(&dto(1, "Finance", 0)).await;
    assert!(!result.has_error);
    assert_eq!(
        result.messages.as_deref(),
        Some("Departament updated successfully")
    );
}

#[tokio::test]
async fn delete_rejects_non_positive_ids() {
    let (_uow, service) = seeded();

    let result = service.delete(0).await;
    assert!(result.has_error);
    assert_eq!(result.messages.as_deref(), Some("Invalid departament ID"));
}

#[tokio::test]
async fn delete_of_missing_row_is_a_success() {
    let (_uow, service) = seeded();

    let result = service.delete(99).await;
    assert!(!result.has_error);
    assert_eq!(result.messages.as_deref(), Some("Departament not found"));
}

#[tokio::test]
async fn add_reports_the_created_message() {
    let (_uow, service) = seeded();

    let result = service.add(&dto(0, "Finance", 1)).await;
    assert!(!result.has_error);
    assert_eq!(
        result.messages.as_deref(),
        Some("Departament successfully created")
    );
    assert_eq!(result.data.as_deref(), Some(""));
}

#[tokio::test]
async fn conflicting_delete_is_reported_as_already_deleted() {
    let service = faulty_service(FaultyRepository::conflicting());

    let result = service.delete(1).await;
    assert!(!result.has_error);
    assert_eq!(
        result.messages.as_deref(),
        Some("Departament was already deleted or does not exist")
    );
    assert!(result.exception_message.is_none());
}

#[tokio::test]
async fn list_storage_failure_yields_error_envelope_with_empty_data() {
    let service = faulty_service(FaultyRepository::new());

    let result = service.list().await;
    assert!(result.has_error);
    assert_eq!(
        result.messages.as_deref(),
        Some("Technical error listing departaments")
    );
    assert!(result.exception_message.is_some());
    assert_eq!(result.data, Some(Vec::new()));
}

#[tokio::test]
async fn failed_list_is_not_cached() {
    let service = faulty_service(FaultyRepository::recovering(vec![departament(
        1, "Finance", 1,
    )]));

    let first = service.list().await;
    assert!(first.has_error);

    // The store recovered; a cached failure would keep returning the error.
    let second = service.list().await;
    assert!(!second.has_error);
    assert_eq!(second.data.unwrap().len(), 1);
}

#[tokio::test]
async fn add_storage_failure_yields_technical_error() {
    let service = faulty_service(FaultyRepository::new());

    let result = service.add(&dto(0, "Finance", 1)).await;
    assert!(result.has_error);
    assert!(result
        .messages
        .unwrap()
        .starts_with("Technical error creating departament:"));
    assert!(result.exception_message.is_some());
    assert_eq!(result.data.as_deref(), Some(""));
}

#[tokio::test]
async fn get_by_id_storage_failure_yields_technical_error() {
    let service = faulty_service(FaultyRepository::new());

    let result = service.get_by_id(1).await;
    assert!(result.has_error);
    assert!(result
        .messages
        .unwrap()
        .starts_with("Technical error retrieving departament:"));
    assert!(result.exception_message.is_some());
}

#[tokio::test]
async fn update_storage_failure_yields_technical_error() {
    let service = faulty_service(FaultyRepository::new());

    let result = service.update(&dto(1, "Finance", 1)).await;
    assert!(result.has_error);
    assert!(result
        .messages
        .unwrap()
        .starts_with("Technical error updating departament:"));
    assert!(result.exception_message.is_some());
}

#[tokio::test]
async fn delete_storage_failure_yields_technical_error() {
    let service = faulty_service(FaultyRepository::new());

    let result = service.delete(1).await;
    assert!(result.has_error);
    assert!(result
        .messages
        .unwrap()
        .starts_with("Technical error deleting departament:"));
    assert!(result.exception_message.is_some());
}
