//! Departament business logic: cache-aside reads, validated writes, and
//! synchronous cache invalidation.
//!
//! Every method returns a [`ResultModel`] envelope; repository errors are
//! converted locally and never re-raised. Not-found and no-op outcomes are
//! successes by contract, with an explanatory message.

use crate::cache::{MemoryCache, DEPARTAMENT_LIST_KEY};
use crate::config::CacheConfig;
use crate::models::{Departament, DepartamentDto, ResultModel};
use crate::repository::{RepositoryError, UnitOfWork};
use std::sync::Arc;
use tracing::error;

/// Service orchestrating the repository, the list cache and DTO mapping.
#[derive(Clone)]
pub struct DepartamentService {
    uow: Arc<dyn UnitOfWork>,
    cache: MemoryCache<Vec<DepartamentDto>>,
}

impl DepartamentService {
    pub fn new(uow: Arc<dyn UnitOfWork>, cache_config: &CacheConfig) -> Self {
        Self {
            uow,
            cache: MemoryCache::new(cache_config.ttl()),
        }
    }

    /// List every departament, cache-aside.
    ///
    /// A cache hit skips the store entirely; a miss loads all rows, maps
    /// them and populates the cache. Failed loads are reported in the
    /// envelope and never cached.
    pub async fn list(&self) -> ResultModel<Vec<DepartamentDto>> {
        if let Some(cached) = self.cache.get(DEPARTAMENT_LIST_KEY) {
            return ResultModel::ok(Some(cached), "Departaments listed successfully");
        }

        match self.uow.departaments().get().await {
            Ok(rows) => {
                let dtos: Vec<DepartamentDto> = rows.iter().map(DepartamentDto::from).collect();
                self.cache.set(DEPARTAMENT_LIST_KEY, dtos.clone());
                ResultModel::ok(Some(dtos), "Departaments listed successfully")
            }
            Err(err) => {
                error!(error = %err, "failed to list departaments");
                ResultModel::error_with_detail("Technical error listing departaments", &err)
                    .with_data(Some(Vec::new()))
            }
        }
    }

    /// Create a departament and invalidate the list cache on success.
    pub async fn add(&self, dto: &DepartamentDto) -> ResultModel<String> {
        let entity = Departament::from(dto);

        match self.uow.departaments().add(&entity).await {
            Ok(0) => {
                ResultModel::error("Departament could not be created").with_data(Some(String::new()))
            }
            Ok(_) => {
                self.cache.remove(DEPARTAMENT_LIST_KEY);
                ResultModel::ok(Some(String::new()), "Departament successfully created")
            }
            Err(err) => {
                error!(error = %err, name = %dto.name, "failed to create departament");
                ResultModel::error_with_detail(
                    format!("Technical error creating departament: {err}"),
                    &err,
                )
                .with_data(Some(String::new()))
            }
        }
    }

    /// Fetch one departament by id, consulting the cached list first.
    ///
    /// Not-found is a success with null data; only an invalid id or a
    /// storage fault is an error.
    pub async fn get_by_id(&self, id: i32) -> ResultModel<DepartamentDto> {
        if id <= 0 {
            return ResultModel::error("Invalid departament ID");
        }

        if let Some(cached) = self.cache.get(DEPARTAMENT_LIST_KEY) {
            let found = cached.into_iter().find(|dto| dto.departament_id == id);
            let message = if found.is_some() {
                "Departament found"
            } else {
                "Departament not found"
            };
            return ResultModel::ok(found, message);
        }

        match self.uow.departaments().find(id).await {
            Ok(Some(entity)) => ResultModel::ok(
                Some(DepartamentDto::from(&entity)),
                "Departament found successfully",
            ),
            Ok(None) => ResultModel::ok(None, "Departament not found"),
            Err(err) => {
                error!(error = %err, id, "failed to retrieve departament");
                ResultModel::error_with_detail(
                    format!("Technical error retrieving departament: {err}"),
                    &err,
                )
            }
        }
    }

    /// Update name/state of an existing departament.
    ///
    /// Rejects invalid ids, blank names and case-insensitive duplicate
    /// names; a row that no longer exists and an unchanged row are both
    /// non-error outcomes.
    pub async fn update(&self, dto: &DepartamentDto) -> ResultModel<String> {
        if dto.departament_id <= 0 {
            return ResultModel::error("Invalid departament ID");
        }
        if dto.name.trim().is_empty() {
            return ResultModel::error("Departament name is required");
        }

        let current = match self.uow.departaments().find(dto.departament_id).await {
            Ok(Some(entity)) => entity,
            Ok(None) => return ResultModel::ok(None, "Departament not found"),
            Err(err) => return self.update_failure(dto.departament_id, err),
        };

        if current.name == dto.name && current.state == dto.state {
            return ResultModel::ok(None, "No changes detected, departament is up to date");
        }

        if current.name != dto.name {
            let wanted = dto.name.to_lowercase();
            let id = dto.departament_id;
            let duplicates = match self
                .uow
                .departaments()
                .get_where(&move |d: &Departament| {
                    d.name.to_lowercase() == wanted && d.departament_id != id
                })
                .await
            {
                Ok(rows) => rows,
                Err(err) => return self.update_failure(dto.departament_id, err),
            };
            if !duplicates.is_empty() {
                return ResultModel::error("A departament with this name already exists");
            }
        }

        let updated = Departament {
            departament_id: current.departament_id,
            name: dto.name.clone(),
            state: dto.state,
        };

        match self.uow.departaments().update(&updated).await {
            Ok(0) => ResultModel::error("Failed to update departament"),
            Ok(_) => {
                self.cache.remove(DEPARTAMENT_LIST_KEY);
                ResultModel::ok(None, "Departament updated successfully")
            }
            Err(err) => self.update_failure(dto.departament_id, err),
        }
    }

    /// Delete a departament by id and invalidate the list cache on success.
    ///
    /// Zero rows affected and a concurrency conflict are both non-error
    /// outcomes: the row is gone either way.
    pub async fn delete(&self, id: i32) -> ResultModel<String> {
        if id <= 0 {
            return ResultModel::error("Invalid departament ID");
        }

        match self.uow.departaments().remove(id).await {
            Ok(0) => ResultModel::ok(None, "Departament not found"),
            Ok(_) => {
                self.cache.remove(DEPARTAMENT_LIST_KEY);
                ResultModel::ok(None, "Departament deleted successfully")
            }
            Err(RepositoryError::Conflict) => {
                ResultModel::ok(None, "Departament was already deleted or does not exist")
            }
            Err(err) => {
                error!(error = %err, id, "failed to delete departament");
                ResultModel::error_with_detail(
                    format!("Technical error deleting departament: {err}"),
                    &err,
                )
            }
        }
    }

    fn update_failure(&self, id: i32, err: RepositoryError) -> ResultModel<String> {
        error!(error = %err, id, "failed to update departament");
        ResultModel::error_with_detail(
            format!("Technical error updating departament: {err}"),
            &err,
        )
    }
}
