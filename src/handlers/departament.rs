//! Departament endpoint handlers: pure pass-through to the service.

use crate::models::{DepartamentDto, ResultModel};
use crate::services::DepartamentService;
use actix_web::{web::Form, Error, Result};
use paperclip::actix::{api_v2_operation, web};

/// List all departaments
#[api_v2_operation(
    summary = "List Departaments",
    description = "Returns every departament, served from cache when available.",
    tags("Departament"),
    responses(
        (status = 200, description = "Result envelope with the departament list"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn departament_list(
    service: web::Data<DepartamentService>,
) -> Result<web::Json<ResultModel<Vec<DepartamentDto>>>, Error> {
    Ok(web::Json(service.list().await))
}

/// Create a departament
#[api_v2_operation(
    summary = "Add Departament",
    description = "Creates a departament from form fields.",
    tags("Departament"),
    responses(
        (status = 200, description = "Result envelope reporting the outcome"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn departament_add(
    service: web::Data<DepartamentService>,
    form: Form<DepartamentDto>,
) -> Result<web::Json<ResultModel<String>>, Error> {
    Ok(web::Json(service.add(&form.into_inner()).await))
}

/// Fetch a departament by id
#[api_v2_operation(
    summary = "Get Departament By Id",
    description = "Returns one departament; not-found is a non-error envelope.",
    tags("Departament"),
    responses(
        (status = 200, description = "Result envelope with the departament, if any"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn get_departament_by_departament_id(
    service: web::Data<DepartamentService>,
    payload: web::Json<i32>,
) -> Result<web::Json<ResultModel<DepartamentDto>>, Error> {
    Ok(web::Json(service.get_by_id(payload.into_inner()).await))
}

/// Update a departament
#[api_v2_operation(
    summary = "Update Departament",
    description = "Updates name/state with duplicate-name and no-op detection.",
    tags("Departament"),
    responses(
        (status = 200, description = "Result envelope reporting the outcome"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn departament_update(
    service: web::Data<DepartamentService>,
    payload: web::Json<DepartamentDto>,
) -> Result<web::Json<ResultModel<String>>, Error> {
    Ok(web::Json(service.update(&payload.into_inner()).await))
}

/// Delete a departament
#[api_v2_operation(
    summary = "Delete Departament",
    description = "Deletes by id; a missing row is a non-error envelope.",
    tags("Departament"),
    responses(
        (status = 200, description = "Result envelope reporting the outcome"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn departament_delete(
    service: web::Data<DepartamentService>,
    path: web::Path<i32>,
) -> Result<web::Json<ResultModel<String>>, Error> {
    Ok(web::Json(service.delete(path.into_inner()).await))
}
