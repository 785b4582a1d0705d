//! OpenAPI specification and app factory.

use crate::{
    config::JwtConfig,
    handlers::{
        departament_add, departament_delete, departament_list, departament_update,
        get_departament_by_departament_id, health, log_in,
    },
    middleware::JwtAuth,
    services::{DepartamentService, LoginService},
};
use actix_cors::Cors;
use actix_web::App;
use paperclip::actix::{web, OpenApiExt};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Departament API".into(),
            version: "1.0.0".into(),
            description: Some(
                "REST backend exposing JWT login and CRUD for departaments.\n\n\
                All endpoints respond HTTP 200 with a uniform result envelope \
                `{hasError, messages, exceptionMessage, data}`; clients branch on \
                `hasError`, not on status codes.\n\n\
                ## Authentication\n\
                `POST /api/Login/LogIn` is anonymous and returns a bearer token on \
                success. Every `/api/Departament/*` endpoint requires \
                `Authorization: Bearer {token}` and answers 401 otherwise."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// CORS policy restricted to the configured origins.
fn cors_policy(config: &JwtConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header();
    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

/// Creates the application with shared configuration
///
/// Services are built once by the caller and cloned into every worker so
/// the list cache stays process-wide. Used by `main` and by the
/// integration tests (which pass an in-memory store).
pub fn create_app(
    departament_service: DepartamentService,
    login_service: LoginService,
    jwt_config: JwtConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<actix_web::body::BoxBody>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(JwtAuth::new(jwt_config.clone()))
        .wrap(cors_policy(&jwt_config))
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(departament_service))
        .app_data(web::Data::new(login_service))
        .app_data(web::Data::new(jwt_config))
        .service(
            web::scope("/api/Departament")
                .service(
                    web::resource("/DepartamentList").route(web::get().to(departament_list)),
                )
                .service(web::resource("/DepartamentAdd").route(web::post().to(departament_add)))
                .service(
                    web::resource("/GetDepartamentByDepartamentId")
                        .route(web::post().to(get_departament_by_departament_id)),
                )
                .service(
                    web::resource("/DepartamentUpdt").route(web::put().to(departament_update)),
                )
                .service(
                    web::resource("/DepartamentDelete/{id}")
                        .route(web::delete().to(departament_delete)),
                ),
        )
        .service(web::resource("/api/Login/LogIn").route(web::post().to(log_in)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
