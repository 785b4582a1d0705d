//! Login endpoint handler.

use crate::models::{AuthAuditEvent, AuthEventType, LoginDto, ResultModel};
use crate::services::LoginService;
use crate::utils::http::{extract_client_ip, extract_user_agent};
use actix_web::{Error, HttpRequest, Result};
use paperclip::actix::{api_v2_operation, web};

/// User login endpoint
///
/// Validates the demo credentials and returns a bearer token inside the
/// result envelope. Anonymous; every attempt is audit-logged.
#[api_v2_operation(
    summary = "User Login",
    description = "Authenticate and receive a JWT bearer token (demo credentials).",
    tags("Login"),
    responses(
        (status = 200, description = "Result envelope with the login outcome")
    )
)]
pub async fn log_in(
    req: HttpRequest,
    service: web::Data<LoginService>,
    payload: web::Json<LoginDto>,
) -> Result<web::Json<ResultModel<LoginDto>>, Error> {
    let ip_address = extract_client_ip(&req);
    let user_agent = extract_user_agent(&req);
    let endpoint = req.uri().path().to_string();
    let user_name = payload.user_name.clone();

    let result = service.login(payload.into_inner()).await;

    let logged_in = result
        .data
        .as_ref()
        .is_some_and(|dto| dto.is_logued);
    let event_type = if logged_in {
        AuthEventType::LoginSuccess
    } else {
        AuthEventType::LoginFailure
    };

    AuthAuditEvent::new(event_type, ip_address, endpoint)
        .with_user_name(Some(user_name))
        .with_user_agent(user_agent)
        .log();

    Ok(web::Json(result))
}
