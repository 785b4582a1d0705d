//! Bearer-token guard for the departament endpoints.

use crate::auth::{validate_token, Claims};
use crate::config::JwtConfig;
use crate::models::{AuthAuditEvent, AuthEventType};
use crate::utils::http::{extract_client_ip, extract_user_agent};
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, HttpMessage,
};
use std::{
    future::{ready, Ready},
    pin::Pin,
};

/// Paths under this prefix require a valid bearer token; everything else
/// (login, health, the spec) stays anonymous.
const PROTECTED_PREFIX: &str = "/api/Departament";

/// Middleware factory rejecting protected requests without a valid JWT.
pub struct JwtAuth {
    config: JwtConfig,
}

impl JwtAuth {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service,
            config: self.config.clone(),
        }))
    }
}

/// The actual guard service.
pub struct JwtAuthMiddleware<S> {
    service: S,
    config: JwtConfig,
}

/// Pull the bearer token out of the Authorization header, if present.
fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !req.path().starts_with(PROTECTED_PREFIX) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let claims: Option<Claims> =
            bearer_token(&req).and_then(|token| validate_token(token, &self.config).ok());

        match claims {
            Some(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            None => {
                AuthAuditEvent::new(
                    AuthEventType::TokenRejected,
                    extract_client_ip(req.request()),
                    req.path().to_string(),
                )
                .with_user_agent(extract_user_agent(req.request()))
                .log();

                Box::pin(ready(Err(ErrorUnauthorized(
                    "Invalid or missing bearer token",
                ))))
            }
        }
    }
}
