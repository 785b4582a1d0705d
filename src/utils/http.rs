//! Request-metadata helpers for audit logging.

use actix_web::HttpRequest;

/// Extract the client IP, preferring proxy headers over the socket address.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    for header_name in ["X-Forwarded-For", "X-Real-IP"] {
        if let Some(value) = req.headers().get(header_name).and_then(|h| h.to_str().ok()) {
            // X-Forwarded-For may list several hops; the first is the client.
            let ip = value.split(',').next().unwrap_or(value).trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Extract the User-Agent header, if present.
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
