//! Structured audit events for authentication outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Kinds of authentication events worth auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventType {
    LoginSuccess,
    LoginFailure,
    TokenRejected,
}

/// Audit log entry emitted for every login attempt and rejected token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAuditEvent {
    pub event_type: AuthEventType,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub user_name: Option<String>,
    pub endpoint: String,
}

impl AuthAuditEvent {
    pub fn new(event_type: AuthEventType, ip_address: String, endpoint: String) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            ip_address,
            user_agent: None,
            user_name: None,
            endpoint,
        }
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_user_name(mut self, user_name: Option<String>) -> Self {
        self.user_name = user_name;
        self
    }

    /// Emit the event as a structured log line.
    pub fn log(&self) {
        info!(
            target: "auth_audit",
            event_type = ?self.event_type,
            timestamp = %self.timestamp,
            ip_address = %self.ip_address,
            user_agent = ?self.user_agent,
            user_name = ?self.user_name,
            endpoint = %self.endpoint,
            "Authentication audit event"
        );
    }
}
