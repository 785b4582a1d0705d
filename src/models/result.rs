//! Uniform result envelope returned by every service call.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Generic wrapper around the outcome of a business operation.
///
/// Every service method returns one of these instead of raising errors:
/// validation failures and storage faults set `has_error`, while not-found
/// and no-op outcomes are reported as successes with an explanatory message.
/// The HTTP layer always responds 200; clients branch on `hasError` alone.
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct ResultModel<T> {
    /// `true` when the operation failed, `false` when it succeeded.
    pub has_error: bool,
    /// Technical detail (exception text) intended for developers only.
    pub exception_message: Option<String>,
    /// Human-readable outcome message, e.g. "Departament not found".
    pub messages: Option<String>,
    /// Payload of the operation; `None` on error or when nothing was found.
    pub data: Option<T>,
}

impl<T> ResultModel<T> {
    /// Successful outcome with an optional payload.
    pub fn ok(data: Option<T>, messages: impl Into<String>) -> Self {
        Self {
            has_error: false,
            exception_message: None,
            messages: Some(messages.into()),
            data,
        }
    }

    /// Failed outcome with no technical detail (validation errors).
    pub fn error(messages: impl Into<String>) -> Self {
        Self {
            has_error: true,
            exception_message: None,
            messages: Some(messages.into()),
            data: None,
        }
    }

    /// Failed outcome carrying the underlying error text for debugging.
    pub fn error_with_detail(messages: impl Into<String>, detail: impl ToString) -> Self {
        Self {
            has_error: true,
            exception_message: Some(detail.to_string()),
            messages: Some(messages.into()),
            data: None,
        }
    }

    /// Replace the payload, keeping the rest of the envelope.
    pub fn with_data(mut self, data: Option<T>) -> Self {
        self.data = data;
        self
    }
}
