//! Login request/response transfer object.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Credentials sent to the login endpoint; the same shape is echoed back
/// with the authentication outcome and, on success, a bearer token.
///
/// The password is blanked in every response branch so it never travels
/// back to the client.
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    pub user_name: String,
    pub password: Option<String>,
    #[serde(default)]
    pub is_logued: bool,
    pub token: Option<String>,
}
