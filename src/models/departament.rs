//! Departament entity and its transfer object.

use crate::repository::Entity;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Status label for an active departament.
pub const STATE_ACTIVE_LABEL: &str = "Activo";
/// Status label for an inactive departament.
pub const STATE_INACTIVE_LABEL: &str = "Inactivo";
/// Status label for any state value other than 0 or 1.
pub const STATE_UNKNOWN_LABEL: &str = "Desconocido";

/// Persisted departament row.
///
/// `state` is byte-coded: 1 = active, 0 = inactive, anything else unknown.
/// The id is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Departament {
    pub departament_id: i32,
    pub name: String,
    pub state: i16,
}

impl Entity for Departament {
    type Id = i32;

    fn id(&self) -> i32 {
        self.departament_id
    }
}

/// Transfer object for a departament, as exposed over HTTP.
///
/// Carries the persisted fields plus `name_state`, a derived textual label
/// computed from `state` at read time and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct DepartamentDto {
    pub departament_id: i32,
    pub name: String,
    pub state: i16,
    pub name_state: Option<String>,
}

/// Textual label for a byte-coded state value.
pub fn state_label(state: i16) -> &'static str {
    match state {
        1 => STATE_ACTIVE_LABEL,
        0 => STATE_INACTIVE_LABEL,
        _ => STATE_UNKNOWN_LABEL,
    }
}

impl From<&Departament> for DepartamentDto {
    fn from(entity: &Departament) -> Self {
        Self {
            departament_id: entity.departament_id,
            name: entity.name.clone(),
            state: entity.state,
            name_state: Some(state_label(entity.state).to_string()),
        }
    }
}

impl From<&DepartamentDto> for Departament {
    fn from(dto: &DepartamentDto) -> Self {
        Self {
            departament_id: dto.departament_id,
            name: dto.name.clone(),
            state: dto.state,
        }
    }
}
