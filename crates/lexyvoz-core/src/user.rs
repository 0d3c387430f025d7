//! Typed user profile and backend wire mapping.
//!
//! The backend speaks JSON with Spanish field names and loose typing
//! (dates as strings, optional fields omitted or null). [`UserWire`] is
//! the raw shape as deserialized; [`UserProfile`] is the typed view-model
//! the rest of the system consumes, produced by a field-by-field reshape
//! with date coercion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Raw user record as the backend sends it.
///
/// Field names mirror the backend JSON exactly. Unknown fields are
/// ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWire {
    /// Backend user identifier.
    pub usuario_id: i64,
    /// Display name.
    pub nombre: String,
    /// Email address.
    pub correo: String,
    /// Raw role string ("Doctor", "paciente", "Administrador", ...).
    pub tipo: String,
    /// Avatar URL. Absent for accounts without an uploaded image.
    #[serde(default)]
    pub imagen_url: Option<String>,
    /// Doctor specialty. Only present for doctor accounts.
    #[serde(default)]
    pub especialidad: Option<String>,
    /// Patient schooling level. Only present for patient accounts.
    #[serde(default)]
    pub escolaridad: Option<String>,
    /// Account creation timestamp as an RFC 3339 string.
    #[serde(default)]
    pub fecha_creacion: Option<String>,
}

/// Typed user profile consumed by the session and guard layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user identifier.
    pub id: i64,
    /// Display name.
    pub nombre: String,
    /// Email address.
    pub correo: String,
    /// Raw role string, kept for round-tripping to storage.
    pub tipo: String,
    /// Avatar URL, if any.
    pub imagen_url: Option<String>,
    /// Doctor specialty, if any.
    pub especialidad: Option<String>,
    /// Patient schooling level, if any.
    pub escolaridad: Option<String>,
    /// Account creation timestamp. `None` if absent or unparseable.
    pub fecha_creacion: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Normalized role for this profile.
    pub fn role(&self) -> Role {
        Role::from_raw(&self.tipo)
    }
}

impl From<UserWire> for UserProfile {
    fn from(wire: UserWire) -> Self {
        // Unparseable dates degrade to None rather than failing the whole
        // record; the profile is still usable without a creation date.
        let fecha_creacion = wire
            .fecha_creacion
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            id: wire.usuario_id,
            nombre: wire.nombre,
            correo: wire.correo,
            tipo: wire.tipo,
            imagen_url: wire.imagen_url,
            especialidad: wire.especialidad,
            escolaridad: wire.escolaridad,
            fecha_creacion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor_json() -> &'static str {
        r#"{
            "usuario_id": 7,
            "nombre": "Ana",
            "correo": "ana@lexyvoz.test",
            "tipo": "Doctor",
            "especialidad": "Fonoaudiología",
            "fecha_creacion": "2024-03-01T12:30:00Z",
            "extra_field": true
        }"#
    }

    #[test]
    fn wire_deserializes_with_unknown_and_missing_fields() {
        let wire: UserWire = serde_json::from_str(doctor_json()).unwrap();
        assert_eq!(wire.usuario_id, 7);
        assert_eq!(wire.imagen_url, None);
        assert_eq!(wire.especialidad.as_deref(), Some("Fonoaudiología"));
    }

    #[test]
    fn profile_maps_fields_and_coerces_date() {
        let wire: UserWire = serde_json::from_str(doctor_json()).unwrap();
        let profile = UserProfile::from(wire);

        assert_eq!(profile.id, 7);
        assert_eq!(profile.role(), Role::Doctor);
        let created = profile.fecha_creacion.unwrap();
        assert_eq!(created.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn bad_date_degrades_to_none() {
        let wire = UserWire {
            usuario_id: 1,
            nombre: "X".into(),
            correo: "x@lexyvoz.test".into(),
            tipo: "paciente".into(),
            imagen_url: None,
            especialidad: None,
            escolaridad: None,
            fecha_creacion: Some("yesterday".into()),
        };

        let profile = UserProfile::from(wire);
        assert_eq!(profile.fecha_creacion, None);
        assert_eq!(profile.role(), Role::Paciente);
    }
}
