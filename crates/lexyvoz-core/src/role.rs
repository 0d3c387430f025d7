//! Role normalization.
//!
//! The backend is inconsistent about the casing and spelling of the user
//! type field ("Doctor", "Paciente", "Admin", "admin", "Administrador",
//! ...). Raw strings are parsed once, at the moment data enters the
//! system, into a closed enum. Unrecognized input maps to the
//! least-privileged role instead of guessing.

use serde::{Deserialize, Serialize};

/// Normalized user role.
///
/// Derived from the backend's raw `tipo` string by case-insensitive
/// prefix match. Only the observed prefixes are mapped; everything else
/// is [`Role::Usuario`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Doctor managing patients and exercise kits.
    Doctor,
    /// Patient working through assigned exercises.
    Paciente,
    /// Base account with no elevated access.
    Usuario,
}

impl Role {
    /// Parse a raw backend role string.
    ///
    /// Matching is by case-insensitive prefix: `adm*`, `doc*`, `pac*`.
    /// Anything else (including empty input) is [`Role::Usuario`].
    pub fn from_raw(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if normalized.starts_with("adm") {
            Self::Admin
        } else if normalized.starts_with("doc") {
            Self::Doctor
        } else if normalized.starts_with("pac") {
            Self::Paciente
        } else {
            Self::Usuario
        }
    }

    /// Canonical landing path for this role.
    ///
    /// Used as the redirect target when the guard denies a path or when
    /// an authenticated user lands on a public-only route.
    pub fn home_route(self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Doctor => "/main",
            Self::Paciente | Self::Usuario => "/home",
        }
    }

    /// Path prefixes this role may visit.
    ///
    /// A path is permitted if it equals a prefix or is a sub-path of one.
    /// Order is declaration order; only membership matters for the guard.
    pub fn allowed_prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Admin => &["/admin", "/perfil"],
            Self::Doctor => &["/main", "/kits", "/kits/editKit", "/pacientes", "/perfil"],
            Self::Paciente => &["/home", "/ejercicios", "/resultados", "/perfil"],
            Self::Usuario => &["/home", "/perfil"],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Admin => "admin",
            Self::Doctor => "Doctor",
            Self::Paciente => "Paciente",
            Self::Usuario => "Usuario",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn admin_spellings_normalize() {
        assert_eq!(Role::from_raw("admin"), Role::Admin);
        assert_eq!(Role::from_raw("Administrador"), Role::Admin);
        assert_eq!(Role::from_raw("ADMIN"), Role::Admin);
        assert_eq!(Role::from_raw("  Admin "), Role::Admin);
    }

    #[test]
    fn doctor_and_patient_prefixes() {
        assert_eq!(Role::from_raw("Doctor"), Role::Doctor);
        assert_eq!(Role::from_raw("doctora"), Role::Doctor);
        assert_eq!(Role::from_raw("Paciente"), Role::Paciente);
        assert_eq!(Role::from_raw("paciente "), Role::Paciente);
    }

    #[test]
    fn unrecognized_input_is_least_privileged() {
        assert_eq!(Role::from_raw("Usuario"), Role::Usuario);
        assert_eq!(Role::from_raw(""), Role::Usuario);
        assert_eq!(Role::from_raw("superuser"), Role::Usuario);
        assert_eq!(Role::from_raw("padmin"), Role::Usuario);
    }

    #[test]
    fn admin_spellings_share_a_home_route() {
        for raw in ["admin", "Administrador", "ADMIN"] {
            assert_eq!(Role::from_raw(raw).home_route(), "/admin");
        }
    }

    #[test]
    fn every_home_route_is_allowed_for_its_role() {
        for role in [Role::Admin, Role::Doctor, Role::Paciente, Role::Usuario] {
            assert!(
                role.allowed_prefixes().contains(&role.home_route()),
                "{role} home route missing from its allow-list"
            );
        }
    }

    proptest! {
        /// Parsing never panics and always yields a closed-enum value.
        #[test]
        fn prop_parse_total(raw in ".*") {
            let _ = Role::from_raw(&raw);
        }

        /// Parsing is case-insensitive.
        #[test]
        fn prop_parse_case_insensitive(raw in "[a-zA-Z]{0,12}") {
            prop_assert_eq!(
                Role::from_raw(&raw),
                Role::from_raw(&raw.to_uppercase())
            );
        }
    }
}
