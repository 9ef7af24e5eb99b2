// User Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::clinic::ClinicId;

/// User identifier
pub type UserId = String;

/// Role decides which operations the presentation layer exposes.
/// The queue engine itself performs no authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Patient,
    Doctor,
    Receptionist,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Patient => write!(f, "patient"),
            UserRole::Doctor => write!(f, "doctor"),
            UserRole::Receptionist => write!(f, "receptionist"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Fixture-store user record. Passwords are plaintext demo data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    /// Clinic assignment, for doctors
    pub clinic_id: Option<ClinicId>,
    pub phone: Option<String>,
}

/// The persisted session blob: a user minus the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub clinic_id: Option<ClinicId>,
    pub phone: Option<String>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            clinic_id: user.clinic_id.clone(),
            phone: user.phone.clone(),
        }
    }
}
