// Clinic Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Clinic identifier
pub type ClinicId = String;

/// Clinic availability as shown on the dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicStatus {
    Available,
    Busy,
    Closed,
}

impl std::fmt::Display for ClinicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClinicStatus::Available => write!(f, "available"),
            ClinicStatus::Busy => write!(f, "busy"),
            ClinicStatus::Closed => write!(f, "closed"),
        }
    }
}

/// A service department with its own independent queue and counters.
///
/// `current_queue_number` is the high-water mark of issued queue numbers:
/// non-decreasing, and never below the number of any entry issued for this
/// clinic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinic {
    pub id: ClinicId,
    pub name: String,
    pub description: String,
    pub status: ClinicStatus,
    pub doctor_id: UserId,
    pub current_queue_number: u32,
    pub total_served: u32,
    /// Average service duration per patient, in minutes
    pub average_wait_minutes: u32,
}

impl Clinic {
    pub fn is_active(&self) -> bool {
        self.status != ClinicStatus::Closed
    }
}
