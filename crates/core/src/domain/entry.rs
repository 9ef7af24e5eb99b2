// Queue Entry Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::clinic::ClinicId;

/// Queue entry ID (UUID v4 in production)
pub type EntryId = String;

/// Patient identifier (a fixture user id, or a synthetic walk-in id)
pub type PatientId = String;

/// Entry lifecycle status
///
/// Happy path: waiting -> almost -> serving -> done.
/// Leaving the queue takes waiting/almost to cancelled.
/// Done and cancelled are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Waiting,
    Almost,
    Serving,
    Done,
    Cancelled,
}

impl QueueStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueueStatus::Done | QueueStatus::Cancelled)
    }

    /// Sort rank inside a clinic view: serving ahead of almost ahead of waiting
    pub(crate) fn rank(&self) -> u8 {
        match self {
            QueueStatus::Serving => 0,
            QueueStatus::Almost => 1,
            QueueStatus::Waiting => 2,
            QueueStatus::Done | QueueStatus::Cancelled => 3,
        }
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueStatus::Waiting => write!(f, "waiting"),
            QueueStatus::Almost => write!(f, "almost"),
            QueueStatus::Serving => write!(f, "serving"),
            QueueStatus::Done => write!(f, "done"),
            QueueStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Urgent entries are served ahead of normal entries regardless of check-in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

impl Priority {
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::Normal => 1,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Normal => write!(f, "normal"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

/// One patient's enrollment in a clinic's queue.
///
/// Lifecycle is owned exclusively by the queue engine; nothing else mutates
/// status. Queue numbers are unique per clinic and strictly increasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: EntryId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub clinic_id: ClinicId,
    pub queue_number: u32,
    pub priority: Priority,
    pub status: QueueStatus,
    /// Check-in timestamp, epoch ms (injected, not system time)
    pub check_in_time: i64,
    /// Advisory estimate; recomputed periodically, never affects ordering
    pub estimated_wait_minutes: u32,
    pub notes: Option<String>,
}

impl QueueEntry {
    /// Create a freshly checked-in entry in `waiting` status
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        patient_id: impl Into<String>,
        patient_name: impl Into<String>,
        clinic_id: impl Into<String>,
        queue_number: u32,
        priority: Priority,
        check_in_time: i64,
        estimated_wait_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            patient_id: patient_id.into(),
            patient_name: patient_name.into(),
            clinic_id: clinic_id.into(),
            queue_number,
            priority,
            status: QueueStatus::Waiting,
            check_in_time,
            estimated_wait_minutes,
            notes: None,
        }
    }

    /// Non-terminal entries count as active enrollment
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}
