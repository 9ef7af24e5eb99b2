// Domain Error Types

use thiserror::Error;

use crate::domain::clinic::ClinicId;
use crate::domain::entry::{EntryId, PatientId};

/// Recoverable, expected outcomes of queue operations.
/// Malformed identifiers normalize to one of these; there is no
/// unrecoverable engine error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("clinic not found: {0}")]
    ClinicNotFound(ClinicId),

    #[error("queue entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("patient {patient_id} is already in the queue for clinic {clinic_id}")]
    AlreadyInQueue {
        patient_id: PatientId,
        clinic_id: ClinicId,
    },

    #[error("no waiting patients in clinic {0}")]
    EmptyQueue(ClinicId),
}

pub type Result<T> = std::result::Result<T, QueueError>;
