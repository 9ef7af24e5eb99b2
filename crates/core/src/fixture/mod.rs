// Fixture Store - static seed data for the demo
//
// Users, clinics and queue entries the engine is seeded from at startup
// and reset to on refresh. Check-in times are offsets from the injected
// `now` so the seeded queue always looks recent.

use crate::domain::{
    Clinic, ClinicStatus, Priority, QueueEntry, QueueStatus, User, UserRole,
};

const MINUTE_MS: i64 = 60_000;

/// Seed user directory: one admin, three doctors, a receptionist and
/// five patients. Demo credentials, plaintext by design.
pub fn users() -> Vec<User> {
    vec![
        User {
            id: "admin-001".to_string(),
            email: "admin@hospital.com".to_string(),
            password: "admin123".to_string(),
            name: "System Administrator".to_string(),
            role: UserRole::Admin,
            clinic_id: None,
            phone: Some("+966501234567".to_string()),
        },
        User {
            id: "doc-001".to_string(),
            email: "dr.ahmed@hospital.com".to_string(),
            password: "doctor123".to_string(),
            name: "Dr. Ahmed Hassan".to_string(),
            role: UserRole::Doctor,
            clinic_id: Some("clinic-001".to_string()),
            phone: Some("+966502345678".to_string()),
        },
        User {
            id: "doc-002".to_string(),
            email: "dr.sara@hospital.com".to_string(),
            password: "doctor123".to_string(),
            name: "Dr. Sara Mohammed".to_string(),
            role: UserRole::Doctor,
            clinic_id: Some("clinic-002".to_string()),
            phone: Some("+966503456789".to_string()),
        },
        User {
            id: "doc-003".to_string(),
            email: "dr.khalid@hospital.com".to_string(),
            password: "doctor123".to_string(),
            name: "Dr. Khalid Ali".to_string(),
            role: UserRole::Doctor,
            clinic_id: Some("clinic-003".to_string()),
            phone: Some("+966504567890".to_string()),
        },
        User {
            id: "rec-001".to_string(),
            email: "reception@hospital.com".to_string(),
            password: "reception123".to_string(),
            name: "Fatima Al-Rashid".to_string(),
            role: UserRole::Receptionist,
            clinic_id: None,
            phone: Some("+966505678901".to_string()),
        },
        User {
            id: "pat-001".to_string(),
            email: "patient@hospital.com".to_string(),
            password: "patient123".to_string(),
            name: "Mohammed Al-Farsi".to_string(),
            role: UserRole::Patient,
            clinic_id: None,
            phone: Some("+966506789012".to_string()),
        },
        User {
            id: "pat-002".to_string(),
            email: "layla@email.com".to_string(),
            password: "patient123".to_string(),
            name: "Layla Ibrahim".to_string(),
            role: UserRole::Patient,
            clinic_id: None,
            phone: Some("+966507890123".to_string()),
        },
        User {
            id: "pat-003".to_string(),
            email: "omar@email.com".to_string(),
            password: "patient123".to_string(),
            name: "Omar Saeed".to_string(),
            role: UserRole::Patient,
            clinic_id: None,
            phone: Some("+966508901234".to_string()),
        },
        User {
            id: "pat-004".to_string(),
            email: "nora@email.com".to_string(),
            password: "patient123".to_string(),
            name: "Nora Abdullah".to_string(),
            role: UserRole::Patient,
            clinic_id: None,
            phone: Some("+966509012345".to_string()),
        },
        User {
            id: "pat-005".to_string(),
            email: "yusuf@email.com".to_string(),
            password: "patient123".to_string(),
            name: "Yusuf Hassan".to_string(),
            role: UserRole::Patient,
            clinic_id: None,
            phone: Some("+966510123456".to_string()),
        },
    ]
}

/// Seed clinics with counters already advanced, matching the seed queue
pub fn clinics() -> Vec<Clinic> {
    vec![
        Clinic {
            id: "clinic-001".to_string(),
            name: "Cardiology".to_string(),
            description: "Heart and cardiovascular care".to_string(),
            status: ClinicStatus::Available,
            doctor_id: "doc-001".to_string(),
            current_queue_number: 7,
            total_served: 23,
            average_wait_minutes: 15,
        },
        Clinic {
            id: "clinic-002".to_string(),
            name: "Orthopedics".to_string(),
            description: "Bone and joint specialists".to_string(),
            status: ClinicStatus::Busy,
            doctor_id: "doc-002".to_string(),
            current_queue_number: 9,
            total_served: 31,
            average_wait_minutes: 25,
        },
        Clinic {
            id: "clinic-003".to_string(),
            name: "Pediatrics".to_string(),
            description: "Children healthcare".to_string(),
            status: ClinicStatus::Available,
            doctor_id: "doc-003".to_string(),
            current_queue_number: 3,
            total_served: 18,
            average_wait_minutes: 10,
        },
    ]
}

fn entry(
    id: &str,
    patient_id: &str,
    patient_name: &str,
    clinic_id: &str,
    queue_number: u32,
    priority: Priority,
    status: QueueStatus,
    checked_in_minutes_ago: i64,
    estimated_wait_minutes: u32,
    now_millis: i64,
) -> QueueEntry {
    let mut e = QueueEntry::new(
        id,
        patient_id,
        patient_name,
        clinic_id,
        queue_number,
        priority,
        now_millis - checked_in_minutes_ago * MINUTE_MS,
        estimated_wait_minutes,
    );
    e.status = status;
    e
}

/// Seed queue entries mid-flight: each clinic already has patients being
/// served and waiting
pub fn queue_entries(now_millis: i64) -> Vec<QueueEntry> {
    vec![
        // Cardiology
        entry(
            "q-001",
            "pat-001",
            "Mohammed Al-Farsi",
            "clinic-001",
            5,
            Priority::Normal,
            QueueStatus::Serving,
            45,
            0,
            now_millis,
        ),
        entry(
            "q-002",
            "pat-002",
            "Layla Ibrahim",
            "clinic-001",
            6,
            Priority::Urgent,
            QueueStatus::Almost,
            30,
            5,
            now_millis,
        ),
        entry(
            "q-003",
            "pat-003",
            "Omar Saeed",
            "clinic-001",
            7,
            Priority::Normal,
            QueueStatus::Waiting,
            15,
            15,
            now_millis,
        ),
        // Orthopedics
        entry(
            "q-004",
            "pat-004",
            "Nora Abdullah",
            "clinic-002",
            8,
            Priority::Normal,
            QueueStatus::Serving,
            60,
            0,
            now_millis,
        ),
        entry(
            "q-005",
            "pat-005",
            "Yusuf Hassan",
            "clinic-002",
            9,
            Priority::Urgent,
            QueueStatus::Waiting,
            20,
            25,
            now_millis,
        ),
        // Pediatrics
        entry(
            "q-006",
            "pat-001",
            "Mohammed Al-Farsi",
            "clinic-003",
            3,
            Priority::Normal,
            QueueStatus::Waiting,
            10,
            10,
            now_millis,
        ),
    ]
}
