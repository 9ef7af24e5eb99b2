// Queue Engine - the single owner of queue and clinic state
//
// All mutations go through this type; readers receive freshly computed
// snapshots and never hold a live handle into engine-owned storage.
// Every mutation bumps a revision published on a watch channel so
// dependent views can refresh.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::{
    Clinic, ClinicId, Priority, QueueEntry, QueueError, QueueStatus, User, UserRole,
};
use crate::port::{IdProvider, TimeProvider};

/// Shared handle used by the presentation layer and the estimator task.
/// Engine operations are synchronous and short; each one executes as a
/// single indivisible step under the lock.
pub type SharedEngine = Arc<Mutex<QueueEngine>>;

/// Admin-dashboard aggregates over the whole system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_patients: usize,
    pub total_doctors: usize,
    pub total_staff: usize,
    pub total_clinics: usize,
    pub active_clinics: usize,
    /// Entries currently waiting or almost across all clinics
    pub total_in_queue: usize,
    pub total_served_today: u32,
    pub average_wait_minutes: u32,
}

pub struct QueueEngine {
    clinics: Vec<Clinic>,
    entries: Vec<QueueEntry>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    revision: u64,
    changed: watch::Sender<u64>,
}

impl QueueEngine {
    pub fn new(
        clinics: Vec<Clinic>,
        entries: Vec<QueueEntry>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            clinics,
            entries,
            id_provider,
            time_provider,
            revision: 0,
            changed,
        }
    }

    /// Subscribe to change notifications. The received value is a revision
    /// counter; any change means dependent views should re-read.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    fn notify(&mut self) {
        self.revision += 1;
        let _ = self.changed.send(self.revision);
    }

    /// Add a patient to a clinic's queue.
    ///
    /// Rejected without state change if the clinic is unknown or the patient
    /// already holds a non-terminal entry for it. The new queue number is
    /// strictly above both the clinic's high-water counter and every number
    /// issued to a non-cancelled entry, so numbers are never reused.
    pub fn join_queue(
        &mut self,
        patient_id: &str,
        patient_name: &str,
        clinic_id: &str,
        priority: Priority,
    ) -> Result<QueueEntry, QueueError> {
        let clinic = self
            .clinics
            .iter()
            .find(|c| c.id == clinic_id)
            .ok_or_else(|| QueueError::ClinicNotFound(clinic_id.to_string()))?;
        let average_wait = clinic.average_wait_minutes;
        let counter = clinic.current_queue_number;

        if self
            .entries
            .iter()
            .any(|e| e.patient_id == patient_id && e.clinic_id == clinic_id && e.is_active())
        {
            return Err(QueueError::AlreadyInQueue {
                patient_id: patient_id.to_string(),
                clinic_id: clinic_id.to_string(),
            });
        }

        let max_issued = self
            .entries
            .iter()
            .filter(|e| e.clinic_id == clinic_id && e.status != QueueStatus::Cancelled)
            .map(|e| e.queue_number)
            .max()
            .unwrap_or(counter);
        let queue_number = max_issued.max(counter) + 1;

        let waiting_ahead = self
            .entries
            .iter()
            .filter(|e| {
                e.clinic_id == clinic_id
                    && matches!(e.status, QueueStatus::Waiting | QueueStatus::Almost)
            })
            .count();

        let entry = QueueEntry::new(
            self.id_provider.generate_id(),
            patient_id,
            patient_name,
            clinic_id,
            queue_number,
            priority,
            self.time_provider.now_millis(),
            waiting_ahead as u32 * average_wait,
        );

        self.entries.push(entry.clone());
        if let Some(c) = self.clinics.iter_mut().find(|c| c.id == clinic_id) {
            c.current_queue_number = c.current_queue_number.max(queue_number);
        }
        info!(
            patient_id = %entry.patient_id,
            clinic_id = %entry.clinic_id,
            queue_number = entry.queue_number,
            priority = %entry.priority,
            "Patient joined queue"
        );
        self.notify();
        Ok(entry)
    }

    /// Cancel a non-terminal entry. Terminal entries are final, so a second
    /// leave is an Ok no-op.
    pub fn leave_queue(&mut self, entry_id: &str) -> Result<(), QueueError> {
        let Some(idx) = self.entries.iter().position(|e| e.id == entry_id) else {
            return Err(QueueError::EntryNotFound(entry_id.to_string()));
        };
        if self.entries[idx].status.is_terminal() {
            return Ok(());
        }
        self.entries[idx].status = QueueStatus::Cancelled;
        let clinic_id = self.entries[idx].clinic_id.clone();
        info!(entry_id = %entry_id, clinic_id = %clinic_id, "Patient left queue");
        self.promote_next_in_line(&clinic_id);
        self.notify();
        Ok(())
    }

    /// Call the next patient for a clinic, as one atomic transition:
    /// the selected entry becomes serving, the previous serving entry (if
    /// any) becomes done, the new head of the waiting line becomes almost,
    /// and the clinic's served counter increments.
    ///
    /// Selection: urgent before normal, then earliest check-in; remaining
    /// ties fall back to stable insertion order.
    pub fn call_next_patient(&mut self, clinic_id: &str) -> Result<QueueEntry, QueueError> {
        if !self.clinics.iter().any(|c| c.id == clinic_id) {
            return Err(QueueError::ClinicNotFound(clinic_id.to_string()));
        }

        let mut eligible: Vec<usize> = (0..self.entries.len())
            .filter(|&i| {
                let e = &self.entries[i];
                e.clinic_id == clinic_id
                    && matches!(e.status, QueueStatus::Waiting | QueueStatus::Almost)
            })
            .collect();
        eligible.sort_by(|&a, &b| {
            let (ea, eb) = (&self.entries[a], &self.entries[b]);
            ea.priority
                .rank()
                .cmp(&eb.priority.rank())
                .then(ea.check_in_time.cmp(&eb.check_in_time))
        });
        let Some(&next) = eligible.first() else {
            return Err(QueueError::EmptyQueue(clinic_id.to_string()));
        };

        // Previous serving entry completes; at most one per clinic exists
        for e in self.entries.iter_mut() {
            if e.clinic_id == clinic_id && e.status == QueueStatus::Serving {
                e.status = QueueStatus::Done;
            }
        }

        self.entries[next].status = QueueStatus::Serving;
        self.entries[next].estimated_wait_minutes = 0;
        let called = self.entries[next].clone();

        self.promote_next_in_line(clinic_id);

        if let Some(c) = self.clinics.iter_mut().find(|c| c.id == clinic_id) {
            c.total_served += 1;
        }
        info!(
            entry_id = %called.id,
            clinic_id = %clinic_id,
            queue_number = called.queue_number,
            "Called next patient"
        );
        self.notify();
        Ok(called)
    }

    /// Complete service for an entry. Terminal entries are an Ok no-op.
    pub fn mark_patient_done(&mut self, entry_id: &str) -> Result<(), QueueError> {
        let Some(idx) = self.entries.iter().position(|e| e.id == entry_id) else {
            return Err(QueueError::EntryNotFound(entry_id.to_string()));
        };
        if self.entries[idx].status.is_terminal() {
            return Ok(());
        }
        self.entries[idx].status = QueueStatus::Done;
        let clinic_id = self.entries[idx].clinic_id.clone();
        info!(entry_id = %entry_id, clinic_id = %clinic_id, "Patient marked done");
        self.promote_next_in_line(&clinic_id);
        self.notify();
        Ok(())
    }

    /// Recompute the "almost" slot for a clinic: whenever the head of the
    /// waiting line (almost before waiting in view order) is still waiting,
    /// it is promoted so the next patient can be notified proactively.
    /// One routine covers call-next, mark-done and leave.
    fn promote_next_in_line(&mut self, clinic_id: &str) {
        let head = self
            .clinic_queue(clinic_id)
            .into_iter()
            .find(|e| matches!(e.status, QueueStatus::Waiting | QueueStatus::Almost));
        if let Some(head) = head {
            if head.status == QueueStatus::Waiting {
                if let Some(e) = self.entries.iter_mut().find(|e| e.id == head.id) {
                    debug!(entry_id = %e.id, clinic_id = %clinic_id, "Next in line promoted to almost");
                    e.status = QueueStatus::Almost;
                }
            }
        }
    }

    /// Ordered view of a clinic's non-terminal entries: serving first, then
    /// almost, then waiting; urgent before normal within a tier; queue
    /// number ascending within that. Recomputed on every call.
    pub fn clinic_queue(&self, clinic_id: &str) -> Vec<QueueEntry> {
        let mut view: Vec<QueueEntry> = self
            .entries
            .iter()
            .filter(|e| e.clinic_id == clinic_id && e.is_active())
            .cloned()
            .collect();
        view.sort_by(|a, b| {
            a.status
                .rank()
                .cmp(&b.status.rank())
                .then(a.priority.rank().cmp(&b.priority.rank()))
                .then(a.queue_number.cmp(&b.queue_number))
        });
        view
    }

    /// The patient's single non-terminal entry, optionally scoped to one clinic
    pub fn patient_queue(&self, patient_id: &str, clinic_id: Option<&str>) -> Option<QueueEntry> {
        self.entries
            .iter()
            .find(|e| {
                e.patient_id == patient_id
                    && e.is_active()
                    && clinic_id.is_none_or(|c| e.clinic_id == c)
            })
            .cloned()
    }

    /// Position of the entry within its clinic queue, i.e. how many entries
    /// are ordered strictly before it. Zero if the entry is not in the view.
    pub fn waiting_count(&self, entry: &QueueEntry) -> usize {
        self.clinic_queue(&entry.clinic_id)
            .iter()
            .position(|e| e.id == entry.id)
            .unwrap_or(0)
    }

    /// Periodic advisory re-estimation: every waiting entry's estimate
    /// becomes its view position times the clinic's average service
    /// duration. Never affects ordering or status.
    pub fn reestimate_wait_times(&mut self) {
        let specs: Vec<(ClinicId, u32)> = self
            .clinics
            .iter()
            .map(|c| (c.id.clone(), c.average_wait_minutes))
            .collect();
        let mut dirty = false;
        for (clinic_id, average_wait) in specs {
            for (position, viewed) in self.clinic_queue(&clinic_id).iter().enumerate() {
                if viewed.status != QueueStatus::Waiting {
                    continue;
                }
                let estimate = position as u32 * average_wait;
                if let Some(e) = self.entries.iter_mut().find(|e| e.id == viewed.id) {
                    if e.estimated_wait_minutes != estimate {
                        e.estimated_wait_minutes = estimate;
                        dirty = true;
                    }
                }
            }
        }
        if dirty {
            debug!(revision = self.revision, "Wait estimates updated");
            self.notify();
        }
    }

    /// Reset engine state from a fixture snapshot
    pub fn refresh(&mut self, clinics: Vec<Clinic>, entries: Vec<QueueEntry>) {
        self.clinics = clinics;
        self.entries = entries;
        info!(
            clinics = self.clinics.len(),
            entries = self.entries.len(),
            "Engine state refreshed from fixtures"
        );
        self.notify();
    }

    pub fn clinics(&self) -> Vec<Clinic> {
        self.clinics.clone()
    }

    pub fn clinic(&self, clinic_id: &str) -> Option<Clinic> {
        self.clinics.iter().find(|c| c.id == clinic_id).cloned()
    }

    pub fn entries(&self) -> Vec<QueueEntry> {
        self.entries.clone()
    }

    /// Aggregates for the admin dashboard
    pub fn system_stats(&self, users: &[User]) -> SystemStats {
        let total_clinics = self.clinics.len();
        let average_wait_minutes = if total_clinics == 0 {
            0
        } else {
            let sum: u32 = self.clinics.iter().map(|c| c.average_wait_minutes).sum();
            (sum as f64 / total_clinics as f64).round() as u32
        };
        SystemStats {
            total_patients: users.iter().filter(|u| u.role == UserRole::Patient).count(),
            total_doctors: users.iter().filter(|u| u.role == UserRole::Doctor).count(),
            total_staff: users
                .iter()
                .filter(|u| u.role == UserRole::Receptionist)
                .count(),
            total_clinics,
            active_clinics: self.clinics.iter().filter(|c| c.is_active()).count(),
            total_in_queue: self
                .entries
                .iter()
                .filter(|e| matches!(e.status, QueueStatus::Waiting | QueueStatus::Almost))
                .count(),
            total_served_today: self.clinics.iter().map(|c| c.total_served).sum(),
            average_wait_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClinicStatus;
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::time_provider::mocks::FixedTimeProvider;

    fn clinic(id: &str, counter: u32, average_wait: u32) -> Clinic {
        Clinic {
            id: id.to_string(),
            name: format!("Clinic {id}"),
            description: String::new(),
            status: ClinicStatus::Available,
            doctor_id: "doc-001".to_string(),
            current_queue_number: counter,
            total_served: 0,
            average_wait_minutes: average_wait,
        }
    }

    fn engine_with(clinics: Vec<Clinic>) -> (QueueEngine, Arc<FixedTimeProvider>) {
        let clock = Arc::new(FixedTimeProvider::new(1_000));
        let engine = QueueEngine::new(
            clinics,
            Vec::new(),
            Arc::new(SequentialIdProvider::new("q")),
            clock.clone(),
        );
        (engine, clock)
    }

    #[test]
    fn test_join_empty_clinic() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 4, 15)]);

        let entry = engine
            .join_queue("p1", "A", "c1", Priority::Normal)
            .unwrap();
        assert_eq!(entry.queue_number, 5);
        assert_eq!(entry.status, QueueStatus::Waiting);
        assert_eq!(entry.estimated_wait_minutes, 0); // no one ahead
        assert_eq!(engine.clinic("c1").unwrap().current_queue_number, 5);
    }

    #[test]
    fn test_join_rejects_duplicate_enrollment() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);

        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        let err = engine
            .join_queue("p1", "A", "c1", Priority::Normal)
            .unwrap_err();
        assert!(matches!(err, QueueError::AlreadyInQueue { .. }));
        assert_eq!(engine.entries().len(), 1);
    }

    #[test]
    fn test_join_unknown_clinic() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);
        let err = engine
            .join_queue("p1", "A", "nope", Priority::Normal)
            .unwrap_err();
        assert_eq!(err, QueueError::ClinicNotFound("nope".to_string()));
    }

    #[test]
    fn test_queue_numbers_survive_cancellation() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);

        let first = engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        engine.leave_queue(&first.id).unwrap();
        let second = engine.join_queue("p2", "B", "c1", Priority::Normal).unwrap();

        // Counter keeps the high-water mark, so the cancelled number
        // is never reissued
        assert_eq!(first.queue_number, 1);
        assert_eq!(second.queue_number, 2);
    }

    #[test]
    fn test_estimate_counts_patients_ahead() {
        let (mut engine, clock) = engine_with(vec![clinic("c1", 0, 15)]);

        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        engine.join_queue("p2", "B", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let third = engine.join_queue("p3", "C", "c1", Priority::Normal).unwrap();

        assert_eq!(third.estimated_wait_minutes, 30); // two ahead x 15 min
        assert_eq!(engine.waiting_count(&third), 2);
    }

    #[test]
    fn test_call_next_prefers_urgent() {
        let (mut engine, clock) = engine_with(vec![clinic("c1", 4, 15)]);

        let normal = engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let urgent = engine.join_queue("p2", "B", "c1", Priority::Urgent).unwrap();
        assert_eq!(normal.queue_number, 5);
        assert_eq!(urgent.queue_number, 6);

        let called = engine.call_next_patient("c1").unwrap();
        assert_eq!(called.id, urgent.id);
        assert_eq!(called.status, QueueStatus::Serving);
        assert_eq!(called.estimated_wait_minutes, 0);

        // The normal entry is now next in line
        let view = engine.clinic_queue("c1");
        assert_eq!(view[0].id, urgent.id);
        assert_eq!(view[1].id, normal.id);
        assert_eq!(view[1].status, QueueStatus::Almost);
    }

    #[test]
    fn test_call_next_completes_previous_serving() {
        let (mut engine, clock) = engine_with(vec![clinic("c1", 0, 15)]);

        let a = engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let b = engine.join_queue("p2", "B", "c1", Priority::Normal).unwrap();

        engine.call_next_patient("c1").unwrap();
        let second_call = engine.call_next_patient("c1").unwrap();
        assert_eq!(second_call.id, b.id);

        let entries = engine.entries();
        let a_now = entries.iter().find(|e| e.id == a.id).unwrap();
        assert_eq!(a_now.status, QueueStatus::Done);

        // Exactly one serving entry, served counter bumped per call
        let serving = entries
            .iter()
            .filter(|e| e.clinic_id == "c1" && e.status == QueueStatus::Serving)
            .count();
        assert_eq!(serving, 1);
        assert_eq!(engine.clinic("c1").unwrap().total_served, 2);
    }

    #[test]
    fn test_call_next_empty_queue() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);
        let err = engine.call_next_patient("c1").unwrap_err();
        assert_eq!(err, QueueError::EmptyQueue("c1".to_string()));
        assert!(engine.entries().is_empty());
    }

    #[test]
    fn test_mark_done_empties_queue() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);

        let entry = engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        engine.call_next_patient("c1").unwrap();
        engine.mark_patient_done(&entry.id).unwrap();

        assert!(engine.clinic_queue("c1").is_empty());
        assert!(engine.patient_queue("p1", Some("c1")).is_none());
    }

    #[test]
    fn test_mark_done_promotes_next_waiting() {
        let (mut engine, clock) = engine_with(vec![clinic("c1", 0, 15)]);

        let a = engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let b = engine.join_queue("p2", "B", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let c = engine.join_queue("p3", "C", "c1", Priority::Normal).unwrap();

        engine.call_next_patient("c1").unwrap(); // a serving, b almost
        engine.mark_patient_done(&a.id).unwrap();

        let view = engine.clinic_queue("c1");
        assert_eq!(view[0].id, b.id);
        assert_eq!(view[0].status, QueueStatus::Almost);
        assert_eq!(view[1].id, c.id);
        assert_eq!(view[1].status, QueueStatus::Waiting);
    }

    #[test]
    fn test_terminal_states_are_idempotent() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);

        let entry = engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        engine.leave_queue(&entry.id).unwrap();
        let before = engine.entries();

        engine.leave_queue(&entry.id).unwrap();
        engine.mark_patient_done(&entry.id).unwrap();
        let after = engine.entries();

        assert_eq!(before.len(), after.len());
        let cancelled = after.iter().find(|e| e.id == entry.id).unwrap();
        assert_eq!(cancelled.status, QueueStatus::Cancelled);
    }

    #[test]
    fn test_unknown_entry_is_not_found() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);
        assert_eq!(
            engine.leave_queue("nope").unwrap_err(),
            QueueError::EntryNotFound("nope".to_string())
        );
        assert_eq!(
            engine.mark_patient_done("nope").unwrap_err(),
            QueueError::EntryNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_leave_promotes_next_in_line() {
        let (mut engine, clock) = engine_with(vec![clinic("c1", 0, 15)]);

        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let b = engine.join_queue("p2", "B", "c1", Priority::Normal).unwrap();

        let called = engine.call_next_patient("c1").unwrap(); // p1 serving, p2 almost
        engine.leave_queue(&b.id).unwrap();
        clock.advance(1_000);
        let c = engine.join_queue("p3", "C", "c1", Priority::Normal).unwrap();

        engine.mark_patient_done(&called.id).unwrap();
        let view = engine.clinic_queue("c1");
        assert_eq!(view[0].id, c.id);
        assert_eq!(view[0].status, QueueStatus::Almost);
    }

    #[test]
    fn test_patient_queue_scoping() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15), clinic("c2", 0, 10)]);

        let in_c1 = engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        let in_c2 = engine.join_queue("p1", "A", "c2", Priority::Normal).unwrap();

        assert_eq!(engine.patient_queue("p1", Some("c2")).unwrap().id, in_c2.id);
        assert_eq!(engine.patient_queue("p1", None).unwrap().id, in_c1.id);
        assert!(engine.patient_queue("p2", None).is_none());
    }

    #[test]
    fn test_reestimation_tracks_positions() {
        let (mut engine, clock) = engine_with(vec![clinic("c1", 0, 15)]);

        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let b = engine.join_queue("p2", "B", "c1", Priority::Normal).unwrap();
        clock.advance(1_000);
        let c = engine.join_queue("p3", "C", "c1", Priority::Urgent).unwrap();

        engine.reestimate_wait_times();
        let entries = engine.entries();
        // Urgent entry sorts ahead of both earlier normal ones
        let b_now = entries.iter().find(|e| e.id == b.id).unwrap();
        let c_now = entries.iter().find(|e| e.id == c.id).unwrap();
        assert_eq!(c_now.estimated_wait_minutes, 0); // position 0
        assert_eq!(b_now.estimated_wait_minutes, 30); // position 2
    }

    #[test]
    fn test_watch_notification_on_mutation() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);
        let rx = engine.subscribe();

        assert_eq!(*rx.borrow(), 0);
        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        assert_eq!(*rx.borrow(), 1);
    }

    #[test]
    fn test_refresh_resets_state() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);
        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();

        engine.refresh(vec![clinic("c1", 0, 15)], Vec::new());
        assert!(engine.entries().is_empty());
        assert_eq!(engine.clinic("c1").unwrap().current_queue_number, 0);
    }

    #[test]
    fn test_snapshots_do_not_alias_engine_state() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 15)]);
        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();

        let mut view = engine.clinic_queue("c1");
        view[0].status = QueueStatus::Done;

        assert_eq!(engine.clinic_queue("c1").len(), 1);
        assert_eq!(engine.entries()[0].status, QueueStatus::Waiting);
    }

    #[test]
    fn test_system_stats() {
        let (mut engine, _clock) = engine_with(vec![clinic("c1", 0, 10), clinic("c2", 0, 20)]);
        engine.join_queue("p1", "A", "c1", Priority::Normal).unwrap();
        engine.join_queue("p2", "B", "c2", Priority::Normal).unwrap();
        engine.call_next_patient("c1").unwrap();

        let stats = engine.system_stats(&[]);
        assert_eq!(stats.total_clinics, 2);
        assert_eq!(stats.active_clinics, 2);
        assert_eq!(stats.total_in_queue, 1); // c1's entry is serving now
        assert_eq!(stats.total_served_today, 1);
        assert_eq!(stats.average_wait_minutes, 15);
    }
}
