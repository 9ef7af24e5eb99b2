// Session lifecycle across core + the filesystem adapter

use std::sync::Arc;

use medq_core::application::{SessionManager, SignupRequest};
use medq_core::domain::UserRole;
use medq_core::fixture;
use medq_core::port::id_provider::mocks::SequentialIdProvider;
use medq_core::port::SessionStore;
use medq_infra_fs::FileSessionStore;

fn manager(store: Arc<FileSessionStore>) -> SessionManager {
    SessionManager::new(
        fixture::users(),
        store,
        Arc::new(SequentialIdProvider::new("u")),
    )
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::at(dir.path().join("session.json")));

    let mut sessions = manager(store.clone());
    let user = sessions.login("dr.ahmed@hospital.com", "doctor123").unwrap();
    assert_eq!(user.role, UserRole::Doctor);
    assert_eq!(user.clinic_id.as_deref(), Some("clinic-001"));

    // A fresh process restores the same identity from disk
    let mut restarted = manager(store);
    let restored = restarted.restore().unwrap();
    assert_eq!(restored.id, user.id);
    assert_eq!(restored.clinic_id, user.clinic_id);
}

#[test]
fn test_logout_clears_disk_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::at(dir.path().join("session.json")));

    let mut sessions = manager(store.clone());
    sessions.login("patient@hospital.com", "patient123").unwrap();
    sessions.logout().unwrap();

    let mut restarted = manager(store);
    assert!(restarted.restore().is_none());
}

#[test]
fn test_corrupt_blob_is_cleared_on_restore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "definitely not json").unwrap();
    let store = Arc::new(FileSessionStore::at(path.clone()));

    let mut sessions = manager(store);
    assert!(sessions.restore().is_none());
}

#[test]
fn test_signup_session_does_not_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::at(dir.path().join("session.json")));

    let mut sessions = manager(store.clone());
    let user = sessions
        .signup(SignupRequest {
            email: "ephemeral@hospital.com".to_string(),
            password: "pw".to_string(),
            name: "Ephemeral Patient".to_string(),
            role: UserRole::Patient,
            phone: None,
        })
        .unwrap();
    assert!(store.load().unwrap().is_some());

    // The fixture directory is rebuilt on restart, so the signed-up user is
    // gone and the stale blob gets cleared
    let mut restarted = manager(store.clone());
    assert!(restarted.restore().is_none());
    assert!(store.load().unwrap().is_none());
    assert!(!restarted.users().iter().any(|u| u.id == user.id));
}
