// Session Manager - credential lookup and session blob persistence
//
// Validates credentials against the fixture user directory and keeps the
// signed-in identity in a SessionStore. The identity only gates which
// operations the presentation layer exposes; the queue engine performs no
// authorization of its own.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{SessionUser, User, UserRole};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, SessionStore};

/// Signup form data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
}

pub struct SessionManager {
    users: Vec<User>,
    store: Arc<dyn SessionStore>,
    id_provider: Arc<dyn IdProvider>,
    current: Option<SessionUser>,
}

impl SessionManager {
    pub fn new(
        users: Vec<User>,
        store: Arc<dyn SessionStore>,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            users,
            store,
            id_provider,
            current: None,
        }
    }

    /// Load a persisted session at startup. A blob naming a user that no
    /// longer exists in the directory is stale and gets cleared, as does an
    /// unreadable one.
    pub fn restore(&mut self) -> Option<SessionUser> {
        match self.store.load() {
            Ok(Some(saved)) => {
                if self.users.iter().any(|u| u.id == saved.id) {
                    self.current = Some(saved.clone());
                    info!(user_id = %saved.id, role = %saved.role, "Session restored");
                    Some(saved)
                } else {
                    warn!(user_id = %saved.id, "Persisted session names unknown user, clearing");
                    let _ = self.store.clear();
                    None
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, clearing");
                let _ = self.store.clear();
                None
            }
        }
    }

    /// Authenticate and persist the session. The stored blob never carries
    /// the password.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "email and password are required".to_string(),
            ));
        }
        let user = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password == password)
            .ok_or(AppError::InvalidCredentials)?;

        let session = SessionUser::from(user);
        self.store.save(&session)?;
        info!(user_id = %session.id, role = %session.role, "User logged in");
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Create an account in the in-memory directory and auto-login.
    /// Demo behavior: the new user does not survive a restart.
    pub fn signup(&mut self, req: SignupRequest) -> Result<SessionUser> {
        if req.email.is_empty() || req.password.is_empty() || req.name.is_empty() {
            return Err(AppError::Validation("all fields are required".to_string()));
        }
        if self
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&req.email))
        {
            return Err(AppError::EmailTaken(req.email));
        }

        let user = User {
            id: format!("user-{}", self.id_provider.generate_id()),
            email: req.email,
            password: req.password,
            name: req.name,
            role: req.role,
            clinic_id: None,
            phone: req.phone,
        };
        let session = SessionUser::from(&user);
        info!(user_id = %user.id, role = %user.role, "User signed up");
        self.users.push(user);

        self.store.save(&session)?;
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Clear the current identity and the persisted blob
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id, "User logged out");
        }
        self.store.clear()
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::session_store::mocks::MemorySessionStore;

    fn manager(store: Arc<MemorySessionStore>) -> SessionManager {
        SessionManager::new(
            fixture::users(),
            store,
            Arc::new(SequentialIdProvider::new("u")),
        )
    }

    #[test]
    fn test_login_roundtrip() {
        let store = Arc::new(MemorySessionStore::new());
        let mut sessions = manager(store.clone());

        let user = sessions.login("patient@hospital.com", "patient123").unwrap();
        assert_eq!(user.role, UserRole::Patient);
        assert!(sessions.current_user().is_some());

        // Blob persisted and restorable by a fresh manager
        let mut restarted = manager(store);
        let restored = restarted.restore().unwrap();
        assert_eq!(restored.id, user.id);
    }

    #[test]
    fn test_login_is_case_insensitive_on_email() {
        let store = Arc::new(MemorySessionStore::new());
        let mut sessions = manager(store);
        assert!(sessions.login("PATIENT@hospital.com", "patient123").is_ok());
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let store = Arc::new(MemorySessionStore::new());
        let mut sessions = manager(store);

        assert!(matches!(
            sessions.login("patient@hospital.com", "wrong"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            sessions.login("", "patient123"),
            Err(AppError::Validation(_))
        ));
        assert!(sessions.current_user().is_none());
    }

    #[test]
    fn test_signup_rejects_duplicate_email() {
        let store = Arc::new(MemorySessionStore::new());
        let mut sessions = manager(store);

        let err = sessions
            .signup(SignupRequest {
                email: "Patient@Hospital.com".to_string(),
                password: "pw".to_string(),
                name: "Dup".to_string(),
                role: UserRole::Patient,
                phone: None,
            })
            .unwrap_err();
        assert!(matches!(err, AppError::EmailTaken(_)));
    }

    #[test]
    fn test_signup_auto_login() {
        let store = Arc::new(MemorySessionStore::new());
        let mut sessions = manager(store);

        let user = sessions
            .signup(SignupRequest {
                email: "new@hospital.com".to_string(),
                password: "pw".to_string(),
                name: "New Patient".to_string(),
                role: UserRole::Patient,
                phone: None,
            })
            .unwrap();
        assert_eq!(sessions.current_user().unwrap().id, user.id);
        assert!(sessions.users().iter().any(|u| u.id == user.id));
    }

    #[test]
    fn test_logout_clears_blob() {
        let store = Arc::new(MemorySessionStore::new());
        let mut sessions = manager(store.clone());

        sessions.login("patient@hospital.com", "patient123").unwrap();
        sessions.logout().unwrap();
        assert!(sessions.current_user().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_restore_clears_stale_session() {
        let store = Arc::new(MemorySessionStore::new());
        let mut sessions = manager(store.clone());
        let mut user = sessions.login("patient@hospital.com", "patient123").unwrap();
        user.id = "gone-001".to_string();
        store.save(&user).unwrap();

        let mut restarted = manager(store.clone());
        assert!(restarted.restore().is_none());
        assert!(store.load().unwrap().is_none());
    }
}
