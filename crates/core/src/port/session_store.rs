// Session Store Port - persistence for the session blob
//
// The only state that survives a restart is the signed-in identity,
// kept under a fixed key. Queue and clinic collections are not persisted.

use crate::domain::SessionUser;
use crate::error::Result;

/// Session blob persistence interface
pub trait SessionStore: Send + Sync {
    /// Load the saved session, if any. A corrupt blob reads as `None`.
    fn load(&self) -> Result<Option<SessionUser>>;

    /// Persist the session blob, replacing any previous one
    fn save(&self, user: &SessionUser) -> Result<()>;

    /// Remove the persisted session (logout)
    fn clear(&self) -> Result<()>;
}

/// Mock implementations for tests
pub mod mocks {
    use super::SessionStore;
    use crate::domain::SessionUser;
    use crate::error::Result;
    use std::sync::Mutex;

    /// In-memory store, no durability
    #[derive(Default)]
    pub struct MemorySessionStore {
        slot: Mutex<Option<SessionUser>>,
    }

    impl MemorySessionStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl SessionStore for MemorySessionStore {
        fn load(&self) -> Result<Option<SessionUser>> {
            Ok(self.slot.lock().map(|s| s.clone()).unwrap_or(None))
        }

        fn save(&self, user: &SessionUser) -> Result<()> {
            if let Ok(mut slot) = self.slot.lock() {
                *slot = Some(user.clone());
            }
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            if let Ok(mut slot) = self.slot.lock() {
                *slot = None;
            }
            Ok(())
        }
    }
}
