// File Session Store - the session blob under a fixed key on disk

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, warn};

use medq_core::domain::SessionUser;
use medq_core::error::{AppError, Result};
use medq_core::port::SessionStore;

/// Fixed key the session is stored under, as a file name
const SESSION_FILE: &str = "session.json";

/// Persists the signed-in identity as a JSON blob in the platform data
/// directory. The only state that survives a process restart.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store under the platform data directory for the application
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "medq", "medq").ok_or_else(|| {
            AppError::SessionStore("no home directory for session storage".to_string())
        })?;
        Ok(Self::at(dirs.data_dir().join(SESSION_FILE)))
    }

    /// Store at an explicit path (tests, MEDQ_SESSION_PATH override)
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionUser>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                // A corrupt blob reads as no session; the caller clears it
                warn!(path = %self.path.display(), error = %e, "Unreadable session blob");
                Ok(None)
            }
        }
    }

    fn save(&self, user: &SessionUser) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(user)?)?;
        debug!(path = %self.path.display(), user_id = %user.id, "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
