// MedQ Infrastructure - Filesystem Adapter
// Implements: SessionStore

mod session_file;

pub use session_file::FileSessionStore;
