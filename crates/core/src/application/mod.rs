// Application Layer - Services and the queue engine

pub mod engine;
pub mod estimator;
pub mod session;

// Re-exports
pub use engine::{QueueEngine, SharedEngine, SystemStats};
pub use estimator::{shutdown_channel, ShutdownSender, ShutdownToken, WaitEstimator};
pub use session::{SessionManager, SignupRequest};
