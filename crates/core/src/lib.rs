// MedQ Core - Domain Logic & Ports
// NO infrastructure dependencies (hexagonal architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod fixture;
pub mod port;

pub use error::{AppError, Result};
