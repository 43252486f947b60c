//! Startup, wiring and shutdown of the application's actors.

pub mod app_system;
pub mod tracing;

pub use app_system::{AppSystem, SystemError};
