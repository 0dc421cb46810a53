//! Lifecycle host for the bakery engine.
//!
//! Binds the engine to a mod directory: reads settings and configs through
//! `bakery-content`, drives `bakery-core` on setup, language change and
//! deactivation, and sets up logging for the process.

pub mod config;
pub mod host;
pub mod logging;

pub use config::HostConfig;
pub use host::{DeactivateReport, HostError, ModHost, SetupReport};
pub use logging::LogGuard;
