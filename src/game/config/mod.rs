//! Config Module
//!
//! Centralized configuration for an exploration session.

pub mod session_config;

pub use session_config::{ConfigError, PortalConfig, SessionConfig};
