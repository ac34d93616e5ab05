//! Configuration types for Waypost.

pub mod config;
pub mod error;
pub mod sidebar;

pub use config::Config;
pub use error::ConfigError;
pub use sidebar::SidebarOptions;
