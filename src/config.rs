//! Site configuration

/// Settings bound to a site directory
mod site_config;
/// Configuration types and validation
mod types;

pub use site_config::{
    CONFIG_FILE_NAME,
    SiteConfig,
};
pub use types::{
    ConfigError,
    SiteSettings,
    ValidationError,
};
