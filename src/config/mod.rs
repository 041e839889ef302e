//! Configuration module

mod site;

pub use site::ApiConfig;
pub use site::ConfigError;
pub use site::SiteConfig;
pub use site::ACCESS_TOKEN_ENV;
