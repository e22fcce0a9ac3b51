//! Configuration module for the seed list resolver
//!
//! - `root`: Main configuration, environment and CLI overrides
//! - `dns`: Lookup timeout, nameserver selection, SRV service name
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
