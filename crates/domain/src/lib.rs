//! Seed list domain layer: `+srv` seed hosts, SRV/TXT records and the rules
//! that turn them into endpoints and connection options.
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod seed_host;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig, LoggingConfig};
pub use dns_record::{strip_whitespace, AdditionalParameters, ResolvedEndpoint, SrvRecord};
pub use errors::{DomainError, ResolutionError};
pub use seed_host::{strip_trailing_dot, DomainParts, SeedHost};
