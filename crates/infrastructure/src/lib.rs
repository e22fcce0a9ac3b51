//! Seed list infrastructure: the DNS wire client behind the lookup port,
//! the lazily created shared client, resolver configuration discovery and a
//! blocking front end for synchronous callers.
pub mod dns;
pub mod system;
