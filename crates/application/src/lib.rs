//! Seed list application layer: the DNS lookup port and the SRV/TXT
//! resolution use cases built on it.
pub mod ports;
pub mod use_cases;
