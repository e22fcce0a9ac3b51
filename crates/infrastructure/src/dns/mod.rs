pub mod blocking;
pub mod client;
pub mod forwarding;
pub mod lazy_client;
pub mod transport;

pub use blocking::BlockingSeedlistResolver;
pub use client::WireDnsClient;
pub use lazy_client::{LazyDnsClient, NameserverSettings};
