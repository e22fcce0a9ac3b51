use super::lazy_client::LazyDnsClient;
use seedlist_application::ports::DnsLookup;
use seedlist_application::use_cases::{ResolveSeedlistUseCase, Seedlist};
use seedlist_domain::{
    AdditionalParameters, DnsConfig, DomainError, ResolutionError, ResolvedEndpoint,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

/// Synchronous entry point for callers without an async runtime.
///
/// Owns a private current-thread runtime and blocks on each resolution.
/// Calling any of the `resolve_*` methods from inside a tokio runtime panics;
/// async callers should use [`ResolveSeedlistUseCase`] directly.
pub struct BlockingSeedlistResolver {
    runtime: Runtime,
    use_case: ResolveSeedlistUseCase,
}

impl BlockingSeedlistResolver {
    pub fn new(
        lookup: Arc<dyn DnsLookup>,
        service_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(Self {
            runtime,
            use_case: ResolveSeedlistUseCase::new(lookup, service_name),
        })
    }

    /// Backed by a [`LazyDnsClient`]: no nameserver is contacted, and no
    /// resolver config is read, until the first resolution.
    pub fn from_config(config: &DnsConfig) -> Result<Self, DomainError> {
        let lookup: Arc<dyn DnsLookup> = Arc::new(LazyDnsClient::from_config(config));
        Self::new(lookup, config.service_name.clone())
    }

    pub fn resolve_endpoints(
        &self,
        seed_host: &str,
        timeout: Duration,
    ) -> Result<Vec<ResolvedEndpoint>, ResolutionError> {
        self.runtime
            .block_on(self.use_case.srv().execute(seed_host, timeout))
    }

    pub fn resolve_additional_parameters(
        &self,
        seed_host: &str,
        timeout: Duration,
    ) -> Result<AdditionalParameters, ResolutionError> {
        self.runtime
            .block_on(self.use_case.txt().execute(seed_host, timeout))
    }

    pub fn resolve_seedlist(
        &self,
        seed_host: &str,
        timeout: Duration,
    ) -> Result<Seedlist, ResolutionError> {
        self.runtime
            .block_on(self.use_case.execute(seed_host, timeout))
    }
}
