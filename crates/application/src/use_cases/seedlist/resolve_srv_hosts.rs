use crate::ports::DnsLookup;
use seedlist_domain::{DomainError, ResolutionError, ResolvedEndpoint, SeedHost, SrvRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_SERVICE_NAME: &str = "mongodb";

/// Turns a seed host into the `host:port` list published under
/// `_mongodb._tcp.<seed host>`.
pub struct ResolveSrvHostsUseCase {
    lookup: Arc<dyn DnsLookup>,
    service_name: String,
}

impl ResolveSrvHostsUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self {
            lookup,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }

    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Queries SRV records and validates every target against the seed
    /// host's domain. One foreign target fails the whole call.
    ///
    /// The query is abandoned once `timeout` elapses; that surfaces as
    /// [`ResolutionError::Lookup`] like any other transport failure.
    pub async fn execute(
        &self,
        seed_host: &str,
        timeout: Duration,
    ) -> Result<Vec<ResolvedEndpoint>, ResolutionError> {
        let seed = SeedHost::parse(seed_host)?;
        let service_name = seed.srv_service_name(&self.service_name);

        debug!(
            seed_host = %seed,
            service_name = %service_name,
            timeout_ms = timeout.as_millis() as u64,
            "Resolving SRV records"
        );

        let records = tokio::time::timeout(timeout, self.lookup.query_service_records(&service_name))
            .await
            .map_err(|_| ResolutionError::srv_lookup(seed.as_str(), DomainError::QueryTimeout))?
            .map_err(|e| ResolutionError::srv_lookup(seed.as_str(), e))?;

        let endpoints = collect_endpoints(&seed, &service_name, &records)?;

        debug!(
            seed_host = %seed,
            hosts = endpoints.len(),
            "SRV resolution complete"
        );

        Ok(endpoints)
    }
}

/// Validates SRV answers in order. Returns every endpoint or none.
pub fn collect_endpoints(
    seed: &SeedHost,
    service_name: &str,
    records: &[SrvRecord],
) -> Result<Vec<ResolvedEndpoint>, ResolutionError> {
    if records.is_empty() {
        return Err(ResolutionError::NoSrvRecords {
            service_name: service_name.to_string(),
        });
    }

    let mut endpoints = Vec::with_capacity(records.len());

    for record in records {
        let host = record.normalized_target();

        if !seed.domain_parts().contains(host) {
            warn!(
                seed_host = %seed,
                resolved_host = %host,
                "SRV target outside the seed host's domain, rejecting answer"
            );
            return Err(ResolutionError::NotInSeedDomain {
                seed_host: seed.to_string(),
                resolved_host: host.to_string(),
            });
        }

        debug!(host = %host, port = record.port, "SRV target accepted");
        endpoints.push(ResolvedEndpoint::new(host, record.port));
    }

    if endpoints.is_empty() {
        return Err(ResolutionError::NoHosts(seed.to_string()));
    }

    Ok(endpoints)
}
