use super::{ResolveSrvHostsUseCase, ResolveTxtOptionsUseCase};
use crate::ports::DnsLookup;
use seedlist_domain::{AdditionalParameters, ResolutionError, ResolvedEndpoint};
use std::sync::Arc;
use std::time::Duration;

/// Everything DNS contributes to a `+srv` connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seedlist {
    pub hosts: Vec<ResolvedEndpoint>,
    pub options: AdditionalParameters,
}

/// SRV lookup first, then TXT, against the same lookup port. Each query gets
/// its own `timeout`.
pub struct ResolveSeedlistUseCase {
    srv: ResolveSrvHostsUseCase,
    txt: ResolveTxtOptionsUseCase,
}

impl ResolveSeedlistUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>, service_name: impl Into<String>) -> Self {
        Self {
            srv: ResolveSrvHostsUseCase::new(Arc::clone(&lookup)).with_service_name(service_name),
            txt: ResolveTxtOptionsUseCase::new(lookup),
        }
    }

    pub async fn execute(
        &self,
        seed_host: &str,
        timeout: Duration,
    ) -> Result<Seedlist, ResolutionError> {
        let hosts = self.srv.execute(seed_host, timeout).await?;
        let options = self.txt.execute(seed_host, timeout).await?;

        Ok(Seedlist { hosts, options })
    }

    pub fn srv(&self) -> &ResolveSrvHostsUseCase {
        &self.srv
    }

    pub fn txt(&self) -> &ResolveTxtOptionsUseCase {
        &self.txt
    }
}
