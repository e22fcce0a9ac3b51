use crate::ports::DnsLookup;
use seedlist_domain::{AdditionalParameters, DomainError, ResolutionError, SeedHost};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Reads connection string options from the seed host's TXT record.
pub struct ResolveTxtOptionsUseCase {
    lookup: Arc<dyn DnsLookup>,
}

impl ResolveTxtOptionsUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self { lookup }
    }

    /// No record yields empty options. More than one record is ambiguous and
    /// fails regardless of content.
    pub async fn execute(
        &self,
        seed_host: &str,
        timeout: Duration,
    ) -> Result<AdditionalParameters, ResolutionError> {
        let seed = SeedHost::parse(seed_host)?;

        debug!(
            seed_host = %seed,
            timeout_ms = timeout.as_millis() as u64,
            "Resolving TXT records"
        );

        let records = tokio::time::timeout(timeout, self.lookup.query_text_records(seed.as_str()))
            .await
            .map_err(|_| ResolutionError::txt_lookup(seed.as_str(), DomainError::QueryTimeout))?
            .map_err(|e| ResolutionError::txt_lookup(seed.as_str(), e))?;

        select_options(&seed, &records)
    }
}

pub fn select_options(
    seed: &SeedHost,
    records: &[String],
) -> Result<AdditionalParameters, ResolutionError> {
    match records {
        [] => {
            debug!(seed_host = %seed, "No TXT record, no additional options");
            Ok(AdditionalParameters::empty())
        }
        [record] => Ok(AdditionalParameters::from_txt(record)),
        _ => Err(ResolutionError::MultipleTxtRecords(seed.to_string())),
    }
}
