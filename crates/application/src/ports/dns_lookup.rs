use async_trait::async_trait;
use seedlist_domain::{DomainError, SrvRecord};

/// The two DNS queries seed list resolution needs.
///
/// Implementations return answers in the order the nameserver sent them and
/// report "name exists but has no such records" as an empty list, not an
/// error. Neither call applies a deadline of its own; callers bound them.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn query_service_records(&self, name: &str) -> Result<Vec<SrvRecord>, DomainError>;

    /// One string per TXT record, its character-strings joined by a space.
    async fn query_text_records(&self, name: &str) -> Result<Vec<String>, DomainError>;
}
