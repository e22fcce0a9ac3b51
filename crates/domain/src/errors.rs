use thiserror::Error;

/// Failures raised below the resolution workflow: building queries, talking to
/// the nameserver, decoding its answer, locating a nameserver at all.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Nameserver answered {rcode}")]
    UpstreamFailure { rcode: String },

    #[error("No nameserver configured")]
    NoNameservers,

    #[error("Invalid nameserver address: {0}")]
    InvalidServerAddress(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

/// The one error kind handed back to callers of the seed list resolvers.
///
/// Validation failures carry their own variant; anything that went wrong in
/// the lookup itself (timeouts included) arrives as [`ResolutionError::Lookup`]
/// with the underlying [`DomainError`] as its source.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Seed host '{0}' has no domain part")]
    MissingDomain(String),

    #[error("No SRV records available for host {service_name}")]
    NoSrvRecords { service_name: String },

    #[error(
        "The SRV host name '{seed_host}' resolved to a host '{resolved_host}' that is not in a sub-domain of the SRV host"
    )]
    NotInSeedDomain {
        seed_host: String,
        resolved_host: String,
    },

    #[error("Unable to find any SRV records for host {0}")]
    NoHosts(String),

    #[error("Multiple TXT records found for host '{0}'. Only one is permitted")]
    MultipleTxtRecords(String),

    #[error("Unable to look up {record_type} record for host {host}")]
    Lookup {
        record_type: &'static str,
        host: String,
        #[source]
        source: DomainError,
    },
}

impl ResolutionError {
    pub fn srv_lookup(host: &str, source: DomainError) -> Self {
        Self::Lookup {
            record_type: "SRV",
            host: host.to_string(),
            source,
        }
    }

    pub fn txt_lookup(host: &str, source: DomainError) -> Self {
        Self::Lookup {
            record_type: "TXT",
            host: host.to_string(),
            source,
        }
    }

    /// True for the containment violation, the only failure that signals a
    /// possibly hostile DNS answer rather than a broken or empty one.
    pub fn is_domain_violation(&self) -> bool {
        matches!(self, Self::NotInSeedDomain { .. })
    }
}
