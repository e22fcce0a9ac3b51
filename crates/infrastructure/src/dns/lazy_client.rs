use super::client::WireDnsClient;
use crate::system::ResolvConfReader;
use async_trait::async_trait;
use seedlist_application::ports::DnsLookup;
use seedlist_domain::{DnsConfig, DomainError, SrvRecord};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::lookup_host;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Where the shared client sends its queries.
#[derive(Debug, Clone)]
pub struct NameserverSettings {
    /// Explicit nameserver; takes priority over `resolv_conf`
    pub server: Option<String>,
    pub port: u16,
    pub resolv_conf: PathBuf,
    /// Socket-level timeout for each UDP/TCP exchange
    pub io_timeout: Duration,
}

impl NameserverSettings {
    pub fn from_config(config: &DnsConfig) -> Self {
        Self {
            server: config.server.clone(),
            port: config.port,
            resolv_conf: PathBuf::from(&config.resolv_conf),
            io_timeout: config.lookup_timeout(),
        }
    }

    /// Explicit server if configured, otherwise the first nameserver of the
    /// resolver config file. `port` applies to both.
    pub async fn resolve_address(&self) -> Result<SocketAddr, DomainError> {
        if let Some(server) = &self.server {
            return resolve_server(server, self.port).await;
        }

        let ip = ResolvConfReader::with_path(&self.resolv_conf)
            .first_nameserver()
            .await?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for NameserverSettings {
    fn default() -> Self {
        Self::from_config(&DnsConfig::default())
    }
}

/// Accepts a bare IP (`10.0.0.2`, `::1`) or a socket address (`10.0.0.2:5353`,
/// `[::1]:5353`); a bare IP gets `default_port`.
fn parse_server(server: &str, default_port: u16) -> Option<SocketAddr> {
    if let Ok(addr) = SocketAddr::from_str(server) {
        return Some(addr);
    }

    IpAddr::from_str(server)
        .ok()
        .map(|ip| SocketAddr::new(ip, default_port))
}

/// Like [`parse_server`], plus host names (`dns.internal`, `dns.internal:5353`)
/// resolved through the system resolver. The first address returned wins.
async fn resolve_server(server: &str, default_port: u16) -> Result<SocketAddr, DomainError> {
    let server = server.trim();
    let invalid =
        |reason: String| DomainError::InvalidServerAddress(format!("{}: {}", server, reason));

    if let Some(addr) = parse_server(server, default_port) {
        return Ok(addr);
    }

    if server.is_empty() || server.chars().any(char::is_whitespace) {
        return Err(invalid("not an address or host name".to_string()));
    }

    let (host, port) = match server.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => (
            host,
            port.parse::<u16>()
                .map_err(|_| invalid(format!("invalid port '{}'", port)))?,
        ),
        _ => (server, default_port),
    };

    let addr = lookup_host((host, port))
        .await
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("host name has no addresses".to_string()))?;

    debug!(server = %server, resolved = %addr, "Nameserver host name resolved");
    Ok(addr)
}

/// Shared DNS client created on first use.
///
/// The first query resolves the nameserver and builds the [`WireDnsClient`];
/// concurrent first queries wait on the same initialization and every later
/// query reuses the instance. A failed initialization is reported to the
/// caller that triggered it and attempted again on the next query.
pub struct LazyDnsClient {
    settings: NameserverSettings,
    client: OnceCell<Arc<WireDnsClient>>,
}

impl LazyDnsClient {
    pub fn new(settings: NameserverSettings) -> Self {
        Self {
            settings,
            client: OnceCell::new(),
        }
    }

    pub fn from_config(config: &DnsConfig) -> Self {
        Self::new(NameserverSettings::from_config(config))
    }

    pub async fn client(&self) -> Result<Arc<WireDnsClient>, DomainError> {
        self.client
            .get_or_try_init(|| async {
                let server = self.settings.resolve_address().await?;
                info!(
                    server = %server,
                    explicit = self.settings.server.is_some(),
                    "DNS client initialized"
                );
                Ok(Arc::new(WireDnsClient::new(server, self.settings.io_timeout)))
            })
            .await
            .map(Arc::clone)
    }

    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }
}

#[async_trait]
impl DnsLookup for LazyDnsClient {
    async fn query_service_records(&self, name: &str) -> Result<Vec<SrvRecord>, DomainError> {
        self.client().await?.query_service_records(name).await
    }

    async fn query_text_records(&self, name: &str) -> Result<Vec<String>, DomainError> {
        self.client().await?.query_text_records(name).await
    }
}
