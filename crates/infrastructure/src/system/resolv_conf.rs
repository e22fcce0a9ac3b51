use seedlist_domain::DomainError;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, warn};

/// Reads nameserver addresses from a resolver configuration file such as
/// `/etc/resolv.conf`.
pub struct ResolvConfReader {
    path: PathBuf,
}

impl ResolvConfReader {
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Nameservers in file order.
    pub async fn read_nameservers(&self) -> Result<Vec<IpAddr>, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to read resolver config {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let nameservers = parse_nameservers(&content);
        debug!(
            path = %self.path.display(),
            nameservers = nameservers.len(),
            "Resolver config parsed"
        );
        Ok(nameservers)
    }

    pub async fn first_nameserver(&self) -> Result<IpAddr, DomainError> {
        self.read_nameservers()
            .await?
            .into_iter()
            .next()
            .ok_or(DomainError::NoNameservers)
    }
}

/// Extracts `nameserver <address>` entries.
///
/// Format of resolv.conf:
/// # comment
/// nameserver 192.168.1.1
/// nameserver fe80::1%eth0
/// search example.com
pub fn parse_nameservers(content: &str) -> Vec<IpAddr> {
    let mut nameservers = Vec::new();

    for line in content.lines() {
        let mut tokens = line.split_whitespace();

        let Some(keyword) = tokens.next() else {
            continue;
        };
        if keyword.starts_with('#') || keyword.starts_with(';') {
            continue;
        }
        if !keyword.starts_with("nameserver") {
            continue;
        }

        let Some(address) = tokens.next() else {
            warn!(line = line, "nameserver entry without address");
            continue;
        };

        // Drop an IPv6 zone index such as `%eth0`.
        let address = address.split('%').next().unwrap_or(address);

        match IpAddr::from_str(address) {
            Ok(ip) => nameservers.push(ip),
            Err(e) => {
                warn!(error = %e, address = address, "Invalid nameserver address in resolver config");
            }
        }
    }

    nameservers
}
