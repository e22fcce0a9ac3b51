use crate::errors::ResolutionError;
use std::fmt;
use std::sync::Arc;

/// Host name a `+srv` connection string points at, e.g. `cluster0.example.com`.
///
/// Must have at least two labels: everything after the first one is the
/// domain that every discovered server has to live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedHost {
    host: Arc<str>,
    domain_parts: DomainParts,
}

impl SeedHost {
    pub fn parse(host: &str) -> Result<Self, ResolutionError> {
        let host = strip_trailing_dot(host);

        let domain = match host.split_once('.') {
            Some((label, domain)) if !label.is_empty() && !domain.is_empty() => domain,
            _ => return Err(ResolutionError::MissingDomain(host.to_string())),
        };

        Ok(Self {
            host: Arc::from(host),
            domain_parts: DomainParts::from_domain(domain),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.host
    }

    pub fn domain_parts(&self) -> &DomainParts {
        &self.domain_parts
    }

    /// `_<service>._tcp.<host>`, the name queried for SRV records.
    pub fn srv_service_name(&self, service: &str) -> String {
        format!("_{}._tcp.{}", service, self.host)
    }
}

impl fmt::Display for SeedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

/// Labels of the seed host's domain, most significant last
/// (`cluster0.example.com` gives `["example", "com"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts(Vec<Arc<str>>);

impl DomainParts {
    pub fn from_domain(domain: &str) -> Self {
        Self(domain.split('.').map(Arc::from).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|l| l.as_ref())
    }

    /// Domain containment check for a host discovered through SRV.
    ///
    /// The resolved host's domain (everything after its first label, or the
    /// whole name when it has a single label) must end with exactly these
    /// labels. A shorter domain can never match.
    pub fn contains(&self, resolved_host: &str) -> bool {
        let resolved_domain = host_domain(resolved_host);
        is_label_suffix(&self.0, resolved_domain)
    }
}

fn is_label_suffix(parts: &[Arc<str>], domain: &str) -> bool {
    let resolved: Vec<&str> = domain.split('.').collect();
    if parts.len() > resolved.len() {
        return false;
    }

    resolved[resolved.len() - parts.len()..]
        .iter()
        .zip(parts)
        .all(|(label, part)| *label == part.as_ref())
}

fn host_domain(host: &str) -> &str {
    host.split_once('.').map_or(host, |(_, domain)| domain)
}

/// Drops one trailing `.` from a fully qualified name.
pub fn strip_trailing_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
