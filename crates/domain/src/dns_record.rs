use crate::seed_host::strip_trailing_dot;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// One SRV answer. Priority and weight are carried along but play no part
/// in seed list resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvRecord {
    pub target: Arc<str>,
    pub port: u16,
    pub priority: u16,
    pub weight: u16,
}

impl SrvRecord {
    pub fn new(target: impl Into<Arc<str>>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
            priority: 0,
            weight: 0,
        }
    }

    pub fn with_priority(mut self, priority: u16, weight: u16) -> Self {
        self.priority = priority;
        self.weight = weight;
        self
    }

    /// Target without the trailing root dot.
    pub fn normalized_target(&self) -> &str {
        strip_trailing_dot(&self.target)
    }
}

/// A validated `host:port` produced from an SRV answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedEndpoint {
    pub host: Arc<str>,
    pub port: u16,
}

impl ResolvedEndpoint {
    pub fn new(host: impl Into<Arc<str>>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Connection string options published in the seed host's TXT record,
/// e.g. `authSource=admin&replicaSet=rs0`. Empty when there is no record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdditionalParameters(String);

impl AdditionalParameters {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the options from a raw TXT payload. Resolvers join the
    /// character-strings of a record with spaces; that whitespace is not part
    /// of the options and is dropped here.
    pub fn from_txt(raw: &str) -> Self {
        Self(strip_whitespace(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits into `(key, value)` pairs; a pair without `=` gets an empty value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
    }
}

impl fmt::Display for AdditionalParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_target_with_and_without_root_dot() {
        let fqdn = SrvRecord::new("host.example.com.", 27017);
        let bare = SrvRecord::new("host.example.com", 27017);
        assert_eq!(fqdn.normalized_target(), bare.normalized_target());
    }

    #[test]
    fn test_endpoint_display() {
        let ep = ResolvedEndpoint::new("host1.example.com", 27017);
        assert_eq!(ep.to_string(), "host1.example.com:27017");
    }

    #[test]
    fn test_strip_whitespace_all_kinds() {
        assert_eq!(
            strip_whitespace(" authSource=admin  &replicaSet=rs0\t\n"),
            "authSource=admin&replicaSet=rs0"
        );
    }

    #[test]
    fn test_strip_whitespace_idempotent() {
        let once = strip_whitespace("a = b & c = d");
        assert_eq!(strip_whitespace(&once), once);
    }

    #[test]
    fn test_additional_parameters_pairs() {
        let params = AdditionalParameters::from_txt("authSource=admin&replicaSet=rs0&flag");
        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(
            pairs,
            vec![("authSource", "admin"), ("replicaSet", "rs0"), ("flag", "")]
        );
    }

    #[test]
    fn test_empty_parameters() {
        let params = AdditionalParameters::empty();
        assert!(params.is_empty());
        assert_eq!(params.pairs().count(), 0);
        assert_eq!(params.to_string(), "");
    }
}
