use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// DNS lookup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upper bound for a single SRV or TXT lookup, in milliseconds
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Nameserver to query: an IP address, `ip:port`, or a host name resolved
    /// once when the client is created. When unset, the first `nameserver`
    /// entry of `resolv_conf` is used.
    #[serde(default)]
    pub server: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Resolver configuration file consulted when `server` is unset
    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,

    /// Service label of the SRV query (`_<service>._tcp.<seed host>`)
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: default_lookup_timeout_ms(),
            server: None,
            port: default_port(),
            resolv_conf: default_resolv_conf(),
            service_name: default_service_name(),
        }
    }
}

impl DnsConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "dns.lookup_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ConfigError::Validation(
                "dns.port must be greater than zero".to_string(),
            ));
        }
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "dns.service_name cannot be empty".to_string(),
            ));
        }
        if let Some(server) = &self.server {
            if server.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "dns.server cannot be empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Parses a lookup timeout given as a duration and returns milliseconds.
///
/// Accepted forms:
/// - bare number of seconds: `5`
/// - amounts with `ms`, `s`, `m` or `h` units, combinable: `250ms`, `1.5s`, `1m30s`
/// - ISO-8601 durations: `PT5S`, `PT1M30S`, `P1DT2H`
pub fn parse_lookup_timeout(value: &str) -> Result<u64, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::Validation(format!("Invalid lookup timeout '{}'", value));

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<u64>()
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .ok_or_else(invalid);
    }

    if let Some(ms) = value.strip_suffix("ms") {
        if !ms.is_empty() && ms.bytes().all(|b| b.is_ascii_digit()) {
            return ms.parse().map_err(|_| invalid());
        }
    }

    let total = match value.strip_prefix(&['P', 'p'][..]) {
        Some(iso) => parse_iso8601(iso),
        None => sum_components(value, suffix_unit_ms),
    };

    total
        .filter(|ms| ms.is_finite() && *ms <= u64::MAX as f64)
        .map(|ms| ms.round() as u64)
        .ok_or_else(invalid)
}

fn suffix_unit_ms(unit: char) -> Option<f64> {
    match unit.to_ascii_lowercase() {
        'h' => Some(3_600_000.0),
        'm' => Some(60_000.0),
        's' => Some(1_000.0),
        _ => None,
    }
}

/// `[nD][T[nH][nM][nS]]`, the part after the leading `P`.
fn parse_iso8601(iso: &str) -> Option<f64> {
    let (date, time) = match iso.find(|c| c == 'T' || c == 't') {
        Some(idx) => (&iso[..idx], Some(&iso[idx + 1..])),
        None => (iso, None),
    };

    let days = if date.is_empty() {
        0.0
    } else {
        sum_components(date, |unit| {
            (unit.to_ascii_uppercase() == 'D').then_some(86_400_000.0)
        })?
    };

    let time = match time {
        Some(time) => sum_components(time, |unit| match unit.to_ascii_uppercase() {
            'H' => Some(3_600_000.0),
            'M' => Some(60_000.0),
            'S' => Some(1_000.0),
            _ => None,
        })?,
        None if date.is_empty() => return None,
        None => 0.0,
    };

    Some(days + time)
}

/// Sums `<number><unit>` pairs. Fails on an empty input, a missing number or
/// an unknown unit.
fn sum_components(text: &str, unit_ms: impl Fn(char) -> Option<f64>) -> Option<f64> {
    let mut total = 0.0;
    let mut number = String::new();
    let mut components = 0;

    for c in text.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        let amount: f64 = number.parse().ok()?;
        total += amount * unit_ms(c)?;
        number.clear();
        components += 1;
    }

    (number.is_empty() && components > 0).then_some(total)
}

fn default_lookup_timeout_ms() -> u64 {
    5000
}

fn default_port() -> u16 {
    53
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}

fn default_service_name() -> String {
    "mongodb".to_string()
}
