//! # seedlist
//!
//! Resolves a `mongodb+srv` seed host into its `host:port` list and the
//! connection options published in its TXT record.

mod bootstrap;

use anyhow::Context;
use clap::Parser;
use seedlist_domain::config::dns::parse_lookup_timeout;
use seedlist_domain::{AdditionalParameters, CliOverrides, ResolvedEndpoint};
use seedlist_infrastructure::dns::BlockingSeedlistResolver;
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "seedlist")]
#[command(version)]
#[command(about = "Resolve the seed list of a mongodb+srv host")]
struct Cli {
    /// Seed host, e.g. cluster0.example.com
    seed_host: String,

    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Nameserver IP address or host name (default: first nameserver in resolv.conf)
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Nameserver port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Per-lookup timeout: seconds (`5`), unit suffixed (`250ms`, `1m30s`) or ISO-8601 (`PT5S`)
    #[arg(short = 't', long, value_parser = parse_lookup_timeout)]
    timeout: Option<u64>,

    /// SRV service label
    #[arg(long)]
    service_name: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Print the seed list as JSON
    #[arg(long)]
    json: bool,

    /// Only query SRV records
    #[arg(long, conflicts_with = "options_only")]
    hosts_only: bool,

    /// Only query the TXT record
    #[arg(long)]
    options_only: bool,
}

#[derive(Serialize)]
struct SeedlistOutput<'a> {
    seed_host: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hosts: Option<&'a [ResolvedEndpoint]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a AdditionalParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    option_pairs: Option<Vec<OptionPair<'a>>>,
}

#[derive(Serialize)]
struct OptionPair<'a> {
    key: &'a str,
    value: &'a str,
}

impl<'a> SeedlistOutput<'a> {
    fn new(
        seed_host: &'a str,
        hosts: Option<&'a [ResolvedEndpoint]>,
        options: Option<&'a AdditionalParameters>,
    ) -> Self {
        let option_pairs = options.map(|options| {
            options
                .pairs()
                .map(|(key, value)| OptionPair { key, value })
                .collect()
        });

        Self {
            seed_host,
            hosts,
            options,
            option_pairs,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server: cli.server.clone(),
        port: cli.port,
        lookup_timeout_ms: cli.timeout,
        service_name: cli.service_name.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    let resolver = BlockingSeedlistResolver::from_config(&config.dns)
        .context("Failed to start resolver runtime")?;
    let timeout = config.dns.lookup_timeout();

    let hosts = if cli.options_only {
        None
    } else {
        match resolver.resolve_endpoints(&cli.seed_host, timeout) {
            Ok(hosts) => Some(hosts),
            Err(e) => {
                if e.is_domain_violation() {
                    error!(seed_host = %cli.seed_host, error = %e, "Refusing SRV answer");
                }
                return Err(e)
                    .with_context(|| format!("SRV resolution failed for {}", cli.seed_host));
            }
        }
    };

    let options = if cli.hosts_only {
        None
    } else {
        Some(
            resolver
                .resolve_additional_parameters(&cli.seed_host, timeout)
                .with_context(|| format!("TXT resolution failed for {}", cli.seed_host))?,
        )
    };

    info!(
        seed_host = %cli.seed_host,
        hosts = hosts.as_ref().map_or(0, Vec::len),
        "Seed list resolved"
    );

    if cli.json {
        let output = SeedlistOutput::new(&cli.seed_host, hosts.as_deref(), options.as_ref());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for host in hosts.iter().flatten() {
        println!("{}", host);
    }
    if let Some(options) = options.filter(|o| !o.is_empty()) {
        println!("options: {}", options);
    }

    Ok(())
}
