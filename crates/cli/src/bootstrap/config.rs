use seedlist_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        server = config.dns.server.as_deref().unwrap_or("resolv.conf"),
        port = config.dns.port,
        lookup_timeout_ms = config.dns.lookup_timeout_ms,
        service_name = %config.dns.service_name,
        "Configuration loaded"
    );
}
