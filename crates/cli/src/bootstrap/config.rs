use pbdns_exporter_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        ingest_address = %config.server.ingest_address,
        web_address = %config.server.web_address,
        metrics_path = %config.server.metrics_path,
        prefix_width = u8::from(config.handoff.prefix_width),
        "Configuration loaded"
    );

    Ok(config)
}
