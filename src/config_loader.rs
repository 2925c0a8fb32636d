use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::path::Path;

/// Load, parse and validate a configuration file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path).wrap_err_with(|| {
        format!(
            "Failed to read configuration file '{}'",
            config_path.display()
        )
    })?;

    parse_config(&content)
        .wrap_err_with(|| format!("Invalid configuration file '{}'", config_path.display()))
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content)?;
    config.validate()?;

    for name in config.duplicate_network_names() {
        warn!("Network '{}' is declared more than once", name);
    }

    info!(
        "Loaded {} subnet(s) and {} network(s)",
        config.subnets.len(),
        config.networks.len()
    );
    Ok(config)
}
