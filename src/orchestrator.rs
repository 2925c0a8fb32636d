//! End-to-end generation: prepare pools, allocate networks, render, write.
//!
//! The whole document is rendered before anything is written, so a failing
//! run never leaves partial output behind.

use crate::cloud_config::CloudConfig;
use crate::config::Config;
use crate::config_loader;
use crate::ip::{allocate_networks, prepare_subnets, AllocationError};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use std::io::Write;
use std::path::Path;

/// Run the allocation engine over a loaded configuration.
pub fn generate_cloud_config(config: Config) -> Result<CloudConfig, AllocationError> {
    let Config { subnets, networks } = config;

    let mut prepared = prepare_subnets(subnets)?;
    let networks = allocate_networks(&networks, &mut prepared)?;

    for subnet in &prepared {
        debug!(
            "Subnet {} has {} unallocated address(es)",
            subnet.spec().range,
            subnet.pool().len()
        );
    }
    Ok(CloudConfig { networks })
}

/// Generate the cloud-config YAML for a configuration
pub fn render_cloud_config(config: Config) -> Result<String> {
    let cloud_config = generate_cloud_config(config)?;
    cloud_config
        .to_yaml()
        .wrap_err("Failed to serialize cloud-config networks")
}

/// Load `config_path` and write the generated document to `output_path`,
/// or to stdout when no path is given.
pub fn generate_to_path(config_path: &Path, output_path: Option<&Path>) -> Result<()> {
    let config = config_loader::load_config(config_path)?;
    let rendered = render_cloud_config(config)?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &rendered)
                .wrap_err_with(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Wrote cloud-config networks to: {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .wrap_err("Failed to write to stdout")?;
            stdout.flush().wrap_err("Failed to flush stdout")?;
        }
    }
    Ok(())
}
