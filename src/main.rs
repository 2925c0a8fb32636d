use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use netgen::orchestrator::generate_to_path;

const SAMPLE: &str = "\
Sample configuration:
    subnets:
    - azs: [z1,z2,z3]
      range: 192.168.123.0/24
      dns: [192.168.5.1]
    networks:
    - name: jumpbox
      size: 2
      static: 1
    - name: vault
      size: 4
      static: 3";

/// Generate explicit BOSH cloud-config network sections.
///
/// Some tooling does not allow lazy IP selection and instead requires fully
/// enumerated networks, including reserved and static address ranges. Every
/// network receives its own block of addresses in every subnet, in the order
/// the networks are declared.
#[derive(Parser, Debug)]
#[command(author, version, about, after_long_help = SAMPLE)]
struct Args {
    /// Configuration file to use
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// Output file; the networks section is written to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr so they never mix with YAML on stdout
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    info!("Configuration file: {:?}", args.config);
    generate_to_path(&args.config, args.output.as_deref())?;

    info!("Network generation completed successfully");
    Ok(())
}
