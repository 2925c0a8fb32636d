//! # Netgen - BOSH cloud-config network generator
//!
//! Some deployment tooling cannot pick IP addresses lazily and instead needs
//! every network spelled out: gateway, reserved ranges and static ranges for
//! each subnet. Netgen expands a compact description of subnets and sized
//! networks into that explicit form.
//!
//! ## Architecture
//!
//! - `config`: typed input document (`subnets` and `networks`)
//! - `config_loader`: reading and validating the input file
//! - `ip`: pool preparation and the allocation engine
//! - `cloud_config`: output document types
//! - `orchestrator`: prepare, allocate, render and write in one pass
//!
//! ## Allocation
//!
//! Each subnet's host addresses form an ascending pool with the gateway and
//! any pre-reserved addresses removed. Networks are processed in declaration
//! order and take `size` addresses from the front of every pool; the first
//! `static` of them are marked static and everything outside the block is
//! reported as reserved.
//!
//! Reserved gaps are computed only from the block's first and last address
//! against the subnet bounds, so a gap may also cover the gateway or
//! pre-reserved addresses.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use netgen::{config_loader, orchestrator};
//! use std::path::Path;
//!
//! let config = config_loader::load_config(Path::new("config.yml"))?;
//! let yaml = orchestrator::render_cloud_config(config)?;
//! print!("{}", yaml);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! subnets:
//! - azs: [z1, z2, z3]
//!   range: 192.168.123.0/24
//!   dns: [192.168.5.1]
//!   reserved: [192.168.123.10]       # optional
//!   gateway: 192.168.123.1           # optional
//! networks:
//! - name: jumpbox
//!   size: 2
//!   static: 1
//! ```
//!
//! ## Error Handling
//!
//! Engine errors are typed (`ip::AllocationError`, `config::ValidationError`);
//! file-level plumbing uses `color_eyre` for context. Any error aborts the
//! whole run before output is written.

pub mod cloud_config;
pub mod config;
pub mod config_loader;
pub mod ip;
pub mod orchestrator;
