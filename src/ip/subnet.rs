//! Subnet pool preparation.
//!
//! Every subnet is turned into a pool of assignable host addresses before any
//! network draws from it: the gateway (given or derived) and all declared
//! reservations are taken out up front.

use super::error::AllocationError;
use super::pool::AddressPool;
use super::range::AddressRange;
use crate::config::SubnetSpec;
use log::{debug, info};
use std::net::IpAddr;

/// A subnet together with its remaining pool
#[derive(Debug, Clone)]
pub struct PreparedSubnet {
    spec: SubnetSpec,
    gateway: IpAddr,
    bounds: AddressRange,
    pool: AddressPool,
}

impl PreparedSubnet {
    pub fn prepare(spec: SubnetSpec) -> Result<Self, AllocationError> {
        let hosts = AddressRange::hosts_of(&spec.range);
        let mut pool = AddressPool::new(&hosts);
        info!("* Subnet {} has {} addresses.", spec.range, pool.len());

        // The host range is never empty, so a derived gateway always exists
        let gateway = spec.gateway.unwrap_or_else(|| hosts.first());
        if !pool.remove(gateway) {
            return Err(AllocationError::GatewayNotInPool {
                subnet: spec.range.to_string(),
                gateway,
            });
        }
        if spec.gateway.is_none() {
            info!("  Gateway calculated to be {}", gateway);
        }

        for reserved in &spec.reserved {
            let removed = pool.remove_range(reserved);
            debug!(
                "  Reserved {} removed {} address(es) from {}",
                reserved, removed, spec.range
            );
        }

        let bounds = AddressRange::of_network(&spec.range);
        Ok(Self {
            spec,
            gateway,
            bounds,
            pool,
        })
    }

    pub fn spec(&self) -> &SubnetSpec {
        &self.spec
    }

    pub fn gateway(&self) -> IpAddr {
        self.gateway
    }

    /// First and last address of the whole CIDR block
    pub fn bounds(&self) -> &AddressRange {
        &self.bounds
    }

    pub fn pool(&self) -> &AddressPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut AddressPool {
        &mut self.pool
    }
}

/// Prepare every subnet, in declaration order.
pub fn prepare_subnets(specs: Vec<SubnetSpec>) -> Result<Vec<PreparedSubnet>, AllocationError> {
    info!("Pre-processing {} subnet(s):", specs.len());
    specs.into_iter().map(PreparedSubnet::prepare).collect()
}
