//! Network allocation.
//!
//! Networks are processed in declaration order. Each one takes `size`
//! addresses from the front of every subnet pool, so a later network can
//! never receive an address handed to an earlier one.

use super::error::AllocationError;
use super::pool::AddressBlock;
use super::range::{format_range, AddressRange};
use super::subnet::PreparedSubnet;
use crate::cloud_config::{AllocatedSubnet, Network};
use crate::config::NetworkRequest;
use log::{debug, info};

/// Allocate every requested network against the prepared subnets.
pub fn allocate_networks(
    requests: &[NetworkRequest],
    subnets: &mut [PreparedSubnet],
) -> Result<Vec<Network>, AllocationError> {
    info!("Processing networks:");
    requests
        .iter()
        .map(|request| allocate_network(request, subnets))
        .collect()
}

/// Allocate a single network, one block per subnet.
pub fn allocate_network(
    request: &NetworkRequest,
    subnets: &mut [PreparedSubnet],
) -> Result<Network, AllocationError> {
    info!("* Network '{}'", request.name);

    let allocated = subnets
        .iter_mut()
        .map(|subnet| allocate_subnet(request, subnet))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Network {
        name: request.name.clone(),
        subnets: allocated,
        network_type: request.network_type.clone(),
    })
}

fn allocate_subnet(
    request: &NetworkRequest,
    subnet: &mut PreparedSubnet,
) -> Result<AllocatedSubnet, AllocationError> {
    if request.size == 0 {
        return Err(AllocationError::EmptyRequest {
            network: request.name.clone(),
        });
    }
    if request.static_count > request.size {
        return Err(AllocationError::StaticExceedsSize {
            network: request.name.clone(),
            requested: request.static_count,
            size: request.size,
        });
    }

    let remaining = subnet.pool().len();
    let block = subnet
        .pool_mut()
        .take(u128::from(request.size))
        .ok_or_else(|| AllocationError::PoolExhausted {
            network: request.name.clone(),
            subnet: subnet.spec().range.to_string(),
            requested: request.size,
            remaining,
        })?;
    debug!(
        "  {} in {}: {} ({} left)",
        request.name,
        subnet.spec().range,
        AddressRange::new(block.first(), block.last()),
        subnet.pool().len()
    );

    let spec = subnet.spec();
    Ok(AllocatedSubnet {
        azs: spec.azs.clone(),
        cloud_properties: spec.cloud_properties.clone(),
        dns: spec.dns.clone(),
        gateway: subnet.gateway().to_string(),
        range: spec.range.to_string(),
        reserved: gap_ranges(subnet.bounds(), &block)
            .iter()
            .map(|gap| format_range(gap.first(), gap.last()))
            .collect(),
        static_ranges: static_range(&block, request.static_count)
            .iter()
            .map(|fixed| format_range(fixed.first(), fixed.last()))
            .collect(),
    })
}

/// The parts of `bounds` before the block's first address and after its last.
///
/// Interior holes (gateway, pre-reserved addresses) are not subtracted, so a
/// gap may include addresses that are reserved for other reasons.
pub fn gap_ranges(bounds: &AddressRange, block: &AddressBlock) -> Vec<AddressRange> {
    bounds
        .below(block.first())
        .into_iter()
        .chain(bounds.above(block.last()))
        .collect()
}

/// The first `count` addresses of the block as one range, if `count > 0`.
pub fn static_range(block: &AddressBlock, count: u64) -> Option<AddressRange> {
    let last_index = u128::from(count).checked_sub(1)?;
    block
        .nth(last_index)
        .map(|last| AddressRange::new(block.first(), last))
}
