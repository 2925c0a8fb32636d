//! Errors raised while preparing pools and allocating networks.

use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("Gateway {gateway} is not a host address of subnet {subnet}")]
    GatewayNotInPool { subnet: String, gateway: IpAddr },

    #[error("Network '{network}' requests no addresses")]
    EmptyRequest { network: String },

    #[error("Network '{network}' asks for {requested} static addresses but only {size} in total")]
    StaticExceedsSize {
        network: String,
        requested: u64,
        size: u64,
    },

    #[error(
        "Subnet {subnet} is exhausted: network '{network}' requested {requested} addresses, {remaining} remaining"
    )]
    PoolExhausted {
        network: String,
        subnet: String,
        requested: u64,
        remaining: u128,
    },
}
