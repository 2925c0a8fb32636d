//! BOSH cloud-config output types.
//!
//! Field declaration order is the order keys are rendered in. Addresses and
//! ranges are held as plain strings so the YAML carries no type tags.

use serde::Serialize;

/// The `networks:` section of a cloud-config document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudConfig {
    pub networks: Vec<Network>,
}

impl CloudConfig {
    /// Render as a YAML document
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// A fully-enumerated network with one entry per subnet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Network {
    pub name: String,
    pub subnets: Vec<AllocatedSubnet>,
    #[serde(rename = "type")]
    pub network_type: String,
}

/// One subnet's share of a network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocatedSubnet {
    pub azs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_properties: Option<serde_yaml::Value>,
    pub dns: Vec<String>,
    pub gateway: String,
    pub range: String,
    /// Everything in the subnet outside this network's block
    pub reserved: Vec<String>,
    /// At most one range: the static prefix of the block
    #[serde(rename = "static")]
    pub static_ranges: Vec<String>,
}
