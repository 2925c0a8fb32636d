use crate::ip::AddressRange;
use ipnetwork::IpNetwork;
use serde::Deserialize;
use std::collections::HashSet;
use std::net::IpAddr;

/// Top-level input document: the subnets to carve and the networks to carve them into
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub subnets: Vec<SubnetSpec>,
    pub networks: Vec<NetworkRequest>,
}

/// A subnet every network draws addresses from
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubnetSpec {
    /// CIDR block, e.g. `192.168.123.0/24`
    pub range: IpNetwork,
    /// Availability zones, passed through unchanged
    pub azs: Vec<String>,
    /// DNS servers, passed through unchanged
    pub dns: Vec<String>,
    /// (Optional) Gateway; defaults to the lowest host address
    #[serde(default)]
    pub gateway: Option<IpAddr>,
    /// (Optional) Addresses already in use elsewhere
    #[serde(default)]
    pub reserved: Vec<AddressRange>,
    /// (Optional) IaaS-specific properties, passed through unchanged
    #[serde(default)]
    pub cloud_properties: Option<serde_yaml::Value>,
}

/// A logical network asking for a block of addresses in every subnet
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkRequest {
    pub name: String,
    #[serde(rename = "type", default = "default_network_type")]
    pub network_type: String,
    /// Number of addresses to allocate per subnet
    pub size: u64,
    /// How many of the allocated addresses, from the front, are static
    #[serde(rename = "static")]
    pub static_count: u64,
}

fn default_network_type() -> String {
    "manual".to_string()
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for network in &self.networks {
            if network.name.trim().is_empty() {
                return Err(ValidationError::InvalidNetwork(
                    "network name cannot be empty".to_string(),
                ));
            }
            if network.size == 0 {
                return Err(ValidationError::InvalidNetwork(format!(
                    "network '{}' must request at least one address",
                    network.name
                )));
            }
            if network.static_count > network.size {
                return Err(ValidationError::InvalidNetwork(format!(
                    "network '{}' has static {} larger than size {}",
                    network.name, network.static_count, network.size
                )));
            }
        }

        Ok(())
    }

    /// Network names declared more than once, in first-repeat order
    pub fn duplicate_network_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for network in &self.networks {
            if !seen.insert(network.name.as_str()) && !duplicates.contains(&network.name.as_str()) {
                duplicates.push(network.name.as_str());
            }
        }
        duplicates
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
subnets:
- azs: [z1, z2, z3]
  range: 192.168.123.0/24
  dns: [192.168.5.1]
networks:
- name: jumpbox
  size: 2
  static: 1
- name: vault
  type: dynamic
  size: 4
  static: 3
"#;

    #[test]
    fn test_parse_sample() {
        let config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.subnets.len(), 1);
        let subnet = &config.subnets[0];
        assert_eq!(subnet.range.to_string(), "192.168.123.0/24");
        assert_eq!(subnet.azs, vec!["z1", "z2", "z3"]);
        assert!(subnet.gateway.is_none());
        assert!(subnet.reserved.is_empty());
        assert!(subnet.cloud_properties.is_none());

        assert_eq!(config.networks[0].network_type, "manual");
        assert_eq!(config.networks[1].network_type, "dynamic");
        assert_eq!(config.networks[1].static_count, 3);
    }

    #[test]
    fn test_parse_optional_subnet_fields() {
        let yaml = r#"
subnets:
- azs: [z1]
  range: 10.0.0.0/24
  dns: [10.0.0.2]
  gateway: 10.0.0.254
  reserved: [10.0.0.2, 10.0.0.10-10.0.0.20]
  cloud_properties:
    name: vm-network
networks: []
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let subnet = &config.subnets[0];
        assert_eq!(subnet.gateway, Some("10.0.0.254".parse().unwrap()));
        assert_eq!(subnet.reserved.len(), 2);
        assert!(subnet.reserved[0].is_single());
        assert!(subnet.cloud_properties.is_some());
    }

    #[test]
    fn test_rejects_unknown_and_missing_fields() {
        let unknown = "subnets: []\nnetworks: []\nextra: 1\n";
        assert!(serde_yaml::from_str::<Config>(unknown).is_err());

        let missing_static = r#"
subnets: []
networks:
- name: jumpbox
  size: 2
"#;
        assert!(serde_yaml::from_str::<Config>(missing_static).is_err());
    }

    #[test]
    fn test_rejects_bad_addresses() {
        let bad_range = "subnets:\n- {azs: [z1], dns: [], range: 10.0.0.0/40}\nnetworks: []\n";
        assert!(serde_yaml::from_str::<Config>(bad_range).is_err());

        let bad_reserved = r#"
subnets:
- {azs: [z1], dns: [], range: 10.0.0.0/24, reserved: [10.0.0.x]}
networks: []
"#;
        let err = serde_yaml::from_str::<Config>(bad_reserved).unwrap_err();
        assert!(err.to_string().contains("10.0.0.x"));
    }

    #[test]
    fn test_validation_errors() {
        let mut config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        config.networks[0].static_count = 3;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidNetwork(_))));

        let mut config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        config.networks[1].size = 0;
        config.networks[1].static_count = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidNetwork(_))));

        let mut config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        config.networks[0].name = " ".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidNetwork(_))));
    }

    #[test]
    fn test_accepts_empty_subnets_and_azs() {
        let mut config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        config.subnets[0].azs.clear();
        assert!(config.validate().is_ok());

        config.subnets.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_network_names() {
        let mut config: Config = serde_yaml::from_str(SAMPLE).unwrap();
        assert!(config.duplicate_network_names().is_empty());
        let copy = config.networks[0].clone();
        config.networks.push(copy.clone());
        config.networks.push(copy);
        assert_eq!(config.duplicate_network_names(), vec!["jumpbox"]);
    }
}
