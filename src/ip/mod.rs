//! IP address allocation.
//!
//! Subnets are first prepared into pools of free host addresses, then
//! networks draw blocks from those pools in declaration order.

pub mod allocator;
pub mod error;
pub mod pool;
pub mod range;
pub mod subnet;

// Re-export commonly used types
pub use allocator::{allocate_network, allocate_networks};
pub use error::AllocationError;
pub use pool::{AddressBlock, AddressPool};
pub use range::{format_range, AddressRange, RangeParseError};
pub use subnet::{prepare_subnets, PreparedSubnet};
