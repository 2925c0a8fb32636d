//! Ordered pools of free host addresses.
//!
//! A pool is kept as ascending, disjoint, closed intervals so that a large
//! IPv6 block costs the same as a /24. It behaves exactly like a sorted list
//! of addresses: draws always come from the low end.

use super::range::{from_bits, to_bits, AddressRange};
use std::collections::VecDeque;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPool {
    ipv4: bool,
    free: VecDeque<(u128, u128)>,
}

impl AddressPool {
    /// Pool holding every address of `range`.
    pub fn new(range: &AddressRange) -> Self {
        Self {
            ipv4: range.is_ipv4(),
            free: VecDeque::from([(to_bits(range.first()), to_bits(range.last()))]),
        }
    }

    pub fn is_ipv4(&self) -> bool {
        self.ipv4
    }

    /// Number of addresses still available
    pub fn len(&self) -> u128 {
        self.free
            .iter()
            .fold(0u128, |acc, (start, end)| acc.saturating_add(end - start + 1))
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        if addr.is_ipv4() != self.ipv4 {
            return false;
        }
        let bits = to_bits(addr);
        self.free.iter().any(|&(start, end)| start <= bits && bits <= end)
    }

    /// Remove a single address. Returns false if it was not in the pool.
    pub fn remove(&mut self, addr: IpAddr) -> bool {
        self.remove_range(&AddressRange::single(addr)) == 1
    }

    /// Remove every pooled address inside `range`, returning how many were
    /// removed. Addresses that are not pooled are skipped.
    pub fn remove_range(&mut self, range: &AddressRange) -> u128 {
        if range.is_ipv4() != self.ipv4 {
            return 0;
        }
        let lo = to_bits(range.first());
        let hi = to_bits(range.last());

        let mut removed = 0u128;
        let mut kept = VecDeque::with_capacity(self.free.len() + 1);
        for &(start, end) in &self.free {
            if end < lo || start > hi {
                kept.push_back((start, end));
                continue;
            }
            removed += end.min(hi) - start.max(lo) + 1;
            if start < lo {
                kept.push_back((start, lo - 1));
            }
            if end > hi {
                kept.push_back((hi + 1, end));
            }
        }
        self.free = kept;
        removed
    }

    /// Draw the `count` lowest addresses. Leaves the pool untouched and
    /// returns `None` when fewer than `count` remain or `count` is zero.
    pub fn take(&mut self, count: u128) -> Option<AddressBlock> {
        if count == 0 || self.len() < count {
            return None;
        }

        let mut needed = count;
        let mut segments = Vec::new();
        while needed > 0 {
            let (start, end) = self.free.pop_front()?;
            let available = end - start + 1;
            if available > needed {
                segments.push((start, start + needed - 1));
                self.free.push_front((start + needed, end));
                needed = 0;
            } else {
                segments.push((start, end));
                needed -= available;
            }
        }

        Some(AddressBlock {
            ipv4: self.ipv4,
            segments,
        })
    }
}

/// Addresses drawn from a pool in one allocation, ascending.
///
/// Never empty. Holes appear where pre-reserved addresses were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBlock {
    ipv4: bool,
    segments: Vec<(u128, u128)>,
}

impl AddressBlock {
    pub fn first(&self) -> IpAddr {
        from_bits(self.ipv4, self.segments[0].0)
    }

    pub fn last(&self) -> IpAddr {
        from_bits(self.ipv4, self.segments[self.segments.len() - 1].1)
    }

    pub fn len(&self) -> u128 {
        self.segments
            .iter()
            .fold(0u128, |acc, (start, end)| acc.saturating_add(end - start + 1))
    }

    /// The address at position `index` (zero-based) within the block.
    pub fn nth(&self, index: u128) -> Option<IpAddr> {
        let mut offset = index;
        for &(start, end) in &self.segments {
            let size = end - start + 1;
            if offset < size {
                return Some(from_bits(self.ipv4, start + offset));
            }
            offset -= size;
        }
        None
    }

    /// Contiguous runs making up the block
    #[cfg(test)]
    pub fn segments(&self) -> impl Iterator<Item = AddressRange> + '_ {
        self.segments
            .iter()
            .map(move |&(start, end)| AddressRange::from_bits(self.ipv4, start, end))
    }

    pub fn addresses(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.segments.iter().flat_map(move |&(start, end)| {
            (start..=end).map(move |bits| from_bits(self.ipv4, bits))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(network: &str) -> AddressPool {
        AddressPool::new(&AddressRange::hosts_of(&network.parse().unwrap()))
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_host_enumeration_ipv4() {
        let pool = hosts("192.168.123.0/24");
        assert_eq!(pool.len(), 254);
        assert!(!pool.contains(ip("192.168.123.0")));
        assert!(pool.contains(ip("192.168.123.1")));
        assert!(pool.contains(ip("192.168.123.254")));
        assert!(!pool.contains(ip("192.168.123.255")));
    }

    #[test]
    fn test_host_enumeration_small_blocks() {
        assert_eq!(hosts("10.0.0.0/31").len(), 2);
        assert_eq!(hosts("10.0.0.7/32").len(), 1);
        assert_eq!(hosts("10.0.0.0/30").len(), 2);
    }

    #[test]
    fn test_host_enumeration_ipv6_keeps_last() {
        let pool = hosts("fd00::/126");
        assert_eq!(pool.len(), 3);
        assert!(!pool.contains(ip("fd00::")));
        assert!(pool.contains(ip("fd00::3")));

        let large = hosts("fd00::/64");
        assert_eq!(large.len(), (1u128 << 64) - 1);
    }

    #[test]
    fn test_take_is_ascending() {
        let mut pool = hosts("10.0.0.0/29");
        assert_eq!(pool.take(1).unwrap().first(), ip("10.0.0.1"));
        assert_eq!(pool.take(1).unwrap().first(), ip("10.0.0.2"));
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut pool = hosts("10.0.0.0/29");
        assert!(!pool.remove(ip("10.0.0.0")));
        assert!(!pool.remove(ip("10.0.1.1")));
        assert!(!pool.remove(ip("fd00::1")));
        assert_eq!(pool.len(), 6);
        assert!(pool.remove(ip("10.0.0.3")));
        assert!(!pool.remove(ip("10.0.0.3")));
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_remove_range_splits_and_clips() {
        let mut pool = hosts("10.0.0.0/24");
        let removed = pool.remove_range(&"10.0.0.10-10.0.0.19".parse().unwrap());
        assert_eq!(removed, 10);
        let removed = pool.remove_range(&"10.0.0.250-10.0.1.5".parse().unwrap());
        assert_eq!(removed, 5);
        assert_eq!(pool.len(), 254 - 15);
        assert!(pool.contains(ip("10.0.0.9")));
        assert!(!pool.contains(ip("10.0.0.15")));
        assert!(pool.contains(ip("10.0.0.20")));
    }

    #[test]
    fn test_take_skips_holes() {
        let mut pool = hosts("10.0.0.0/24");
        pool.remove(ip("10.0.0.3"));

        let block = pool.take(4).unwrap();
        assert_eq!(block.first(), ip("10.0.0.1"));
        assert_eq!(block.last(), ip("10.0.0.5"));
        assert_eq!(block.len(), 4);
        assert_eq!(block.nth(2), Some(ip("10.0.0.4")));
        assert_eq!(block.nth(4), None);
        assert_eq!(block.segments().count(), 2);

        let addresses: Vec<IpAddr> = block.addresses().collect();
        assert_eq!(
            addresses,
            vec![ip("10.0.0.1"), ip("10.0.0.2"), ip("10.0.0.4"), ip("10.0.0.5")]
        );
        assert_eq!(pool.take(1).unwrap().first(), ip("10.0.0.6"));
    }

    #[test]
    fn test_take_insufficient_leaves_pool_untouched() {
        let mut pool = hosts("10.0.0.0/29");
        let before = pool.clone();
        assert!(pool.take(7).is_none());
        assert!(pool.take(0).is_none());
        assert_eq!(pool, before);
        assert!(pool.take(6).is_some());
        assert!(pool.is_empty());
    }
}
