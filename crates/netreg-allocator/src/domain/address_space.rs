//! # AddressSpace Value Type
//!
//! One CIDR block as a packed integer range `[base, base+size)`. All overlap
//! and containment math happens on this type; dotted-quad strings exist only
//! at the edges (parsing in, display out).
//!
//! The type is immutable. "Changing" an address or prefix means constructing
//! a new `AddressSpace`, so a half-updated `(base, size)` pair is
//! unrepresentable.

use crate::domain::errors::AllocationError;
use std::fmt;
use std::net::Ipv4Addr;

/// Total size of the IPv4 space; a /0 covers all of it, hence `u64` sizes.
const V4_SPACE: u64 = 1 << 32;

/// An IPv4 CIDR block in packed form.
///
/// Invariants, enforced at every constructor:
///
/// - `prefixlen <= 32`
/// - `base` is masked to the network address: `base & (size - 1) == 0`
///
/// `size` is derived (`2^(32 - prefixlen)`) and therefore always a power of
/// two; reconstructing the prefix length from a stored `(base, size)` pair is
/// lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressSpace {
    base: u32,
    prefixlen: u8,
}

impl AddressSpace {
    /// Parse a dotted-quad address and prefix length.
    ///
    /// A missing prefix length means a single host (`/32`). Host bits below
    /// the prefix are masked away, so the result is always the canonical
    /// network form.
    ///
    /// ## Errors
    ///
    /// `InvalidAddress` on a malformed dotted-quad or a prefix length
    /// greater than 32.
    pub fn from_cidr(address: &str, prefixlen: Option<u8>) -> Result<Self, AllocationError> {
        let prefixlen = prefixlen.unwrap_or(32);
        if prefixlen > 32 {
            return Err(AllocationError::InvalidAddress {
                input: format!("{address}/{prefixlen}"),
            });
        }
        let addr: Ipv4Addr = address
            .trim()
            .parse()
            .map_err(|_| AllocationError::InvalidAddress {
                input: address.to_string(),
            })?;
        Ok(Self::from_base_unmasked(u32::from(addr), prefixlen))
    }

    /// Reconstruct a block from a persisted `(base, num_addresses)` pair.
    ///
    /// ## Errors
    ///
    /// `InvalidAddress` if `size` is not a power of two in `1..=2^32`, or if
    /// `base` is not masked for the implied prefix length. Stored pairs that
    /// fail here are corrupt, not merely non-canonical.
    pub fn from_parts(base: u32, size: u64) -> Result<Self, AllocationError> {
        if size == 0 || size > V4_SPACE || !size.is_power_of_two() {
            return Err(AllocationError::InvalidAddress {
                input: format!("{} addresses from {}", size, Ipv4Addr::from(base)),
            });
        }
        let prefixlen = (32 - size.trailing_zeros()) as u8;
        let space = Self { base, prefixlen };
        if u64::from(base) & (size - 1) != 0 {
            return Err(AllocationError::InvalidAddress {
                input: format!("{}/{} (unmasked base)", Ipv4Addr::from(base), prefixlen),
            });
        }
        Ok(space)
    }

    /// Build a block from an already-aligned base address.
    ///
    /// Used by the first-fit search, whose candidates are aligned by
    /// construction; an unaligned base is rejected like any other corrupt
    /// pair.
    pub fn from_base(base: u32, prefixlen: u8) -> Result<Self, AllocationError> {
        if prefixlen > 32 {
            return Err(AllocationError::InvalidAddress {
                input: format!("/{prefixlen}"),
            });
        }
        Self::from_parts(base, 1u64 << (32 - prefixlen))
    }

    fn from_base_unmasked(base: u32, prefixlen: u8) -> Self {
        debug_assert!(prefixlen <= 32);
        let size = 1u64 << (32 - prefixlen);
        let masked = (u64::from(base) & !(size - 1)) as u32;
        Self {
            base: masked,
            prefixlen,
        }
    }

    /// The packed network address.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// The prefix length, 0..=32.
    pub fn prefixlen(&self) -> u8 {
        self.prefixlen
    }

    /// Number of addresses covered, `2^(32 - prefixlen)`.
    pub fn size(&self) -> u64 {
        1u64 << (32 - self.prefixlen)
    }

    /// One past the last covered address, as a 64-bit value so a /0 does not
    /// wrap.
    pub fn end(&self) -> u64 {
        u64::from(self.base) + self.size()
    }

    /// True iff the two half-open ranges share at least one address.
    ///
    /// Touching boundaries do not overlap: `[a, b)` and `[b, c)` are
    /// disjoint.
    pub fn overlaps(&self, other: &AddressSpace) -> bool {
        u64::from(self.base) < other.end() && u64::from(other.base) < self.end()
    }

    /// True iff `other` is fully nested inside this block.
    pub fn contains(&self, other: &AddressSpace) -> bool {
        other.base >= self.base && other.end() <= self.end()
    }

    // -------------------------------------------------------------------------
    // Derived views. Pure, no side effects.
    // -------------------------------------------------------------------------

    /// The network address in dotted-quad form.
    pub fn network_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base)
    }

    /// The highest covered address (the broadcast address for prefixes that
    /// have one).
    pub fn broadcast_address(&self) -> Ipv4Addr {
        Ipv4Addr::from((self.end() - 1) as u32)
    }

    /// The netmask in dotted-quad form.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(!((self.size() - 1) as u32))
    }

    /// Number of addresses [`hosts`](Self::hosts) will yield.
    ///
    /// Network and broadcast addresses are excluded for prefixes up to /30;
    /// /31 and /32 blocks have no such reserved addresses and every address
    /// counts.
    pub fn host_count(&self) -> u64 {
        if self.prefixlen >= 31 {
            self.size()
        } else {
            self.size() - 2
        }
    }

    /// Lazy iterator over the usable host addresses of this block.
    pub fn hosts(&self) -> Hosts {
        let (start, end) = if self.prefixlen >= 31 {
            (u64::from(self.base), self.end())
        } else {
            (u64::from(self.base) + 1, self.end() - 1)
        };
        Hosts { next: start, end }
    }

    /// True iff the whole block lies inside one RFC 1918 private range.
    pub fn is_private(&self) -> bool {
        RFC1918.iter().any(|range| range.contains(self))
    }

    /// True iff the whole block lies inside 224.0.0.0/4.
    pub fn is_multicast(&self) -> bool {
        MULTICAST.contains(self)
    }

    /// True iff the whole block lies inside 127.0.0.0/8.
    pub fn is_loopback(&self) -> bool {
        LOOPBACK.contains(self)
    }
}

impl fmt::Display for AddressSpace {
    /// Canonical CIDR form, `address/prefixlen`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_address(), self.prefixlen)
    }
}

const fn well_known(base: u32, prefixlen: u8) -> AddressSpace {
    AddressSpace { base, prefixlen }
}

/// The RFC 1918 private ranges, also the default policy registry contents.
pub const RFC1918: [AddressSpace; 3] = [
    well_known(0x0A00_0000, 8),  // 10.0.0.0/8
    well_known(0xAC10_0000, 12), // 172.16.0.0/12
    well_known(0xC0A8_0000, 16), // 192.168.0.0/16
];

const MULTICAST: AddressSpace = well_known(0xE000_0000, 4); // 224.0.0.0/4
const LOOPBACK: AddressSpace = well_known(0x7F00_0000, 8); // 127.0.0.0/8

/// Iterator over the usable host addresses of an [`AddressSpace`].
///
/// Bounded by 64-bit cursors so a /0 block iterates without overflow; callers
/// are expected to cap how much of it they realize.
#[derive(Debug, Clone)]
pub struct Hosts {
    next: u64,
    end: u64,
}

impl Iterator for Hosts {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Ipv4Addr> {
        if self.next >= self.end {
            return None;
        }
        let addr = Ipv4Addr::from(self.next as u32);
        self.next += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cidr_round_trips_to_canonical_form() {
        let cases = [
            ("192.168.0.0", Some(26), "192.168.0.0/26"),
            ("10.1.2.3", Some(8), "10.0.0.0/8"),
            ("10.0.0.1", None, "10.0.0.1/32"),
            ("172.16.5.200", Some(30), "172.16.5.200/30"),
            ("0.0.0.0", Some(0), "0.0.0.0/0"),
        ];
        for (address, prefixlen, expected) in cases {
            let space = AddressSpace::from_cidr(address, prefixlen).unwrap();
            assert_eq!(space.to_string(), expected);
        }
    }

    #[test]
    fn test_from_cidr_rejects_garbage() {
        for (address, prefixlen) in [
            ("not-an-ip", Some(24)),
            ("10.0.0.256", Some(24)),
            ("10.0.0", Some(24)),
            ("10.0.0.0", Some(33)),
            ("", None),
        ] {
            assert!(
                matches!(
                    AddressSpace::from_cidr(address, prefixlen),
                    Err(AllocationError::InvalidAddress { .. })
                ),
                "should reject {address}/{prefixlen:?}"
            );
        }
    }

    #[test]
    fn test_parts_round_trip_is_lossless() {
        for prefixlen in 0..=32u8 {
            let space = AddressSpace::from_cidr("10.64.0.0", Some(prefixlen)).unwrap();
            let rebuilt = AddressSpace::from_parts(space.base(), space.size()).unwrap();
            assert_eq!(rebuilt.prefixlen(), prefixlen);
            assert_eq!(rebuilt, space);
        }
    }

    #[test]
    fn test_from_parts_rejects_corrupt_pairs() {
        // Not a power of two
        assert!(AddressSpace::from_parts(0, 3).is_err());
        // Zero size
        assert!(AddressSpace::from_parts(0, 0).is_err());
        // Unmasked base for the implied /24
        assert!(AddressSpace::from_parts(0x0A000001, 256).is_err());
    }

    #[test]
    fn test_overlaps_is_symmetric_and_strict() {
        let a = AddressSpace::from_cidr("10.0.0.0", Some(24)).unwrap();
        let b = AddressSpace::from_cidr("10.0.0.128", Some(25)).unwrap();
        let c = AddressSpace::from_cidr("10.0.1.0", Some(24)).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching boundary, no shared address
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_contains_nesting() {
        let outer = AddressSpace::from_cidr("192.168.0.0", Some(16)).unwrap();
        let inner = AddressSpace::from_cidr("192.168.42.0", Some(26)).unwrap();
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn test_derived_views() {
        let space = AddressSpace::from_cidr("192.168.1.0", Some(24)).unwrap();
        assert_eq!(space.network_address().to_string(), "192.168.1.0");
        assert_eq!(space.broadcast_address().to_string(), "192.168.1.255");
        assert_eq!(space.netmask().to_string(), "255.255.255.0");
        assert_eq!(space.size(), 256);
        assert_eq!(space.host_count(), 254);
    }

    #[test]
    fn test_hosts_excludes_network_and_broadcast() {
        let space = AddressSpace::from_cidr("10.0.0.0", Some(29)).unwrap();
        let hosts: Vec<String> = space.hosts().map(|a| a.to_string()).collect();
        assert_eq!(
            hosts,
            ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5", "10.0.0.6"]
        );
    }

    #[test]
    fn test_hosts_degenerate_prefixes() {
        let single = AddressSpace::from_cidr("10.0.0.7", None).unwrap();
        assert_eq!(single.hosts().count(), 1);
        assert_eq!(single.host_count(), 1);

        let pair = AddressSpace::from_cidr("10.0.0.6", Some(31)).unwrap();
        let hosts: Vec<String> = pair.hosts().map(|a| a.to_string()).collect();
        assert_eq!(hosts, ["10.0.0.6", "10.0.0.7"]);
    }

    #[test]
    fn test_classification() {
        let private = AddressSpace::from_cidr("172.20.0.0", Some(16)).unwrap();
        assert!(private.is_private());
        assert!(!private.is_multicast());

        let public = AddressSpace::from_cidr("8.8.8.0", Some(24)).unwrap();
        assert!(!public.is_private());

        // Straddles the 10/8 boundary, so not fully private
        let straddling = AddressSpace::from_cidr("0.0.0.0", Some(1)).unwrap();
        assert!(!straddling.is_private());

        let multicast = AddressSpace::from_cidr("239.0.0.0", Some(8)).unwrap();
        assert!(multicast.is_multicast());

        let loopback = AddressSpace::from_cidr("127.0.0.1", None).unwrap();
        assert!(loopback.is_loopback());
    }

    #[test]
    fn test_full_space_block() {
        let all = AddressSpace::from_cidr("0.0.0.0", Some(0)).unwrap();
        assert_eq!(all.size(), 1u64 << 32);
        assert_eq!(all.end(), 1u64 << 32);
        assert_eq!(all.netmask().to_string(), "0.0.0.0");
        assert_eq!(all.broadcast_address().to_string(), "255.255.255.255");
    }
}
