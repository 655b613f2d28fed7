//! # Policy Registry
//!
//! The fixed, process-wide set of top-level ranges reservations must nest
//! inside. Built once at startup from [`AllocatorConfig`], never mutated; a
//! policy change replaces the whole registry.
//!
//! Order matters: the first-fit search walks the ranges in registry order, so
//! the registry is a `Vec`, not a set.
//!
//! [`AllocatorConfig`]: crate::domain::config::AllocatorConfig

use crate::domain::address_space::{AddressSpace, RFC1918};
use crate::domain::config::ConfigError;

/// Immutable ordered list of allowed top-level ranges.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    ranges: Vec<AddressSpace>,
}

impl PolicyRegistry {
    /// Build a registry from an ordered list of top-level ranges.
    ///
    /// ## Errors
    ///
    /// - `EmptyPolicy` if no range is given
    /// - `OverlappingRanges` if any two ranges share an address; overlapping
    ///   top-level ranges would make "nested in exactly one range" ambiguous
    pub fn new(ranges: Vec<AddressSpace>) -> Result<Self, ConfigError> {
        if ranges.is_empty() {
            return Err(ConfigError::EmptyPolicy);
        }
        for (i, a) in ranges.iter().enumerate() {
            for b in ranges.iter().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(ConfigError::OverlappingRanges {
                        first: a.to_string(),
                        second: b.to_string(),
                    });
                }
            }
        }
        Ok(Self { ranges })
    }

    /// The default registry: the three RFC 1918 private ranges, in address
    /// order.
    pub fn rfc1918() -> Self {
        Self {
            ranges: RFC1918.to_vec(),
        }
    }

    /// The range fully containing `space`, if any.
    ///
    /// Because top-level ranges are disjoint, a contained space has exactly
    /// one containing range.
    pub fn range_containing(&self, space: &AddressSpace) -> Option<&AddressSpace> {
        self.ranges.iter().find(|range| range.contains(space))
    }

    /// All ranges, in fixed registry order.
    pub fn ranges(&self) -> &[AddressSpace] {
        &self.ranges
    }

    /// CIDR strings of all ranges, for error diagnostics.
    pub fn allowed_cidrs(&self) -> Vec<String> {
        self.ranges.iter().map(AddressSpace::to_string).collect()
    }
}
