//! # Allocation Algorithms
//!
//! The pure core of the subsystem: gap search over sorted reservations and
//! conflict collection. Everything here works on in-memory slices; the
//! service layer is responsible for fetching consistent snapshots from the
//! store and for holding the allocation lock while it acts on the results.
//!
//! The search is greedy first-fit: ranges are scanned in registry order,
//! reservations within a range in ascending base order, and the first
//! sufficiently large gap wins. There is no defragmentation and no best-fit
//! scoring; the lowest workable address is always preferred.

use crate::domain::address_space::AddressSpace;
use crate::domain::entities::Reservation;

/// Round `value` up to the next multiple of `alignment` (a power of two).
fn align_up(value: u64, alignment: u64) -> u64 {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// Find the lowest free, aligned base for a block of `needed` addresses
/// inside `range`.
///
/// `occupied` must hold every reservation overlapping `range`, sorted
/// ascending by base — exactly what
/// [`ReservationStore::all_overlapping`](crate::ports::outbound::ReservationStore::all_overlapping)
/// returns. An empty slice yields the range's own base address.
///
/// The cursor starts at the range base, so leading free space before the
/// first reservation is found like any other gap. Candidates are rounded up
/// to the requested block's natural boundary; a gap only counts if the
/// aligned candidate still fits in front of the next reservation.
pub fn first_gap(range: &AddressSpace, occupied: &[Reservation], needed: u64) -> Option<u32> {
    let end = range.end();
    let mut cursor = u64::from(range.base());

    for reservation in occupied {
        let start = u64::from(reservation.space.base());
        if start > cursor {
            let candidate = align_up(cursor, needed);
            if candidate + needed <= start {
                return Some(candidate as u32);
            }
        }
        cursor = cursor.max(reservation.space.end());
    }

    let candidate = align_up(cursor, needed);
    if candidate + needed <= end {
        return Some(candidate as u32);
    }
    None
}

/// The CIDR strings of every reservation in `overlapping` other than
/// `exclude`, preserving the slice's (ascending base) order.
///
/// `exclude` carries a reservation's previous space during an update: a
/// block never conflicts with itself.
pub fn conflict_cidrs(overlapping: &[Reservation], exclude: Option<&AddressSpace>) -> Vec<String> {
    overlapping
        .iter()
        .filter(|reservation| exclude != Some(&reservation.space))
        .map(|reservation| reservation.space.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::OwnerId;

    fn space(cidr: &str) -> AddressSpace {
        let (address, prefixlen) = cidr.split_once('/').unwrap();
        AddressSpace::from_cidr(address, Some(prefixlen.parse().unwrap())).unwrap()
    }

    fn reservations(cidrs: &[&str]) -> Vec<Reservation> {
        let owner = OwnerId::generate();
        cidrs
            .iter()
            .map(|cidr| Reservation::new(owner, space(cidr)))
            .collect()
    }

    #[test]
    fn test_empty_range_grants_its_base() {
        let range = space("10.0.0.0/8");
        assert_eq!(first_gap(&range, &[], 1), Some(0x0A00_0000));
        assert_eq!(first_gap(&range, &[], 1 << 24), Some(0x0A00_0000));
    }

    #[test]
    fn test_gap_after_leading_reservation() {
        let range = space("10.0.0.0/8");
        let occupied = reservations(&["10.0.0.0/30"]);
        // 10.0.0.0..10.0.0.4 taken; next /32 is 10.0.0.4
        assert_eq!(first_gap(&range, &occupied, 1), Some(0x0A00_0004));
    }

    #[test]
    fn test_leading_free_space_is_found() {
        let range = space("10.0.0.0/8");
        let occupied = reservations(&["10.0.1.0/24"]);
        // The hole before the first reservation wins over the space after it
        assert_eq!(first_gap(&range, &occupied, 256), Some(0x0A00_0000));
    }

    #[test]
    fn test_gap_between_reservations() {
        let range = space("10.0.0.0/8");
        let occupied = reservations(&["10.0.0.0/24", "10.0.2.0/24"]);
        // Exactly one /24 fits between them
        assert_eq!(first_gap(&range, &occupied, 256), Some(0x0A00_0100));
    }

    #[test]
    fn test_too_small_gaps_are_skipped() {
        let range = space("10.0.0.0/8");
        let occupied = reservations(&["10.0.0.0/25", "10.0.0.128/25", "10.0.2.0/24"]);
        // 10.0.0.0/24 fully covered by the two /25s; 10.0.1.0/24 is free
        assert_eq!(first_gap(&range, &occupied, 256), Some(0x0A00_0100));
    }

    #[test]
    fn test_full_range_yields_nothing() {
        let range = space("192.168.0.0/16");
        let occupied = reservations(&["192.168.0.0/16"]);
        assert_eq!(first_gap(&range, &occupied, 1), None);
    }

    #[test]
    fn test_candidate_is_rounded_up_to_prefix_boundary() {
        // The gap starts at 10.0.0.8, but a /28 block must sit on a
        // 16-address boundary; granting 10.0.0.8/28 would not be a valid
        // masked network. The search rounds up to 10.0.0.16.
        let range = space("10.0.0.0/8");
        let occupied = reservations(&["10.0.0.0/29"]);
        assert_eq!(first_gap(&range, &occupied, 16), Some(0x0A00_0010));
    }

    #[test]
    fn test_alignment_can_exhaust_a_tight_gap() {
        // [10.0.0.8, 10.0.0.24) is 16 addresses, but no aligned /28 fits
        // inside it; the search must move past the gap rather than grant an
        // unmasked base.
        let range = space("10.0.0.0/8");
        let occupied = reservations(&["10.0.0.0/29", "10.0.0.24/29", "10.0.0.32/27"]);
        assert_eq!(first_gap(&range, &occupied, 16), Some(0x0A00_0040));
    }

    #[test]
    fn test_trailing_gap_at_range_end() {
        let range = space("192.168.0.0/16");
        let occupied = reservations(&["192.168.0.0/17"]);
        assert_eq!(first_gap(&range, &occupied, 1 << 15), Some(0xC0A8_8000));
        // But a /16-sized request no longer fits
        assert_eq!(first_gap(&range, &occupied, 1 << 16), None);
    }

    #[test]
    fn test_conflict_cidrs_preserve_order_and_exclude_self() {
        let occupied = reservations(&["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26"]);
        assert_eq!(
            conflict_cidrs(&occupied, None),
            ["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26"]
        );

        let own = space("10.0.0.64/26");
        assert_eq!(
            conflict_cidrs(&occupied, Some(&own)),
            ["10.0.0.0/26", "10.0.0.128/26"]
        );
    }
}
