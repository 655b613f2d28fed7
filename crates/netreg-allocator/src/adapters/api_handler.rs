//! # API View Builders
//!
//! Serializable projections of reservations for request layers. Two shapes:
//! a detail view with derived address facts and (capped) host listings, and a
//! compact summary for listings.
//!
//! The allocator returns these instead of raw entities so transports never
//! reach into domain types, and so the serialized contract is pinned by tests
//! here rather than rediscovered per transport.

use crate::domain::config::AllocatorConfig;
use crate::domain::entities::Reservation;
use serde::{Deserialize, Serialize};

/// Full view of one reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDetailView {
    /// Canonical CIDR form, e.g. `192.168.0.0/26`.
    pub network: String,
    /// Owner identifier, opaque to this subsystem.
    pub owner: String,
    /// Network address in dotted-quad form.
    pub address: String,
    /// Prefix length.
    pub prefixlen: u8,
    /// Netmask in dotted-quad form.
    pub netmask: String,
    /// Usable host addresses, realized from the lazy iterator up to the
    /// configured cap.
    pub hosts: Vec<String>,
    /// Broadcast (highest) address of the block.
    pub broadcast: String,
    /// Whether the block lies fully inside RFC 1918 space.
    pub is_private: bool,
}

impl NetworkDetailView {
    /// Build the detail view, realizing at most `config.max_view_hosts`
    /// host addresses.
    pub fn from_reservation(reservation: &Reservation, config: &AllocatorConfig) -> Self {
        let space = &reservation.space;
        Self {
            network: space.to_string(),
            owner: reservation.owner.to_string(),
            address: space.network_address().to_string(),
            prefixlen: space.prefixlen(),
            netmask: space.netmask().to_string(),
            hosts: space
                .hosts()
                .take(config.max_view_hosts)
                .map(|addr| addr.to_string())
                .collect(),
            broadcast: space.broadcast_address().to_string(),
            is_private: space.is_private(),
        }
    }
}

/// Compact view of one reservation, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummaryView {
    /// Canonical CIDR form.
    pub network: String,
    /// Owner identifier.
    pub owner: String,
    /// Relative resource path a request layer can re-anchor.
    pub url: String,
}

impl NetworkSummaryView {
    /// Build the compact view.
    pub fn from_reservation(reservation: &Reservation) -> Self {
        let space = &reservation.space;
        Self {
            network: space.to_string(),
            owner: reservation.owner.to_string(),
            url: format!("/networks/{}/{}", space.network_address(), space.prefixlen()),
        }
    }
}
