//! # netreg Test Suite
//!
//! Unified test crate containing the cross-subsystem integration tests.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/
//! │   ├── reservations.rs   # Allocator behavior end-to-end, both stores
//! │   ├── accounts.rs       # Account flows through the public API traits
//! │   └── flows.rs          # Register → verify → reserve choreography
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p netreg-tests
//!
//! # By area
//! cargo test -p netreg-tests integration::reservations::
//! cargo test -p netreg-tests integration::flows::
//! ```

#![allow(dead_code)]

pub mod integration;
