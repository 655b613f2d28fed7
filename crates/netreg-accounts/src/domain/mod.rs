//! # Domain Layer
//!
//! Account entity, lifecycle rules, and configuration. Pure logic; all I/O
//! lives behind the ports.

pub mod config;
pub mod entities;
pub mod errors;
