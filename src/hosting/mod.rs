//! Source-repository hosting.
//!
//! Creates repositories, reads and writes files on the default branch,
//! enables static-site publishing and derives the public site address.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
