//! Background job engine for Pagewright.
//!
//! Every accepted task descriptor becomes a job with a deterministic
//! identity. Jobs execute strictly one at a time through the build/revise
//! pipeline, and their fine-grained progress stays queryable while they
//! run. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
