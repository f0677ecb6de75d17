//! Adapter implementations for job engine ports.

pub mod memory;
