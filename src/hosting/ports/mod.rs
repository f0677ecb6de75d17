//! Port contracts for the hosting context.

pub mod source_host;

pub use source_host::{SourceHost, SourceHostError, SourceHostResult};
