//! Adapter implementations for the source-host port.

pub mod github;
pub mod memory;

pub use github::{GitHubConfig, GitHubSourceHost};
pub use memory::{CommitRecord, InMemorySourceHost};
