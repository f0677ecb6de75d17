//! In-memory adapters for the job engine.

mod store;

pub use store::InMemoryJobStore;
