//! Content generation from briefs.
//!
//! Turns a brief (plus optional attachments and, for revisions, the current
//! primary artifact) into a generated site: the primary HTML content and a
//! README-style description document.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
