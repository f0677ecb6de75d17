//! Pagewright: brief-to-site build service.
//!
//! This crate accepts content-generation requests, turns each brief into a
//! single-page site through a language model, publishes the result to a
//! source-hosting service, and reports the outcome to a caller-supplied
//! webhook. Jobs run one at a time in a background scheduler while callers
//! poll their progress.
//!
//! # Architecture
//!
//! Pagewright follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP APIs, in-memory)
//!
//! # Modules
//!
//! - [`job`]: Job identity, sequential scheduling, the build/revise
//!   pipeline, and status projections
//! - [`generation`]: Content generation from briefs
//! - [`hosting`]: Source repository and public hosting operations
//! - [`notification`]: Evaluation payload delivery with bounded retries
//! - [`http`]: Inbound submission and status query surface
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Structured logging setup

pub mod config;
pub mod generation;
pub mod hosting;
pub mod http;
pub mod job;
pub mod notification;
pub mod telemetry;
