//! Visa intake backend library.
//!
//! Hexagonal layout: `domain` holds entities and ports, `inbound` the HTTP
//! adapter, `outbound` the Diesel/PostgreSQL adapters. The binary in
//! `main.rs` wires the layers together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::trace::Trace;
