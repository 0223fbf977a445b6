//! Ambient service plumbing shared by Girder services: health endpoints,
//! the edge identity extractor, request-id middleware, tracing setup.

pub mod health;
pub mod identity;
pub mod middleware;
pub mod serde;
pub mod tracing;
