//! Product Catalog Library
//!
//! This library provides an in-memory merchant product catalog and the HTTP
//! API in front of it.

// Domain modules
pub mod catalog;
pub mod error;

// Infrastructure
pub mod config;
pub mod router;
pub mod telemetry;
