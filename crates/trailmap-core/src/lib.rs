//! Trailmap Core - Domain models, walks, and configuration
//!
//! This crate contains the core domain types, the error taxonomy and the
//! layered configuration shared by the cache, placement and server crates.

pub mod config;
pub mod error;
pub mod models;
pub mod walks;

pub use error::{Result, TrailmapError};
