//! # gridscan-core
//!
//! Core types and traits for the gridscan toolkit.
//!
//! This crate provides the foundational pieces shared by the scanner and any
//! host implementation:
//! - Node and player records
//! - The `HostApi` trait abstracting the game's scripting runtime
//! - Capability detection
//! - Generic TTL cache entries
//! - Scan configuration
//! - Formatting helpers and a leveled script logger

pub mod cache;
pub mod caps;
pub mod config;
pub mod error;
pub mod fmt;
pub mod host;
pub mod log;
pub mod node;

pub use cache::CacheEntry;
pub use caps::Capabilities;
pub use config::ScanConfig;
pub use error::{HostError, Result};
pub use host::{HostApi, PortProgram};
pub use log::{LogEntry, LogLevel, ScriptLogger};
pub use node::{NodeId, NodeSnapshot, PlayerState};
