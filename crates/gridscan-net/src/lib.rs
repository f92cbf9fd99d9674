//! # gridscan-net
//!
//! The network component of the gridscan toolkit: topology discovery, node
//! snapshot caching, profitability scoring and target selection, layered over
//! a host runtime implementing [`gridscan_core::HostApi`].
//!
//! Everything is a read-mostly cache over a single-threaded polling loop. The
//! [`Network`] facade owns the host handle and all cache state; one facade per
//! script instance, nothing shared.

pub mod crack;
pub mod network;
pub mod score;
pub mod stats;

pub use crack::CrackSummary;
pub use network::Network;
pub use score::TargetReport;
pub use stats::{CacheStats, NetworkStats};
