//! Scan configuration

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Tunables for scanning, caching and target selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanConfig {
    /// Fixed root of the topology (the player's own node)
    pub root: NodeId,

    /// Always-valid target returned when no scored target exists
    pub fallback_target: NodeId,

    /// Topology cache TTL; the graph rarely changes
    pub topology_ttl_ms: u64,

    /// Score cache TTL; scores shift with player level
    pub score_ttl_ms: u64,

    /// Snapshot cache TTL; node state changes quickly
    pub server_data_ttl_ms: u64,

    /// Nodes above this difficulty floor are never targeted
    pub max_target_difficulty: f64,

    /// Use the formulas-based scoring model when the capability is present
    pub use_formulas: bool,

    /// Default count for top-target queries and reports
    pub top_targets: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: "home".into(),
            fallback_target: "n00dles".into(),
            topology_ttl_ms: 60_000,
            score_ttl_ms: 30_000,
            server_data_ttl_ms: 5_000,
            max_target_difficulty: 50.0,
            use_formulas: true,
            top_targets: 5,
        }
    }
}
