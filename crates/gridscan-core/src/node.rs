//! Node and player records

use serde::{Deserialize, Serialize};

/// Unique identifier for a node (its hostname)
pub type NodeId = String;

/// Snapshot of a node's queried attributes.
///
/// Replaced wholesale on refresh; there is no partial update. The snapshot is
/// only as current as the query that produced it — callers that need fresher
/// data force a re-query or invalidate the cached entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NodeSnapshot {
    /// Maximum money the node can hold
    pub max_money: f64,

    /// Money currently available
    #[serde(default)]
    pub money: f64,

    /// Minimum security level (difficulty floor used for scoring)
    pub min_difficulty: f64,

    /// Current security level
    #[serde(default)]
    pub security: f64,

    /// Hacking skill required to operate on this node
    pub required_skill: u32,

    /// Whether the player has root access
    #[serde(default)]
    pub rooted: bool,

    /// Whether the node was purchased by the player
    #[serde(default)]
    pub purchased: bool,

    /// Open ports needed before the node can be nuked
    #[serde(default)]
    pub ports_required: u8,

    /// Total RAM in GB
    #[serde(default)]
    pub max_ram: f64,

    /// RAM currently in use in GB
    #[serde(default)]
    pub ram_used: f64,
}

impl NodeSnapshot {
    /// RAM still free on this node, in GB
    pub fn free_ram(&self) -> f64 {
        (self.max_ram - self.ram_used).max(0.0)
    }

    /// Whether the node holds money at all
    pub fn has_money(&self) -> bool {
        self.max_money > 0.0
    }
}

/// Current player state relevant to targeting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlayerState {
    /// Current hacking skill level
    pub hacking_skill: u32,

    /// Liquid money on hand
    #[serde(default)]
    pub money: f64,
}
