//! Root-access acquisition
//!
//! Cracking mutates node state on the host, so the snapshot cache entry for a
//! cracked node is invalidated immediately; waiting out the TTL would keep
//! serving "not rooted" for up to the snapshot window.

use gridscan_core::{HostApi, NodeId, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::network::Network;

/// Outcome of a sweep over the whole topology
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrackSummary {
    pub cracked: u32,
    pub failed: u32,
}

impl<H: HostApi> Network<H> {
    /// Attempt to gain root access on a node.
    ///
    /// Returns `Ok(true)` when root is held afterwards (including when it was
    /// already held), `Ok(false)` when the node cannot be cracked yet.
    /// Per-program port failures are ignored since the port may already be
    /// open; only a failed nuke counts as a failed attempt.
    pub fn crack(&mut self, id: &NodeId) -> Result<bool> {
        let snapshot = self.server_data(id, false)?;
        if snapshot.rooted {
            return Ok(true);
        }

        if !self.caps.can_crack(snapshot.ports_required) {
            debug!(
                node = %id,
                required = snapshot.ports_required,
                available = self.caps.ports_available(),
                "not enough port programs"
            );
            return Ok(false);
        }

        for program in self.caps.owned_programs() {
            // A failed opener usually means the port is already open; the
            // nuke is the arbiter either way
            let _ = self.host.open_port(id, program);
        }

        match self.host.nuke(id) {
            Ok(()) => {
                info!(node = %id, "root access gained");
                self.invalidate(id);
                Ok(true)
            }
            Err(err) => {
                debug!(node = %id, %err, "nuke rejected");
                Ok(false)
            }
        }
    }

    /// Crack every non-rooted node in the topology
    pub fn crack_all(&mut self) -> Result<CrackSummary> {
        let nodes = self.refresh(false)?;

        let mut summary = CrackSummary::default();
        for id in nodes {
            if self.server_data(&id, false)?.rooted {
                continue;
            }
            if self.crack(&id)? {
                summary.cracked += 1;
            } else {
                summary.failed += 1;
            }
        }
        Ok(summary)
    }

    /// Nodes that could be cracked right now but are not yet rooted
    pub fn crackable(&mut self) -> Result<Vec<NodeId>> {
        let nodes = self.refresh(false)?;

        let mut out = Vec::new();
        for id in nodes {
            let snapshot = self.server_data(&id, false)?;
            if !snapshot.rooted && self.caps.can_crack(snapshot.ports_required) {
                out.push(id);
            }
        }
        Ok(out)
    }
}
