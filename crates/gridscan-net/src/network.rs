//! Network facade: topology scanning and snapshot caching
//!
//! Discovery is a full breadth-first walk from the configured root. There is
//! no incremental update: a stale topology is re-scanned wholesale, so the
//! cached set is always exactly one traversal's view of the graph. An
//! adjacency failure aborts the whole scan attempt and leaves the previous
//! cache in place; dropping nodes silently would corrupt the completeness
//! invariant.

use std::collections::{HashMap, HashSet, VecDeque};

use gridscan_core::{CacheEntry, Capabilities, HostApi, NodeId, NodeSnapshot, Result, ScanConfig};
use tracing::{debug, info};

use crate::stats::ScanCounters;

/// Owns the host handle and all cache state for one script instance
pub struct Network<H: HostApi> {
    pub(crate) host: H,
    pub(crate) caps: Capabilities,
    pub(crate) config: ScanConfig,

    pub(crate) topology: Option<CacheEntry<Vec<NodeId>>>,
    pub(crate) server_data: HashMap<NodeId, CacheEntry<NodeSnapshot>>,
    pub(crate) scores: HashMap<NodeId, CacheEntry<f64>>,

    pub(crate) counters: ScanCounters,
    last_now_ms: u64,
}

impl<H: HostApi> Network<H> {
    /// Create a network manager with default configuration
    pub fn new(host: H, caps: Capabilities) -> Self {
        Self::with_config(host, caps, ScanConfig::default())
    }

    /// Create a network manager with custom configuration
    pub fn with_config(host: H, caps: Capabilities, config: ScanConfig) -> Self {
        Self {
            host,
            caps,
            config,
            topology: None,
            server_data: HashMap::new(),
            scores: HashMap::new(),
            counters: ScanCounters::default(),
            last_now_ms: 0,
        }
    }

    /// Borrow the host handle
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Current capability descriptor
    pub fn caps(&self) -> Capabilities {
        self.caps
    }

    /// Replace the capability descriptor after a re-detection
    pub fn set_caps(&mut self, caps: Capabilities) {
        self.caps = caps;
    }

    /// Active configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Host time clamped to be non-decreasing across calls
    pub(crate) fn now_ms(&mut self) -> u64 {
        let now = self.host.now_ms().max(self.last_now_ms);
        self.last_now_ms = now;
        now
    }

    /// All nodes reachable from the root.
    ///
    /// Served from cache while fresh; `force` bypasses the cache, re-runs the
    /// traversal and overwrites it. Propagates adjacency failures without
    /// touching the cached value.
    pub fn refresh(&mut self, force: bool) -> Result<Vec<NodeId>> {
        let now = self.now_ms();

        if !force {
            if let Some(entry) = &self.topology {
                if entry.is_fresh(now) {
                    self.counters.cache_hits += 1;
                    return Ok(entry.value().clone());
                }
            }
        }

        let nodes = self.scan_topology()?;
        self.counters.cache_misses += 1;
        self.counters.total_scans += 1;
        info!(nodes = nodes.len(), "topology scan complete");

        self.topology = Some(CacheEntry::new(
            nodes.clone(),
            now,
            self.config.topology_ttl_ms,
        ));
        Ok(nodes)
    }

    /// Breadth-first traversal from the root; visit order is the returned
    /// order, so repeated scans of an unchanged graph agree.
    fn scan_topology(&self) -> Result<Vec<NodeId>> {
        let mut order = Vec::new();
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut frontier: VecDeque<NodeId> = VecDeque::new();

        seen.insert(self.config.root.clone());
        frontier.push_back(self.config.root.clone());

        while let Some(current) = frontier.pop_front() {
            for neighbor in self.host.scan(&current)? {
                if seen.insert(neighbor.clone()) {
                    frontier.push_back(neighbor);
                }
            }
            order.push(current);
        }

        Ok(order)
    }

    /// Snapshot of one node, served from cache while fresh.
    ///
    /// `force` re-queries regardless of freshness. Entries are replaced
    /// wholesale and never evicted; memory is bounded by topology size.
    pub fn server_data(&mut self, id: &NodeId, force: bool) -> Result<NodeSnapshot> {
        let now = self.now_ms();

        if !force {
            if let Some(entry) = self.server_data.get(id) {
                if entry.is_fresh(now) {
                    return Ok(entry.value().clone());
                }
            }
        }

        let snapshot = self.host.server_info(id)?;
        self.server_data.insert(
            id.clone(),
            CacheEntry::new(snapshot.clone(), now, self.config.server_data_ttl_ms),
        );
        Ok(snapshot)
    }

    /// Drop the cached snapshot for one node.
    ///
    /// State-changing actions (cracking) call this immediately so the next
    /// read reflects the new state instead of waiting out the TTL.
    pub fn invalidate(&mut self, id: &NodeId) {
        self.server_data.remove(id);
    }

    /// Drop every cache (topology, snapshots, scores)
    pub fn clear_caches(&mut self) {
        self.topology = None;
        self.server_data.clear();
        self.scores.clear();
        debug!("all caches cleared");
    }

    /// Shortest path from the root to `target`, inclusive of both ends.
    /// An unreachable target yields an empty path; absence of a route is a
    /// normal outcome, not an error.
    pub fn path_to(&self, target: &NodeId) -> Result<Vec<NodeId>> {
        if *target == self.config.root {
            return Ok(vec![self.config.root.clone()]);
        }

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut frontier: VecDeque<(NodeId, Vec<NodeId>)> = VecDeque::new();

        seen.insert(self.config.root.clone());
        frontier.push_back((self.config.root.clone(), vec![self.config.root.clone()]));

        while let Some((current, path)) = frontier.pop_front() {
            for neighbor in self.host.scan(&current)? {
                if !seen.insert(neighbor.clone()) {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(neighbor.clone());
                if neighbor == *target {
                    return Ok(next_path);
                }
                frontier.push_back((neighbor, next_path));
            }
        }

        Ok(Vec::new())
    }

    /// Rooted nodes in the current topology
    pub fn rooted(&mut self) -> Result<Vec<NodeId>> {
        self.filter_nodes(|snap| snap.rooted)
    }

    /// Player-purchased nodes in the current topology
    pub fn purchased(&mut self) -> Result<Vec<NodeId>> {
        self.filter_nodes(|snap| snap.purchased)
    }

    /// Rooted nodes with at least `min_ram` GB of total RAM
    pub fn by_min_ram(&mut self, min_ram: f64) -> Result<Vec<NodeId>> {
        self.filter_nodes(|snap| snap.rooted && snap.max_ram >= min_ram)
    }

    /// Rooted money nodes whose skill requirement is at or below `max_level`
    pub fn by_hack_level(&mut self, max_level: u32) -> Result<Vec<NodeId>> {
        self.filter_nodes(|snap| {
            snap.rooted && snap.has_money() && snap.required_skill <= max_level
        })
    }

    /// Nodes whose name contains `pattern`, case-insensitively
    pub fn find_nodes(&mut self, pattern: &str) -> Result<Vec<NodeId>> {
        let needle = pattern.to_lowercase();
        let nodes = self.refresh(false)?;
        Ok(nodes
            .into_iter()
            .filter(|id| id.to_lowercase().contains(&needle))
            .collect())
    }

    fn filter_nodes(&mut self, keep: impl Fn(&NodeSnapshot) -> bool) -> Result<Vec<NodeId>> {
        let nodes = self.refresh(false)?;
        let mut out = Vec::new();
        for id in nodes {
            let snap = self.server_data(&id, false)?;
            if keep(&snap) {
                out.push(id);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridscan_core::HostError;
    use std::cell::Cell;

    /// Minimal host over a static adjacency map with a settable clock
    struct StaticHost {
        edges: HashMap<NodeId, Vec<NodeId>>,
        clock_ms: Cell<u64>,
        scan_calls: Cell<u32>,
    }

    impl StaticHost {
        fn new(edges: &[(&str, &[&str])]) -> Self {
            let edges = edges
                .iter()
                .map(|(from, to)| {
                    (
                        from.to_string(),
                        to.iter().map(|n| n.to_string()).collect(),
                    )
                })
                .collect();
            Self {
                edges,
                clock_ms: Cell::new(0),
                scan_calls: Cell::new(0),
            }
        }
    }

    impl HostApi for StaticHost {
        fn now_ms(&self) -> u64 {
            self.clock_ms.get()
        }

        fn scan(&self, node: &NodeId) -> Result<Vec<NodeId>> {
            self.scan_calls.set(self.scan_calls.get() + 1);
            self.edges
                .get(node)
                .cloned()
                .ok_or_else(|| HostError::UnknownNode(node.clone()))
        }

        fn server_info(&self, node: &NodeId) -> Result<NodeSnapshot> {
            Err(HostError::UnknownNode(node.clone()))
        }

        fn player(&self) -> Result<gridscan_core::PlayerState> {
            Ok(gridscan_core::PlayerState {
                hacking_skill: 1,
                money: 0.0,
            })
        }

        fn file_exists(&self, _name: &str) -> bool {
            false
        }

        fn open_port(&self, node: &NodeId, _program: gridscan_core::PortProgram) -> Result<()> {
            Err(HostError::UnknownNode(node.clone()))
        }

        fn nuke(&self, node: &NodeId) -> Result<()> {
            Err(HostError::UnknownNode(node.clone()))
        }

        fn weaken_time_ms(
            &self,
            _snapshot: &NodeSnapshot,
            _player: &gridscan_core::PlayerState,
        ) -> Result<f64> {
            Err(HostError::query("formulas not available"))
        }

        fn print(&self, _line: &str) {}
    }

    fn diamond() -> StaticHost {
        // home - a - c, home - b - c: reachability with a join, no dupes
        StaticHost::new(&[
            ("home", &["a", "b"]),
            ("a", &["home", "c"]),
            ("b", &["home", "c"]),
            ("c", &["a", "b"]),
        ])
    }

    #[test]
    fn bfs_visits_every_reachable_node_once() {
        let mut net = Network::new(diamond(), Capabilities::default());
        let mut nodes = net.refresh(false).unwrap();
        nodes.sort();
        assert_eq!(nodes, vec!["a", "b", "c", "home"]);
    }

    #[test]
    fn refresh_within_ttl_is_a_cache_hit() {
        let mut net = Network::new(diamond(), Capabilities::default());
        let first = net.refresh(false).unwrap();
        let calls_after_first = net.host.scan_calls.get();

        net.host.clock_ms.set(59_999);
        let second = net.refresh(false).unwrap();

        assert_eq!(first, second);
        assert_eq!(net.host.scan_calls.get(), calls_after_first);
        assert_eq!(net.cache_stats().cache_hits, 1);
    }

    #[test]
    fn refresh_after_ttl_rescans() {
        let mut net = Network::new(diamond(), Capabilities::default());
        net.refresh(false).unwrap();
        let calls_after_first = net.host.scan_calls.get();

        net.host.clock_ms.set(60_000);
        net.refresh(false).unwrap();
        assert!(net.host.scan_calls.get() > calls_after_first);
    }

    #[test]
    fn force_bypasses_fresh_cache() {
        let mut net = Network::new(diamond(), Capabilities::default());
        net.refresh(false).unwrap();
        let calls_after_first = net.host.scan_calls.get();

        net.refresh(true).unwrap();
        assert!(net.host.scan_calls.get() > calls_after_first);
        assert_eq!(net.cache_stats().total_scans, 2);
    }

    #[test]
    fn adjacency_failure_is_fatal_and_keeps_old_cache() {
        // "ghost" scans fine on enqueue but has no adjacency entry itself
        let host = StaticHost::new(&[("home", &["ghost"])]);
        let mut net = Network::new(host, Capabilities::default());
        assert!(net.refresh(false).is_err());
        assert!(net.topology.is_none());

        // An aborted attempt is not a completed scan
        let stats = net.cache_stats();
        assert_eq!(stats.total_scans, 0);
        assert_eq!(stats.cache_misses, 0);
    }

    #[test]
    fn path_to_finds_shortest_route() {
        let host = StaticHost::new(&[
            ("home", &["a"]),
            ("a", &["home", "b"]),
            ("b", &["a", "c"]),
            ("c", &["b"]),
        ]);
        let net = Network::new(host, Capabilities::default());
        let path = net.path_to(&"c".to_string()).unwrap();
        assert_eq!(path, vec!["home", "a", "b", "c"]);
        assert_eq!(net.path_to(&"home".to_string()).unwrap(), vec!["home"]);
    }

    #[test]
    fn path_to_unreachable_target_is_empty() {
        let net = Network::new(diamond(), Capabilities::default());
        assert_eq!(
            net.path_to(&"nowhere".to_string()).unwrap(),
            Vec::<NodeId>::new()
        );
    }

    #[test]
    fn clamped_clock_never_goes_backwards() {
        let mut net = Network::new(diamond(), Capabilities::default());
        net.host.clock_ms.set(5_000);
        assert_eq!(net.now_ms(), 5_000);
        net.host.clock_ms.set(1_000);
        assert_eq!(net.now_ms(), 5_000);
    }
}
