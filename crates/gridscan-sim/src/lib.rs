//! # gridscan-sim
//!
//! An in-memory host runtime implementing [`gridscan_core::HostApi`]: a small
//! world of linked nodes, a manually advanced clock, installed program files
//! and a captured console. Integration tests drive the scanner against it and
//! assert on query counters; the demo binary runs a full sweep on it.
//!
//! The `HostApi` surface is `&self`, so all world state sits behind interior
//! mutability. The simulator is strictly single-threaded, matching the host
//! execution model it stands in for.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use gridscan_core::{HostApi, HostError, NodeId, NodeSnapshot, PlayerState, PortProgram, Result};

/// One simulated node's mutable state
#[derive(Debug, Clone)]
pub struct SimNode {
    pub max_money: f64,
    pub money: f64,
    pub min_difficulty: f64,
    pub security: f64,
    pub required_skill: u32,
    pub rooted: bool,
    pub purchased: bool,
    pub ports_required: u8,
    pub max_ram: f64,
    pub ram_used: f64,
    open_ports: HashSet<PortProgram>,
}

impl Default for SimNode {
    fn default() -> Self {
        Self {
            max_money: 0.0,
            money: 0.0,
            min_difficulty: 1.0,
            security: 1.0,
            required_skill: 1,
            rooted: false,
            purchased: false,
            ports_required: 0,
            max_ram: 0.0,
            ram_used: 0.0,
            open_ports: HashSet::new(),
        }
    }
}

impl SimNode {
    /// A money-bearing target node
    pub fn target(max_money: f64, min_difficulty: f64, required_skill: u32) -> Self {
        Self {
            max_money,
            money: max_money,
            min_difficulty,
            security: min_difficulty,
            required_skill,
            ..Default::default()
        }
    }

    /// Number of ports a nuke needs on this node
    pub fn with_ports(mut self, ports_required: u8) -> Self {
        self.ports_required = ports_required;
        self
    }

    /// RAM shape of the node
    pub fn with_ram(mut self, max_ram: f64, ram_used: f64) -> Self {
        self.max_ram = max_ram;
        self.ram_used = ram_used;
        self
    }

    fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            max_money: self.max_money,
            money: self.money,
            min_difficulty: self.min_difficulty,
            security: self.security,
            required_skill: self.required_skill,
            rooted: self.rooted,
            purchased: self.purchased,
            ports_required: self.ports_required,
            max_ram: self.max_ram,
            ram_used: self.ram_used,
        }
    }
}

/// In-memory world implementing the host surface
pub struct SimHost {
    root: NodeId,
    nodes: RefCell<HashMap<NodeId, SimNode>>,
    edges: RefCell<HashMap<NodeId, Vec<NodeId>>>,
    files: RefCell<HashSet<String>>,
    player: RefCell<PlayerState>,
    clock_ms: Cell<u64>,
    console: RefCell<Vec<String>>,
    scan_queries: Cell<u64>,
    info_queries: Cell<u64>,
}

impl SimHost {
    /// Create a world containing only the rooted root node
    pub fn new(root: impl Into<NodeId>) -> Self {
        let root = root.into();
        let root_node = SimNode {
            rooted: true,
            max_ram: 32.0,
            ..Default::default()
        };

        let host = Self {
            root: root.clone(),
            nodes: RefCell::new(HashMap::new()),
            edges: RefCell::new(HashMap::new()),
            files: RefCell::new(HashSet::new()),
            player: RefCell::new(PlayerState {
                hacking_skill: 1,
                money: 0.0,
            }),
            clock_ms: Cell::new(0),
            console: RefCell::new(Vec::new()),
            scan_queries: Cell::new(0),
            info_queries: Cell::new(0),
        };
        host.nodes.borrow_mut().insert(root.clone(), root_node);
        host.edges.borrow_mut().insert(root, Vec::new());
        host
    }

    /// The fixed root of this world
    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Add a node without linking it anywhere
    pub fn add_node(&self, id: impl Into<NodeId>, node: SimNode) {
        let id = id.into();
        self.nodes.borrow_mut().insert(id.clone(), node);
        self.edges.borrow_mut().entry(id).or_default();
    }

    /// Link two existing nodes bidirectionally
    pub fn link(&self, a: impl Into<NodeId>, b: impl Into<NodeId>) {
        let (a, b) = (a.into(), b.into());
        let mut edges = self.edges.borrow_mut();
        edges.entry(a.clone()).or_default().push(b.clone());
        edges.entry(b).or_default().push(a);
    }

    /// Add a node and link it to `parent` in one step
    pub fn attach(&self, parent: impl Into<NodeId>, id: impl Into<NodeId>, node: SimNode) {
        let id = id.into();
        self.add_node(id.clone(), node);
        self.link(parent, id);
    }

    /// Install a program file on the root node
    pub fn install(&self, file: impl Into<String>) {
        self.files.borrow_mut().insert(file.into());
    }

    /// Set the player's skill and money
    pub fn set_player(&self, hacking_skill: u32, money: f64) {
        *self.player.borrow_mut() = PlayerState {
            hacking_skill,
            money,
        };
    }

    /// Advance the simulated clock
    pub fn advance(&self, ms: u64) {
        self.clock_ms.set(self.clock_ms.get() + ms);
    }

    /// Mutate one node's state in place
    pub fn update_node(&self, id: &NodeId, update: impl FnOnce(&mut SimNode)) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(id) {
            update(node);
        }
    }

    /// Lines printed to the host console so far
    pub fn console_lines(&self) -> Vec<String> {
        self.console.borrow().clone()
    }

    /// How many adjacency queries the host has served
    pub fn scan_queries(&self) -> u64 {
        self.scan_queries.get()
    }

    /// How many snapshot queries the host has served
    pub fn info_queries(&self) -> u64 {
        self.info_queries.get()
    }
}

impl HostApi for SimHost {
    fn now_ms(&self) -> u64 {
        self.clock_ms.get()
    }

    fn scan(&self, node: &NodeId) -> Result<Vec<NodeId>> {
        self.scan_queries.set(self.scan_queries.get() + 1);
        self.edges
            .borrow()
            .get(node)
            .cloned()
            .ok_or_else(|| HostError::UnknownNode(node.clone()))
    }

    fn server_info(&self, node: &NodeId) -> Result<NodeSnapshot> {
        self.info_queries.set(self.info_queries.get() + 1);
        self.nodes
            .borrow()
            .get(node)
            .map(SimNode::snapshot)
            .ok_or_else(|| HostError::UnknownNode(node.clone()))
    }

    fn player(&self) -> Result<PlayerState> {
        Ok(*self.player.borrow())
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.borrow().contains(name)
    }

    fn open_port(&self, node: &NodeId, program: PortProgram) -> Result<()> {
        if !self.file_exists(program.file_name()) {
            return Err(HostError::query(format!(
                "{} not installed",
                program.file_name()
            )));
        }
        let mut nodes = self.nodes.borrow_mut();
        let node_state = nodes
            .get_mut(node)
            .ok_or_else(|| HostError::UnknownNode(node.clone()))?;
        node_state.open_ports.insert(program);
        Ok(())
    }

    fn nuke(&self, node: &NodeId) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let node_state = nodes
            .get_mut(node)
            .ok_or_else(|| HostError::UnknownNode(node.clone()))?;

        if node_state.open_ports.len() < node_state.ports_required as usize {
            return Err(HostError::CrackFailed {
                node: node.clone(),
                reason: format!(
                    "{} of {} ports open",
                    node_state.open_ports.len(),
                    node_state.ports_required
                ),
            });
        }
        node_state.rooted = true;
        Ok(())
    }

    fn weaken_time_ms(&self, snapshot: &NodeSnapshot, player: &PlayerState) -> Result<f64> {
        if !self.file_exists("Formulas.exe") {
            return Err(HostError::query("Formulas.exe not installed"));
        }
        // Toy model: weaken slows with difficulty, speeds up with skill
        let skill_factor = 1.0 + f64::from(player.hacking_skill) / 100.0;
        Ok(snapshot.min_difficulty * 4_000.0 / skill_factor)
    }

    fn print(&self, line: &str) {
        self.console.borrow_mut().push(line.to_string());
    }
}
