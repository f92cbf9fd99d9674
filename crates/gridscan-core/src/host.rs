//! Host runtime trait
//!
//! The game exposes a scripting surface the toolkit does not control. This
//! trait is the seam: the scanner only ever talks to the host through it, and
//! tests drive the scanner against an in-memory implementation.
//!
//! The host execution model is single-threaded and synchronous; none of these
//! calls suspend, so the trait is deliberately not async.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::{NodeId, NodeSnapshot, PlayerState};

/// Port-opening programs the player may own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortProgram {
    BruteSsh,
    FtpCrack,
    RelaySmtp,
    HttpWorm,
    SqlInject,
}

impl PortProgram {
    /// All port programs, in conventional acquisition order
    pub const ALL: [PortProgram; 5] = [
        PortProgram::BruteSsh,
        PortProgram::FtpCrack,
        PortProgram::RelaySmtp,
        PortProgram::HttpWorm,
        PortProgram::SqlInject,
    ];

    /// Executable file name the host checks for
    pub fn file_name(self) -> &'static str {
        match self {
            PortProgram::BruteSsh => "BruteSSH.exe",
            PortProgram::FtpCrack => "FTPCrack.exe",
            PortProgram::RelaySmtp => "relaySMTP.exe",
            PortProgram::HttpWorm => "HTTPWorm.exe",
            PortProgram::SqlInject => "SQLInject.exe",
        }
    }
}

/// Surface of the game's scripting runtime consumed by the scanner.
///
/// All methods take `&self`; host implementations that mutate internal state
/// (the simulator does) use interior mutability.
pub trait HostApi {
    /// Current host time in milliseconds. Assumed non-decreasing; the scanner
    /// clamps it anyway.
    fn now_ms(&self) -> u64;

    /// Neighbors directly connected to `node`
    fn scan(&self, node: &NodeId) -> Result<Vec<NodeId>>;

    /// Fresh snapshot of a node's current attributes
    fn server_info(&self, node: &NodeId) -> Result<NodeSnapshot>;

    /// Current player state
    fn player(&self) -> Result<PlayerState>;

    /// Whether a program file exists on the player's root node
    fn file_exists(&self, name: &str) -> bool;

    /// Run a port-opening program against a node
    fn open_port(&self, node: &NodeId, program: PortProgram) -> Result<()>;

    /// Attempt to gain root access on a node
    fn nuke(&self, node: &NodeId) -> Result<()>;

    /// Modeled weaken time in milliseconds for a node given the player state.
    /// Only meaningful when the advanced-formulas capability is present;
    /// hosts without it should return an error.
    fn weaken_time_ms(&self, snapshot: &NodeSnapshot, player: &PlayerState) -> Result<f64>;

    /// Write a display-only line to the host console
    fn print(&self, line: &str);
}
