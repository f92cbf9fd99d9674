//! Capability detection
//!
//! The host exposes optional sub-APIs and program files depending on game
//! progress. Instead of probing ad hoc at every call site, capabilities are
//! detected once into an explicit descriptor and passed to whatever needs
//! them. Re-detect when progress may have changed (e.g. after buying a
//! program).

use serde::{Deserialize, Serialize};

use crate::host::{HostApi, PortProgram};

/// Explicit descriptor of optional host features available to this process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Capabilities {
    /// BruteSSH.exe present
    #[serde(default)]
    pub brute_ssh: bool,
    /// FTPCrack.exe present
    #[serde(default)]
    pub ftp_crack: bool,
    /// relaySMTP.exe present
    #[serde(default)]
    pub relay_smtp: bool,
    /// HTTPWorm.exe present
    #[serde(default)]
    pub http_worm: bool,
    /// SQLInject.exe present
    #[serde(default)]
    pub sql_inject: bool,
    /// Formulas.exe present (enables the accurate scoring model)
    #[serde(default)]
    pub formulas: bool,
}

impl Capabilities {
    /// Probe the host once and build the descriptor
    pub fn detect(host: &impl HostApi) -> Self {
        Self {
            brute_ssh: host.file_exists(PortProgram::BruteSsh.file_name()),
            ftp_crack: host.file_exists(PortProgram::FtpCrack.file_name()),
            relay_smtp: host.file_exists(PortProgram::RelaySmtp.file_name()),
            http_worm: host.file_exists(PortProgram::HttpWorm.file_name()),
            sql_inject: host.file_exists(PortProgram::SqlInject.file_name()),
            formulas: host.file_exists("Formulas.exe"),
        }
    }

    /// Whether a given port program is owned
    pub fn has(&self, program: PortProgram) -> bool {
        match program {
            PortProgram::BruteSsh => self.brute_ssh,
            PortProgram::FtpCrack => self.ftp_crack,
            PortProgram::RelaySmtp => self.relay_smtp,
            PortProgram::HttpWorm => self.http_worm,
            PortProgram::SqlInject => self.sql_inject,
        }
    }

    /// Port programs owned, in acquisition order
    pub fn owned_programs(&self) -> Vec<PortProgram> {
        PortProgram::ALL
            .into_iter()
            .filter(|p| self.has(*p))
            .collect()
    }

    /// Number of distinct ports this process can open
    pub fn ports_available(&self) -> u8 {
        PortProgram::ALL.into_iter().filter(|p| self.has(*p)).count() as u8
    }

    /// Whether a node requiring `ports_required` open ports can be cracked
    pub fn can_crack(&self, ports_required: u8) -> bool {
        self.ports_available() >= ports_required
    }
}
