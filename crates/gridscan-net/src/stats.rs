//! Network and cache statistics, plus console reports

use gridscan_core::{HostApi, Result, fmt};
use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Internal scan counters
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScanCounters {
    pub total_scans: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Topology cache performance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheStats {
    pub total_scans: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Hits over total requests, 0.0 when nothing was requested yet
    pub hit_rate: f64,
}

/// Aggregates over the current topology
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NetworkStats {
    pub total_nodes: u32,
    pub rooted_nodes: u32,
    pub hackable_nodes: u32,
    pub crackable_nodes: u32,
    pub purchased_nodes: u32,
    pub total_ram: f64,
    pub used_ram: f64,
    pub free_ram: f64,
    pub ram_usage: f64,
    pub total_money: f64,
    pub max_money: f64,
    pub money_ratio: f64,
}

impl<H: HostApi> Network<H> {
    /// Cache hit/miss counters for the topology cache
    pub fn cache_stats(&self) -> CacheStats {
        let requests = self.counters.cache_hits + self.counters.cache_misses;
        CacheStats {
            total_scans: self.counters.total_scans,
            cache_hits: self.counters.cache_hits,
            cache_misses: self.counters.cache_misses,
            hit_rate: if requests > 0 {
                self.counters.cache_hits as f64 / requests as f64
            } else {
                0.0
            },
        }
    }

    /// Walk the topology and aggregate node counts, RAM and money totals
    pub fn network_stats(&mut self) -> Result<NetworkStats> {
        let nodes = self.refresh(false)?;
        let player = self.host.player()?;

        let mut stats = NetworkStats {
            total_nodes: nodes.len() as u32,
            ..Default::default()
        };

        for id in nodes {
            let snap = self.server_data(&id, false)?;

            if snap.rooted {
                stats.rooted_nodes += 1;
            }
            if snap.purchased {
                stats.purchased_nodes += 1;
            }

            stats.total_ram += snap.max_ram;
            stats.used_ram += snap.ram_used;

            if snap.has_money() {
                stats.total_money += snap.money;
                stats.max_money += snap.max_money;

                if snap.required_skill <= player.hacking_skill {
                    stats.hackable_nodes += 1;
                    if !snap.rooted && self.caps.can_crack(snap.ports_required) {
                        stats.crackable_nodes += 1;
                    }
                }
            }
        }

        stats.free_ram = stats.total_ram - stats.used_ram;
        if stats.total_ram > 0.0 {
            stats.ram_usage = stats.used_ram / stats.total_ram;
        }
        if stats.max_money > 0.0 {
            stats.money_ratio = stats.total_money / stats.max_money;
        }

        Ok(stats)
    }

    /// Render network and cache statistics to the host console
    pub fn print_stats(&mut self) -> Result<()> {
        let stats = self.network_stats()?;
        let cache = self.cache_stats();

        self.host.print("========================================");
        self.host.print("NETWORK STATISTICS");
        self.host.print("========================================");

        self.host.print("NODES:");
        self.host.print(&format!("  Total      : {}", stats.total_nodes));
        self.host.print(&format!("  Rooted     : {}", stats.rooted_nodes));
        self.host.print(&format!("  Hackable   : {}", stats.hackable_nodes));
        self.host.print(&format!("  Crackable  : {}", stats.crackable_nodes));
        self.host.print(&format!("  Purchased  : {}", stats.purchased_nodes));

        self.host.print("RAM:");
        self.host
            .print(&format!("  Total      : {}", fmt::format_ram(stats.total_ram, 0)));
        self.host
            .print(&format!("  Used       : {}", fmt::format_ram(stats.used_ram, 0)));
        self.host
            .print(&format!("  Free       : {}", fmt::format_ram(stats.free_ram, 0)));
        self.host
            .print(&format!("  Usage      : {}", fmt::format_percent(stats.ram_usage, 1)));

        self.host.print("MONEY:");
        self.host.print(&format!(
            "  Current    : {}",
            fmt::format_money(stats.total_money, 2)
        ));
        self.host.print(&format!(
            "  Maximum    : {}",
            fmt::format_money(stats.max_money, 2)
        ));
        self.host.print(&format!(
            "  Filled     : {}",
            fmt::format_percent(stats.money_ratio, 1)
        ));

        self.host.print("CACHE:");
        self.host
            .print(&format!("  Scans      : {}", cache.total_scans));
        self.host.print(&format!("  Hits       : {}", cache.cache_hits));
        self.host
            .print(&format!("  Misses     : {}", cache.cache_misses));
        self.host
            .print(&format!("  Hit rate   : {}", fmt::format_percent(cache.hit_rate, 1)));

        self.host.print("========================================");
        Ok(())
    }

    /// Render the top `count` targets to the host console
    pub fn print_top_targets(&mut self, count: usize) -> Result<()> {
        let report = self.scoring_report()?;

        self.host.print("========================================");
        self.host.print("TOP TARGETS");
        self.host.print("========================================");

        for (rank, row) in report.iter().take(count).enumerate() {
            let lock = if row.rooted { "open" } else { "locked" };
            self.host.print(&format!(
                "{:>2}. {:<20} [{lock}] score {:>8} max {:>10}",
                rank + 1,
                row.id,
                fmt::format_number(row.score, 2),
                fmt::format_money(row.max_money, 2),
            ));
        }

        self.host.print("========================================");
        Ok(())
    }
}
