//! Profitability scoring and target selection
//!
//! A score is a scalar ranking of a node as an extraction target; zero is the
//! sentinel for "not a valid target". Scores are memoized with their own TTL,
//! independent of the snapshot TTL underneath, so a served score may lag the
//! node's true state. That staleness is an accepted trade-off, not a bug.
//!
//! Two scoring models coexist and do not agree in magnitude: with the
//! formulas capability the score is max money per modeled weaken-second, and
//! without it a cheap max-money-over-difficulty heuristic. Nothing normalizes
//! between them, so callers must tolerate the score scale jumping when the
//! capability appears mid-run.

use gridscan_core::{CacheEntry, HostApi, NodeId, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::network::Network;

/// One row of the scoring report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TargetReport {
    pub id: NodeId,
    pub score: f64,
    pub max_money: f64,
    pub difficulty: f64,
    pub required_skill: u32,
    pub rooted: bool,
}

impl<H: HostApi> Network<H> {
    /// Profitability score for a node; 0.0 for invalid targets and on any
    /// host query failure. Memoized with the score TTL.
    pub fn score(&mut self, id: &NodeId) -> f64 {
        let now = self.now_ms();

        if let Some(entry) = self.scores.get(id) {
            if entry.is_fresh(now) {
                return *entry.value();
            }
        }

        let score = match self.compute_score(id) {
            Ok(score) => score,
            Err(err) => {
                debug!(node = %id, %err, "score query failed, treating as invalid");
                0.0
            }
        };

        self.scores
            .insert(id.clone(), CacheEntry::new(score, now, self.config.score_ttl_ms));
        score
    }

    fn compute_score(&mut self, id: &NodeId) -> Result<f64> {
        let snapshot = self.server_data(id, false)?;
        let player = self.host.player()?;

        // Validity filters; any miss makes the node a non-target
        if *id == self.config.root
            || snapshot.purchased
            || !snapshot.has_money()
            || snapshot.required_skill > player.hacking_skill
            || snapshot.min_difficulty > self.config.max_target_difficulty
            || snapshot.min_difficulty <= 0.0
        {
            return Ok(0.0);
        }

        if self.caps.formulas && self.config.use_formulas {
            match self.host.weaken_time_ms(&snapshot, &player) {
                Ok(weaken_ms) if weaken_ms > 0.0 && weaken_ms.is_finite() => {
                    // Money per second of modeled weaken time
                    return Ok(snapshot.max_money / (weaken_ms / 1000.0));
                }
                // Fall through to the heuristic
                _ => {}
            }
        }

        Ok(snapshot.max_money / snapshot.min_difficulty)
    }

    /// Up to `k` valid targets, best score first.
    ///
    /// Ties keep topology order (stable sort); the tiebreak is otherwise
    /// unspecified.
    pub fn top_targets(&mut self, k: usize) -> Result<Vec<NodeId>> {
        let nodes = self.refresh(false)?;

        let mut scored: Vec<(NodeId, f64)> = Vec::new();
        for id in nodes {
            let score = self.score(&id);
            if score > 0.0 {
                scored.push((id, score));
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored.into_iter().map(|(id, _)| id).collect())
    }

    /// Best single target, or the configured fallback when nothing scores
    /// above zero or the scan itself fails. Never errors; the fallback is a
    /// real node known a priori.
    pub fn best_target(&mut self) -> NodeId {
        match self.top_targets(1) {
            Ok(top) => top
                .into_iter()
                .next()
                .unwrap_or_else(|| self.config.fallback_target.clone()),
            Err(err) => {
                warn!(%err, "target scan failed, using fallback");
                self.config.fallback_target.clone()
            }
        }
    }

    /// Detailed rows for every node scoring above zero, best first
    pub fn scoring_report(&mut self) -> Result<Vec<TargetReport>> {
        let nodes = self.refresh(false)?;

        let mut report = Vec::new();
        for id in nodes {
            let score = self.score(&id);
            if score <= 0.0 {
                continue;
            }
            let snapshot = self.server_data(&id, false)?;
            report.push(TargetReport {
                id,
                score,
                max_money: snapshot.max_money,
                difficulty: snapshot.min_difficulty,
                required_skill: snapshot.required_skill,
                rooted: snapshot.rooted,
            });
        }

        report.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(report)
    }
}
