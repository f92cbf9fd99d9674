//! End-to-end scanner behavior against the simulated host

use gridscan_core::{Capabilities, NodeId, PortProgram, ScanConfig};
use gridscan_net::Network;
use gridscan_sim::{SimHost, SimNode};

fn id(s: &str) -> NodeId {
    s.to_string()
}

/// World for the canonical two-target scenario: A is worth hitting, B is out
/// of the player's league.
fn two_target_world() -> SimHost {
    let host = SimHost::new("home");
    host.set_player(50, 0.0);
    host.attach("home", "alpha", SimNode::target(1_000_000.0, 10.0, 1));
    host.attach("home", "beta", SimNode::target(500_000.0, 5.0, 1_000));
    host
}

#[test]
fn refresh_returns_exactly_the_reachable_set() {
    let host = SimHost::new("home");
    host.attach("home", "a", SimNode::default());
    host.attach("a", "b", SimNode::default());
    host.attach("home", "c", SimNode::default());
    // Unlinked node is not reachable
    host.add_node("island", SimNode::default());

    let mut net = Network::new(host, Capabilities::default());
    let mut nodes = net.refresh(false).unwrap();
    nodes.sort();
    assert_eq!(nodes, vec!["a", "b", "c", "home"]);
}

#[test]
fn second_refresh_within_ttl_hits_the_cache() {
    let mut net = Network::new(two_target_world(), Capabilities::default());

    let first = net.refresh(false).unwrap();
    let queries = net.host().scan_queries();

    net.host().advance(59_000);
    let second = net.refresh(false).unwrap();

    assert_eq!(first, second);
    assert_eq!(net.host().scan_queries(), queries);
}

#[test]
fn forced_refresh_always_rescans() {
    let mut net = Network::new(two_target_world(), Capabilities::default());
    net.refresh(false).unwrap();
    let queries = net.host().scan_queries();

    net.refresh(true).unwrap();
    assert!(net.host().scan_queries() > queries);
}

#[test]
fn path_to_unreachable_node_yields_no_route() {
    let host = SimHost::new("home");
    host.attach("home", "a", SimNode::default());
    host.add_node("island", SimNode::default());

    let net = Network::new(host, Capabilities::default());
    assert_eq!(net.path_to(&id("island")).unwrap(), Vec::<NodeId>::new());
    assert_eq!(net.path_to(&id("a")).unwrap(), vec!["home", "a"]);
}

#[test]
fn find_nodes_matches_case_insensitively() {
    let host = SimHost::new("home");
    host.attach("home", "omega-net", SimNode::default());
    host.attach("home", "Omega-Vault", SimNode::default());
    host.attach("home", "darkweb", SimNode::default());

    let mut net = Network::new(host, Capabilities::default());
    let mut hits = net.find_nodes("OMEGA").unwrap();
    hits.sort();
    assert_eq!(hits, vec!["Omega-Vault", "omega-net"]);
    assert!(net.find_nodes("zombo").unwrap().is_empty());
}

#[test]
fn invalid_targets_score_zero() {
    let host = SimHost::new("home");
    host.set_player(50, 0.0);
    // Purchased node
    let mut farm = SimNode::target(9e9, 1.0, 1);
    farm.purchased = true;
    host.attach("home", "farm-1", farm);
    // No money
    host.attach("home", "darkweb", SimNode::default());
    // Skill out of reach
    host.attach("home", "fortress", SimNode::target(1e9, 10.0, 999));
    // Difficulty above the configured ceiling
    host.attach("home", "vault", SimNode::target(1e9, 80.0, 1));

    let mut net = Network::new(host, Capabilities::default());
    assert_eq!(net.score(&id("home")), 0.0);
    assert_eq!(net.score(&id("farm-1")), 0.0);
    assert_eq!(net.score(&id("darkweb")), 0.0);
    assert_eq!(net.score(&id("fortress")), 0.0);
    assert_eq!(net.score(&id("vault")), 0.0);
}

#[test]
fn valid_target_scores_strictly_positive() {
    let mut net = Network::new(two_target_world(), Capabilities::default());
    assert!(net.score(&id("alpha")) > 0.0);
}

#[test]
fn two_target_scenario_scores_and_ranks() {
    let mut net = Network::new(two_target_world(), Capabilities::default());

    assert_eq!(net.score(&id("alpha")), 100_000.0);
    assert_eq!(net.score(&id("beta")), 0.0);
    assert_eq!(net.top_targets(2).unwrap(), vec!["alpha"]);
}

#[test]
fn top_targets_is_sorted_and_truncated() {
    let host = SimHost::new("home");
    host.set_player(100, 0.0);
    host.attach("home", "low", SimNode::target(100_000.0, 10.0, 1));
    host.attach("home", "mid", SimNode::target(500_000.0, 10.0, 1));
    host.attach("home", "high", SimNode::target(900_000.0, 10.0, 1));

    let mut net = Network::new(host, Capabilities::default());
    assert_eq!(net.top_targets(2).unwrap(), vec!["high", "mid"]);
    assert_eq!(net.top_targets(10).unwrap(), vec!["high", "mid", "low"]);
    assert!(net.top_targets(0).unwrap().is_empty());
}

#[test]
fn best_target_falls_back_when_nothing_is_valid() {
    let host = SimHost::new("home");
    host.set_player(50, 0.0);
    let mut net = Network::new(host, Capabilities::default());
    assert_eq!(net.best_target(), "n00dles");
}

#[test]
fn best_target_honors_custom_fallback() {
    let host = SimHost::new("home");
    let config = ScanConfig {
        fallback_target: "joesguns".into(),
        ..Default::default()
    };
    let mut net = Network::with_config(host, Capabilities::default(), config);
    assert_eq!(net.best_target(), "joesguns");
}

#[test]
fn crack_invalidates_the_snapshot_cache() {
    let host = SimHost::new("home");
    host.set_player(50, 0.0);
    host.attach("home", "mill", SimNode::target(1e6, 5.0, 1).with_ports(1));
    host.install(PortProgram::BruteSsh.file_name());

    let caps = Capabilities::detect(&host);
    let mut net = Network::new(host, caps);

    // Prime the snapshot cache with the un-rooted state
    assert!(!net.server_data(&id("mill"), false).unwrap().rooted);

    assert!(net.crack(&id("mill")).unwrap());

    // No clock advance: only explicit invalidation can expose the new state
    assert!(net.server_data(&id("mill"), false).unwrap().rooted);
}

#[test]
fn crack_fails_without_enough_port_programs() {
    let host = SimHost::new("home");
    host.attach("home", "mill", SimNode::target(1e6, 5.0, 1).with_ports(2));
    host.install(PortProgram::BruteSsh.file_name());

    let caps = Capabilities::detect(&host);
    let mut net = Network::new(host, caps);

    assert!(!net.crack(&id("mill")).unwrap());
    assert_eq!(net.crackable().unwrap(), Vec::<NodeId>::new());
}

#[test]
fn crack_all_sweeps_the_topology() {
    let host = SimHost::new("home");
    host.set_player(50, 0.0);
    host.attach("home", "open-1", SimNode::target(1e6, 5.0, 1));
    host.attach("home", "open-2", SimNode::target(1e6, 5.0, 1).with_ports(1));
    host.attach("home", "sealed", SimNode::target(1e6, 5.0, 1).with_ports(5));
    host.install(PortProgram::BruteSsh.file_name());

    let caps = Capabilities::detect(&host);
    let mut net = Network::new(host, caps);

    let summary = net.crack_all().unwrap();
    assert_eq!(summary.cracked, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(net.rooted().unwrap().len(), 3); // home + the two cracked
}

#[test]
fn formulas_capability_switches_the_scoring_model() {
    let host = SimHost::new("home");
    host.set_player(100, 0.0);
    host.attach("home", "alpha", SimNode::target(1_000_000.0, 10.0, 1));
    host.install("Formulas.exe");

    let caps = Capabilities::detect(&host);
    assert!(caps.formulas);

    let mut net = Network::new(host, caps);
    // Sim weaken model: 10 * 4000ms / (1 + 100/100) = 20s → 1e6 / 20
    assert_eq!(net.score(&id("alpha")), 50_000.0);
}

#[test]
fn score_cache_outlives_the_snapshot_cache() {
    let mut net = Network::new(two_target_world(), Capabilities::default());

    let first = net.score(&id("alpha"));
    net.host().update_node(&id("alpha"), |n| n.max_money = 5_000_000.0);

    // Snapshot TTL (5s) has passed but the score TTL (30s) has not; the
    // memoized score is served stale by design.
    net.host().advance(10_000);
    assert_eq!(net.score(&id("alpha")), first);

    // Past the score TTL the new snapshot flows through.
    net.host().advance(25_000);
    assert_eq!(net.score(&id("alpha")), 500_000.0);
}

#[test]
fn scoring_report_rows_are_ordered_and_complete() {
    let host = SimHost::new("home");
    host.set_player(100, 0.0);
    host.attach("home", "mid", SimNode::target(500_000.0, 10.0, 5));
    host.attach("home", "high", SimNode::target(900_000.0, 10.0, 5));

    let mut net = Network::new(host, Capabilities::default());
    let report = net.scoring_report().unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].id, "high");
    assert_eq!(report[0].max_money, 900_000.0);
    assert_eq!(report[0].difficulty, 10.0);
    assert_eq!(report[0].required_skill, 5);
    assert!(!report[0].rooted);
    assert!(report[0].score >= report[1].score);
}

#[test]
fn network_stats_aggregate_the_world() {
    let host = SimHost::new("home");
    host.set_player(50, 0.0);
    host.attach("home", "alpha", SimNode::target(1_000_000.0, 10.0, 1).with_ram(8.0, 2.0));
    host.attach("home", "beta", SimNode::target(500_000.0, 5.0, 1_000));

    let mut net = Network::new(host, Capabilities::default());
    let stats = net.network_stats().unwrap();

    assert_eq!(stats.total_nodes, 3);
    assert_eq!(stats.rooted_nodes, 1); // home
    assert_eq!(stats.hackable_nodes, 1); // alpha only; beta's skill gate
    assert_eq!(stats.crackable_nodes, 1);
    assert_eq!(stats.total_ram, 40.0); // 32 on home + 8 on alpha
    assert_eq!(stats.max_money, 1_500_000.0);
}

#[test]
fn console_reports_reach_the_host() {
    let mut net = Network::new(two_target_world(), Capabilities::default());
    net.print_top_targets(5).unwrap();

    let lines = net.host().console_lines();
    assert!(lines.iter().any(|l| l.contains("TOP TARGETS")));
    assert!(lines.iter().any(|l| l.contains("alpha")));
}
