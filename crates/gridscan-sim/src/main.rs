//! gridscan demo
//!
//! Builds a small simulated world, detects capabilities, cracks what it can
//! and prints the scoring report the way an in-game controller would.

use anyhow::Result;
use gridscan_core::{Capabilities, HostApi, LogLevel, PortProgram, ScriptLogger};
use gridscan_net::Network;
use gridscan_sim::{SimHost, SimNode};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn build_world() -> SimHost {
    let host = SimHost::new("home");
    host.set_player(120, 25_000.0);

    host.attach("home", "n00dles", SimNode::target(70_000.0, 1.0, 1));
    host.attach("home", "foodnstuff", SimNode::target(2_000_000.0, 4.0, 1).with_ports(0));
    host.attach("foodnstuff", "joesguns", SimNode::target(2_500_000.0, 15.0, 10).with_ports(1));
    host.attach("joesguns", "phantasy", SimNode::target(24_000_000.0, 20.0, 100).with_ports(2));
    host.attach("joesguns", "omega-net", SimNode::target(60_000_000.0, 30.0, 200).with_ports(3));
    host.attach("home", "darkweb", SimNode::default().with_ram(16.0, 0.0));

    host.install(PortProgram::BruteSsh.file_name());
    host.install(PortProgram::FtpCrack.file_name());
    host
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut log = ScriptLogger::new("demo", LogLevel::Debug);

    let host = build_world();
    let caps = Capabilities::detect(&host);
    log.info(
        host.now_ms(),
        format!(
            "capabilities: {} ports, formulas={}",
            caps.ports_available(),
            caps.formulas
        ),
    );

    let mut net = Network::new(host, caps);

    let summary = net.crack_all()?;
    log.success(
        net.host().now_ms(),
        format!("crack sweep: {} gained, {} sealed", summary.cracked, summary.failed),
    );

    net.print_stats()?;
    net.print_top_targets(5)?;
    info!(best = %net.best_target(), "best target selected");

    for line in net.host().console_lines() {
        println!("{line}");
    }
    Ok(())
}
