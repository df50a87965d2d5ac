use anyhow::Context;
use order_cluster::address::resolve_advertise_ip;
use order_cluster::bus::{self, CommandBus};
use order_cluster::gateway;
use order_cluster::membership::service::MembershipService;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

const JOIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut gossip_port: u16 = 5001;
    let mut seed_nodes: Vec<SocketAddr> = vec![];
    let mut advertise_override: Option<Ipv4Addr> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--gossip-port" => {
                gossip_port = args[i + 1].parse()?;
                i += 2;
            }
            "--seed" => {
                seed_nodes.push(args[i + 1].parse()?);
                i += 2;
            }
            "--advertise" => {
                advertise_override = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: {} [--gossip-port <port>] [--seed <addr:port>] [--advertise <ip>]",
                    args[0]
                );
                eprintln!("The HTTP listener (public routes + bus deliveries) binds on <gossip-port + 1000>.");
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    let advertise_ip = match advertise_override {
        Some(ip) => ip,
        None => resolve_advertise_ip()
            .context("no advertisable IPv4 address found (non-loopback, non-10.x)")?,
    };

    let gossip_addr = SocketAddr::new(IpAddr::V4(advertise_ip), gossip_port);
    let http_addr = SocketAddr::new(IpAddr::V4(advertise_ip), gossip_port + 1000);

    tracing::info!("Starting gateway node, advertising {}", advertise_ip);
    if seed_nodes.is_empty() {
        tracing::info!("Starting as seed node (founder)");
    } else {
        tracing::info!("Seed nodes: {:?}", seed_nodes);
    }

    // 1. Membership (UDP gossip). The public listener doubles as the bus
    //    deliver endpoint, so it is advertised as this node's bus address.
    let membership = MembershipService::new(gossip_addr, http_addr, seed_nodes).await?;
    tracing::info!("Node ID: {:?}", membership.local_node.id);

    membership.clone().start().await;
    membership.wait_ready(JOIN_TIMEOUT).await?;
    tracing::info!("Cluster join complete");

    // 2. Bus + HTTP router (public routes merged with the deliver endpoint):
    let bus = CommandBus::new(membership);
    let app = gateway::router(bus.clone()).merge(bus::handlers::router(bus.registry()));

    let listener = tokio::net::TcpListener::bind(http_addr).await?;

    tracing::info!("Gateway listening on {}", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app).await?;

    Ok(())
}
