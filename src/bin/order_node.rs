use anyhow::Context;
use order_cluster::address::resolve_advertise_ip;
use order_cluster::bus::{self, CommandBus};
use order_cluster::membership::service::MembershipService;
use order_cluster::store::OrderStore;
use order_cluster::store::handlers::register_store_handlers;
use order_cluster::store::protocol::DEFAULT_ORDERS_FILE;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const JOIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut gossip_port: u16 = 5000;
    let mut seed_nodes: Vec<SocketAddr> = vec![];
    let mut advertise_override: Option<Ipv4Addr> = None;
    let mut orders_file = PathBuf::from(DEFAULT_ORDERS_FILE);

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
            "--orders-file" => {
                orders_file = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: {} [--gossip-port <port>] [--seed <addr:port>] [--advertise <ip>] [--orders-file <path>]",
                    args[0]
                );
                eprintln!("The bus listener binds on <gossip-port + 1000>.");
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    // Resolved once, immutable for the process lifetime. No usable address
    // means the node cannot form a cluster; abort before touching anything.
    let advertise_ip = match advertise_override {
        Some(ip) => ip,
        None => resolve_advertise_ip()
            .context("no advertisable IPv4 address found (non-loopback, non-10.x)")?,
    };

    let gossip_addr = SocketAddr::new(IpAddr::V4(advertise_ip), gossip_port);
    let bus_addr = SocketAddr::new(IpAddr::V4(advertise_ip), gossip_port + 1000);

    tracing::info!("Starting order node, advertising {}", advertise_ip);
    if seed_nodes.is_empty() {
        tracing::info!("Starting as seed node (founder)");
    } else {
        tracing::info!("Seed nodes: {:?}", seed_nodes);
    }

    // 1. Membership (UDP gossip):
    let membership = MembershipService::new(gossip_addr, bus_addr, seed_nodes).await?;
    tracing::info!("Node ID: {:?}", membership.local_node.id);

    membership.clone().start().await;
    membership.wait_ready(JOIN_TIMEOUT).await?;
    tracing::info!("Cluster join complete");

    // 2. Orders document: the store treats a missing file as a read failure,
    //    so a fresh deployment gets an empty collection seeded here.
    if !orders_file.exists() {
        tokio::fs::write(&orders_file, b"[]")
            .await
            .with_context(|| format!("seeding {}", orders_file.display()))?;
        tracing::info!("Seeded empty orders document at {}", orders_file.display());
    }

    // 3. Bus handlers:
    let bus = CommandBus::new(membership);
    register_store_handlers(&bus, OrderStore::new(&orders_file)).await;

    // 4. Bus deliver endpoint:
    let app = bus::handlers::router(bus.registry());
    let listener = tokio::net::TcpListener::bind(bus_addr).await?;

    tracing::info!("Order node accepting bus deliveries on {}", bus_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app).await?;

    Ok(())
}
