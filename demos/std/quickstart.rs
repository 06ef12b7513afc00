//! # Quickstart Demo
//!
//! Minimal demo of a coffre-can node on the host:
//! - Build the node messages
//! - Run the dispatch runner next to the application code
//! - Ping, raise an intrusion, disarm, then shut down
//!
//! The bus prints frames instead of driving a transceiver.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use coffre_can::infra::dispatch::engine::DispatchEngine;
use coffre_can::protocol::messages::{ping_frame, signal_frame, AlarmSignal, NodeId};
use coffre_can::protocol::node::transmitter::ReportChannel;
use coffre_can::protocol::node::{NodeService, NodeServiceParts};
use coffre_can::protocol::transport::{
    can_frame::CanFrame,
    traits::{can_bus::CanBus, dispatch_clock::DispatchClock},
};
use embassy_sync::channel::Channel;
use tokio::time::{sleep, Duration, Instant};

/// Bus printing every frame it is asked to write.
struct PrintBus {
    origin: Instant,
}

impl CanBus for PrintBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        println!(
            "   [{:>5} ms] TX id={:#05x} len={} data={:02X?}",
            self.origin.elapsed().as_millis(),
            frame.id.raw(),
            frame.len,
            frame.payload()
        );
        Ok(())
    }

    async fn recv(&mut self) -> Result<CanFrame, Self::Error> {
        std::future::pending().await
    }
}

struct TokioClock {
    origin: Instant,
}

impl DispatchClock for TokioClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    async fn delay_ms(&mut self, millis: u64) {
        sleep(Duration::from_millis(millis)).await;
    }
}

#[tokio::main]
async fn main() {
    println!("=== coffre-can Quickstart ===\n");

    // ======================================================================
    // 1. Node messages
    // ======================================================================
    let node = NodeId::new(2);
    println!("1. Messages of node {}", node.raw());
    for (name, frame) in [
        ("ping", ping_frame(node)),
        ("detection", signal_frame(node, AlarmSignal::Detection)),
        ("disarmed", signal_frame(node, AlarmSignal::Disarmed)),
    ] {
        println!(
            "   {:<9} id={:#05x} data={:02X?}",
            name,
            frame.id.raw(),
            frame.payload()
        );
    }

    // ======================================================================
    // 2. Run the node
    // ======================================================================
    println!("\n2. Running the node for 3.5 s");

    let origin = Instant::now();
    let engine: DispatchEngine<CanFrame, 8> = DispatchEngine::new();
    let reports: ReportChannel<(), 8> = Channel::new();
    let NodeServiceParts { mut agent, runner } = NodeService::<_, _, 8, 8>::new(
        &engine,
        PrintBus { origin },
        TokioClock { origin },
        node,
        Some(&reports),
    )
    .into_parts();

    tokio::join!(runner.run(), async {
        agent.start_pinging().expect("ping cycle");
        sleep(Duration::from_millis(1500)).await;

        agent.send_detection_signal().expect("detection queued");
        sleep(Duration::from_millis(1000)).await;

        agent.send_disarmed_signal().expect("disarm queued");
        agent.stop_pinging();
        sleep(Duration::from_millis(1000)).await;

        agent.shutdown().await;
    });

    // ======================================================================
    // 3. Transmit reports
    // ======================================================================
    let mut sent = 0;
    while let Ok(report) = reports.try_receive() {
        if report.is_ok() {
            sent += 1;
        }
    }
    println!("\n3. {} frames written, runner stopped", sent);
}
