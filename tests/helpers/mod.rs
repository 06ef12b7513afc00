/// Test doubles to simulate the CAN bus and the dispatch clock during integration tests.
use coffre_can::protocol::transport::{
    can_frame::CanFrame,
    traits::{can_bus::CanBus, dispatch_clock::DispatchClock},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, Duration, Instant};

#[derive(Clone)]
#[allow(dead_code)]
/// In-memory CAN bus reproducing the `CanBus` trait behavior.
pub struct MockCanBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<CanFrame>>>,
    /// When set, every write is refused as if the TX mailbox were full.
    reject: Arc<AtomicBool>,
    /// Time spent inside each write.
    write_delay: Duration,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Construct a pair of interconnected buses (DUT ↔ host).
    pub fn create_pair() -> (Self, Self) {
        let (dut_tx, host_rx) = mpsc::unbounded_channel();
        let (host_tx, dut_rx) = mpsc::unbounded_channel();

        let dut_bus = Self {
            tx: dut_tx,
            rx: Arc::new(Mutex::new(dut_rx)),
            reject: Arc::new(AtomicBool::new(false)),
            write_delay: Duration::ZERO,
        };

        let host_bus = Self {
            tx: host_tx,
            rx: Arc::new(Mutex::new(host_rx)),
            reject: Arc::new(AtomicBool::new(false)),
            write_delay: Duration::ZERO,
        };

        (dut_bus, host_bus)
    }

    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    /// Shared switch making this endpoint refuse writes.
    pub fn reject_switch(&self) -> Arc<AtomicBool> {
        self.reject.clone()
    }

    /// Collect every frame received so far without waiting.
    pub async fn drain(&self) -> Vec<CanFrame> {
        let mut rx = self.rx.lock().await;
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        if !self.write_delay.is_zero() {
            sleep(self.write_delay).await;
        }
        if self.reject.load(Ordering::SeqCst) {
            return Err(());
        }
        self.tx.send(*frame).map_err(|_| ())?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<CanFrame, Self::Error> {
        let mut rx = self.rx.lock().await;
        rx.recv().await.ok_or(())
    }
}

#[allow(dead_code)]
/// Clock based on `tokio::time`; deterministic under `start_paused = true`.
pub struct MockClock {
    origin: Instant,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl DispatchClock for MockClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    async fn delay_ms(&mut self, millis: u64) {
        sleep(Duration::from_millis(millis)).await;
    }
}
