//! Node agent: turns the enclosure's intents (stay alive, intrusion,
//! disarmed) into frames and hands them to the dispatch engine, so the caller
//! never waits on the bus.
//!
//! [`NodeService::into_parts`] splits the node into the [`NodeAgent`] used by
//! the application and the [`NodeRunner`] the firmware spawns on its executor:
//!
//! ```rust,ignore
//! static ENGINE: StaticCell<DispatchEngine<CanFrame, 8>> = StaticCell::new();
//!
//! let engine = ENGINE.init(DispatchEngine::new());
//! let parts = NodeService::<_, _, 8, 0>::new(engine, can, EmbassyClock, NodeId::new(2), None)
//!     .into_parts();
//! spawner.spawn(node_task(parts.runner))?;
//!
//! let mut agent = parts.agent;
//! agent.start_pinging()?;
//! agent.send_detection_signal()?;
//! ```
pub mod transmitter;

use crate::error::NodeError;
use crate::infra::dispatch::{
    engine::{DispatchEngine, DispatchHandle, DispatchRunner},
    TaskHandle,
};
use crate::protocol::messages::{ping_frame, signal_frame, AlarmSignal, NodeId, PING_PERIOD_MS};
use crate::protocol::transport::{
    can_frame::CanFrame,
    traits::{can_bus::CanBus, dispatch_clock::DispatchClock},
};
use transmitter::{FrameTransmitter, ReportChannel};

/// Runner executing the node's bus writes.
pub type NodeRunner<'a, C, K, const CAP: usize, const REPORT_CAP: usize> =
    DispatchRunner<'a, CanFrame, FrameTransmitter<'a, C, REPORT_CAP>, K, CAP>;

//==================================================================================PING_STATE
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Lifecycle of the liveness ping cycle.
pub enum PingState {
    /// No cycle scheduled.
    Idle,
    /// A cycle is scheduled under this handle.
    Pinging(TaskHandle),
    /// The agent is shutting down; no cycle can be started anymore.
    Stopping,
}

//==================================================================================SERVICE
/// Assembles a node from a dispatch engine, a bus and a clock.
pub struct NodeService<'a, C, K, const CAP: usize, const REPORT_CAP: usize>
where
    C: CanBus,
    K: DispatchClock,
{
    engine: &'a DispatchEngine<CanFrame, CAP>,
    transmitter: FrameTransmitter<'a, C, REPORT_CAP>,
    clock: K,
    node_id: NodeId,
}

impl<'a, C, K, const CAP: usize, const REPORT_CAP: usize> NodeService<'a, C, K, CAP, REPORT_CAP>
where
    C: CanBus,
    K: DispatchClock,
{
    /// `reports` optionally receives the outcome of every bus write.
    pub fn new(
        engine: &'a DispatchEngine<CanFrame, CAP>,
        can_bus: C,
        clock: K,
        node_id: NodeId,
        reports: Option<&'a ReportChannel<C::Error, REPORT_CAP>>,
    ) -> Self {
        Self {
            engine,
            transmitter: FrameTransmitter::new(can_bus, reports),
            clock,
            node_id,
        }
    }

    /// Split into the application-side agent and the runner to spawn.
    pub fn into_parts(self) -> NodeServiceParts<'a, C, K, CAP, REPORT_CAP> {
        NodeServiceParts {
            agent: NodeAgent {
                dispatch: self.engine.handle(),
                node_id: self.node_id,
                ping: PingState::Idle,
            },
            runner: self.engine.runner(self.transmitter, self.clock),
        }
    }
}

/// Bundle returned by [`NodeService::into_parts`].
pub struct NodeServiceParts<'a, C, K, const CAP: usize, const REPORT_CAP: usize>
where
    C: CanBus,
    K: DispatchClock,
{
    pub agent: NodeAgent<'a, CAP>,
    pub runner: NodeRunner<'a, C, K, CAP, REPORT_CAP>,
}

//==================================================================================AGENT
/// Application side of a node. Every operation returns without touching the bus.
///
/// Dropping the agent shuts the engine down; await [`shutdown`](Self::shutdown)
/// to also wait for the runner to return.
pub struct NodeAgent<'a, const CAP: usize> {
    dispatch: DispatchHandle<'a, CanFrame, CAP>,
    node_id: NodeId,
    ping: PingState,
}

impl<'a, const CAP: usize> NodeAgent<'a, CAP> {
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn ping_state(&self) -> PingState {
        self.ping
    }

    /// Start sending a liveness ping every [`PING_PERIOD_MS`].
    ///
    /// An active cycle is cancelled and replaced, so at most one cycle exists.
    pub fn start_pinging(&mut self) -> Result<(), NodeError> {
        match self.ping {
            PingState::Stopping => return Err(NodeError::ShuttingDown),
            PingState::Pinging(previous) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Replacing active ping cycle");
                self.dispatch.cancel(previous);
                self.ping = PingState::Idle;
            }
            PingState::Idle => {}
        }

        let handle = self
            .dispatch
            .run_every(PING_PERIOD_MS, ping_frame(self.node_id))?;
        self.ping = PingState::Pinging(handle);

        #[cfg(feature = "defmt")]
        defmt::info!("Node {} pinging", self.node_id.raw());
        Ok(())
    }

    /// Stop the ping cycle. Returns `false` when no cycle was active.
    ///
    /// A ping already being written completes; no further tick is produced.
    pub fn stop_pinging(&mut self) -> bool {
        match self.ping {
            PingState::Pinging(handle) => {
                self.ping = PingState::Idle;
                #[cfg(feature = "defmt")]
                defmt::info!("Node {} stopped pinging", self.node_id.raw());
                self.dispatch.cancel(handle)
            }
            PingState::Idle | PingState::Stopping => false,
        }
    }

    /// Queue the intrusion detection frame.
    pub fn send_detection_signal(&self) -> Result<(), NodeError> {
        self.send_signal(AlarmSignal::Detection)
    }

    /// Queue the disarm frame.
    pub fn send_disarmed_signal(&self) -> Result<(), NodeError> {
        self.send_signal(AlarmSignal::Disarmed)
    }

    fn send_signal(&self, signal: AlarmSignal) -> Result<(), NodeError> {
        if self.ping == PingState::Stopping {
            return Err(NodeError::ShuttingDown);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("Node {} queues {}", self.node_id.raw(), signal);
        self.dispatch.run_once(signal_frame(self.node_id, signal))?;
        Ok(())
    }

    /// Discard pending work, stop the runner and wait until it has returned.
    ///
    /// Once this resolves no frame of this node is written anymore. The
    /// runner must be driven for this future to complete.
    pub async fn shutdown(&mut self) {
        self.ping = PingState::Stopping;
        self.dispatch.shutdown();
        self.dispatch.join().await;
    }
}

impl<const CAP: usize> Drop for NodeAgent<'_, CAP> {
    fn drop(&mut self) {
        self.dispatch.shutdown();
    }
}
