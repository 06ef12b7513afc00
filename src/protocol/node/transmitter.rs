//! Worker side of the node: performs the blocking bus writes handed over by
//! the dispatch runner and publishes their outcome.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use futures_util::Future;

use crate::infra::dispatch::DispatchWorker;
use crate::protocol::transport::{can_frame::CanFrame, traits::can_bus::CanBus};

/// Outcome of one bus write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransmitReport<E> {
    /// Frame that was written (or refused).
    pub frame: CanFrame,
    /// Result returned by the CAN controller.
    pub result: Result<(), E>,
}

impl<E> TransmitReport<E> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Channel on which transmit outcomes are published.
pub type ReportChannel<E, const REPORT_CAP: usize> =
    Channel<CriticalSectionRawMutex, TransmitReport<E>, REPORT_CAP>;

/// Writes frames on the bus from the dispatch runner.
///
/// Failures are never retried. They are logged and, when a report channel is
/// provided, published without blocking; reports are dropped if the channel
/// is full.
pub struct FrameTransmitter<'a, C: CanBus, const REPORT_CAP: usize> {
    can_bus: C,
    reports: Option<&'a ReportChannel<C::Error, REPORT_CAP>>,
}

impl<'a, C: CanBus, const REPORT_CAP: usize> FrameTransmitter<'a, C, REPORT_CAP> {
    pub fn new(can_bus: C, reports: Option<&'a ReportChannel<C::Error, REPORT_CAP>>) -> Self {
        Self { can_bus, reports }
    }

    /// Write one frame on the bus.
    pub async fn send_can_message(&mut self, frame: &CanFrame) -> Result<(), C::Error> {
        self.can_bus.send(frame).await
    }

    fn publish(&self, report: TransmitReport<C::Error>) {
        if let Some(reports) = self.reports {
            if reports.try_send(report).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Report channel full, transmit report dropped");
            }
        }
    }
}

impl<'a, C: CanBus, const REPORT_CAP: usize> DispatchWorker<CanFrame>
    for FrameTransmitter<'a, C, REPORT_CAP>
{
    fn execute<'b>(&'b mut self, job: CanFrame) -> impl Future<Output = ()> + 'b {
        async move {
            let result = self.send_can_message(&job).await;

            match &result {
                Ok(()) => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Frame {=u32:#x} sent", job.id.raw());
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("CAN write failed for frame {=u32:#x}", job.id.raw());
                }
            }

            self.publish(TransmitReport { frame: job, result });
        }
    }
}
