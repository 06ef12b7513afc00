//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (CAN ID construction, frame
//! building, task scheduling, node operations).
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a CAN identifier.
pub enum CanIdBuildError {
    /// Raw value does not fit in the 11-bit (standard) or 29-bit (extended) range.
    #[error("Identifier {raw:#x} out of range")]
    OutOfRange { raw: u32 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while assembling a classic CAN frame.
pub enum FrameBuildError {
    /// Classic CAN carries at most eight payload bytes.
    #[error("Payload too long: {len} bytes (max 8)")]
    PayloadTooLong { len: usize },
    /// Remote frames request at most eight bytes.
    #[error("Invalid DLC for remote frame: {dlc}")]
    InvalidDlc { dlc: usize },
    /// Unable to build the CAN identifier.
    #[error(transparent)]
    Id(#[from] CanIdBuildError),
}

//==================================================================================DISPATCH_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors reported when submitting work to the dispatch engine.
pub enum DispatchError {
    /// Every task slot is taken.
    #[error("Dispatch queue is full")]
    QueueFull,
    /// The engine has been shut down and refuses new work.
    #[error("Dispatch engine is closed")]
    Closed,
    /// A periodic task needs a non-zero period.
    #[error("Periodic task requires a non-zero period")]
    ZeroPeriod,
}

//==================================================================================NODE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors returned by the node agent operations.
pub enum NodeError {
    /// The frame could not be handed over to the dispatch engine.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
    /// The agent is shutting down and accepts no new work.
    #[error("Node agent is shutting down")]
    ShuttingDown,
}
