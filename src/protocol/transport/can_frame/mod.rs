//! In-memory representation of an outbound classic CAN frame.
use crate::error::FrameBuildError;
use crate::protocol::transport::can_id::{CanId, FrameFormat};

/// Maximum payload of a classic CAN frame.
pub const MAX_CAN_PAYLOAD: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Data frame or remote transmission request.
pub enum FrameKind {
    Data,
    Remote,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Classic CAN frame. `Copy` so every scheduled job owns its own bytes.
pub struct CanFrame {
    /// Standard or extended identifier.
    pub id: CanId,
    /// Payload buffer. Classic CAN frames always provide eight bytes.
    pub data: [u8; MAX_CAN_PAYLOAD],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
    /// Data or remote frame.
    pub kind: FrameKind,
}

impl CanFrame {
    /// Builds a data frame carrying `payload`.
    pub fn data_frame(id: CanId, payload: &[u8]) -> Result<Self, FrameBuildError> {
        if payload.len() > MAX_CAN_PAYLOAD {
            return Err(FrameBuildError::PayloadTooLong { len: payload.len() });
        }
        let mut data = [0u8; MAX_CAN_PAYLOAD];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            data,
            len: payload.len(),
            kind: FrameKind::Data,
        })
    }

    /// Builds a remote frame requesting `dlc` bytes.
    pub fn remote_frame(id: CanId, dlc: usize) -> Result<Self, FrameBuildError> {
        if dlc > MAX_CAN_PAYLOAD {
            return Err(FrameBuildError::InvalidDlc { dlc });
        }
        Ok(Self {
            id,
            data: [0u8; MAX_CAN_PAYLOAD],
            len: dlc,
            kind: FrameKind::Remote,
        })
    }

    /// Identifier width, derived from the identifier.
    pub fn format(&self) -> FrameFormat {
        self.id.format()
    }

    /// Valid payload bytes (empty for remote frames).
    pub fn payload(&self) -> &[u8] {
        match self.kind {
            FrameKind::Data => &self.data[..self.len],
            FrameKind::Remote => &[],
        }
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        Self::data_frame(CanId(id.into()), data).ok()
    }

    fn new_remote(id: impl Into<embedded_can::Id>, dlc: usize) -> Option<Self> {
        Self::remote_frame(CanId(id.into()), dlc).ok()
    }

    fn is_extended(&self) -> bool {
        self.id.is_extended()
    }

    fn is_remote_frame(&self) -> bool {
        self.kind == FrameKind::Remote
    }

    fn id(&self) -> embedded_can::Id {
        self.id.0
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
