//! Wire messages exchanged by enclosure nodes. Every message is a single
//! standard data frame with a one-byte payload:
//!
//! | Message   | Identifier      | Payload       |
//! |-----------|-----------------|---------------|
//! | Ping      | `node`          | `[node]`      |
//! | Detection | `node + 10`     | `[0x01]`      |
//! | Disarmed  | `node + 10`     | `[0xFF]`      |
//!
//! The layout must match peer nodes bit for bit.
use crate::protocol::transport::{
    can_frame::{CanFrame, FrameKind, MAX_CAN_PAYLOAD},
    can_id::CanId,
};
use embedded_can::{Id, StandardId};

/// Interval between two liveness pings (ms).
pub const PING_PERIOD_MS: u64 = 1000;

/// Offset added to the node identifier for alarm signal frames.
pub const SIGNAL_ID_OFFSET: u8 = 10;

/// Payload byte announcing an intrusion.
pub const DETECTION_PAYLOAD: u8 = 0x01;

/// Payload byte announcing that the enclosure has been disarmed.
pub const DISARMED_PAYLOAD: u8 = 0xFF;

//==================================================================================NODE_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Address of a node on the bus, assigned by the firmware and unique per bus.
///
/// One byte: the identifier is echoed in the ping payload, and
/// `u8::MAX + SIGNAL_ID_OFFSET` still sits well below the 11-bit ceiling.
pub struct NodeId(u8);

impl NodeId {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Identifier used by this node's ping frames.
    pub const fn ping_id(&self) -> CanId {
        node_standard_id(self.0 as u16)
    }

    /// Identifier used by this node's detection and disarm frames.
    pub const fn signal_id(&self) -> CanId {
        node_standard_id(self.0 as u16 + SIGNAL_ID_OFFSET as u16)
    }
}

impl From<u8> for NodeId {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

//==================================================================================ALARM_SIGNAL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// One-shot alarm events reported by a node.
pub enum AlarmSignal {
    /// Intrusion detected.
    Detection,
    /// Enclosure disarmed.
    Disarmed,
}

impl AlarmSignal {
    pub const fn payload(&self) -> u8 {
        match self {
            AlarmSignal::Detection => DETECTION_PAYLOAD,
            AlarmSignal::Disarmed => DISARMED_PAYLOAD,
        }
    }
}

//==================================================================================BUILDERS
/// Builds the liveness ping of `node`.
pub fn ping_frame(node: NodeId) -> CanFrame {
    single_byte_frame(node.ping_id(), node.raw())
}

/// Builds the alarm signal frame of `node`.
pub fn signal_frame(node: NodeId, signal: AlarmSignal) -> CanFrame {
    single_byte_frame(node.signal_id(), signal.payload())
}

// Node-derived raw ids stay below 0x10A, so the `None` arm is never taken.
const fn node_standard_id(raw: u16) -> CanId {
    match StandardId::new(raw) {
        Some(id) => CanId(Id::Standard(id)),
        None => CanId(Id::Standard(StandardId::MAX)),
    }
}

fn single_byte_frame(id: CanId, byte: u8) -> CanFrame {
    let mut data = [0u8; MAX_CAN_PAYLOAD];
    data[0] = byte;
    CanFrame {
        id,
        data,
        len: 1,
        kind: FrameKind::Data,
    }
}
