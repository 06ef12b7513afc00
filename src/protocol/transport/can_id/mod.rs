//! Creation and inspection of the CAN identifiers carried by node frames.
//! Node traffic uses standard (11-bit) identifiers; extended identifiers are
//! accepted so the frame type can wrap anything a HAL driver hands over.
use crate::error::CanIdBuildError;
use embedded_can::{ExtendedId, Id, StandardId};

//==================================================================================FRAME_FORMAT
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Identifier width on the wire.
pub enum FrameFormat {
    /// 11-bit identifier (CAN 2.0A).
    Standard,
    /// 29-bit identifier (CAN 2.0B).
    Extended,
}

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Validated CAN identifier, standard or extended.
pub struct CanId(pub Id);

impl CanId {
    /// Builds a standard identifier, rejecting values above `0x7FF`.
    pub fn standard(raw: u16) -> Result<Self, CanIdBuildError> {
        StandardId::new(raw)
            .map(|id| Self(Id::Standard(id)))
            .ok_or(CanIdBuildError::OutOfRange { raw: raw as u32 })
    }

    /// Builds an extended identifier, rejecting values above `0x1FFF_FFFF`.
    pub fn extended(raw: u32) -> Result<Self, CanIdBuildError> {
        ExtendedId::new(raw)
            .map(|id| Self(Id::Extended(id)))
            .ok_or(CanIdBuildError::OutOfRange { raw })
    }

    /// Raw numeric value, whatever the format.
    pub fn raw(&self) -> u32 {
        match self.0 {
            Id::Standard(id) => id.as_raw() as u32,
            Id::Extended(id) => id.as_raw(),
        }
    }

    /// Identifier width.
    pub fn format(&self) -> FrameFormat {
        match self.0 {
            Id::Standard(_) => FrameFormat::Standard,
            Id::Extended(_) => FrameFormat::Extended,
        }
    }

    pub fn is_extended(&self) -> bool {
        self.format() == FrameFormat::Extended
    }
}

impl From<Id> for CanId {
    fn from(id: Id) -> Self {
        Self(id)
    }
}

impl From<CanId> for Id {
    fn from(id: CanId) -> Self {
        id.0
    }
}
