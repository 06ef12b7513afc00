//! CAN transport layer: frame representation, identifiers, and the bus and
//! clock abstraction traits implemented by the firmware.

pub mod can_frame;
pub mod can_id;
pub mod traits;
