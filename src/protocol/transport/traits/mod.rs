//! Abstraction traits used by the transport layer (CAN bus and dispatch clock).
pub mod can_bus;
pub mod dispatch_clock;
