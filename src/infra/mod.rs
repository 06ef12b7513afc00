//! Infrastructure shared by the protocol layer.
pub mod dispatch;
