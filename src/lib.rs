//! `coffre-can` library: a CAN node agent for alarm enclosures in a `no_std`
//! environment. The crate exposes the infrastructure module (dispatch engine),
//! protocol logic (frame construction, node agent) and the transport
//! abstractions the firmware plugs its CAN controller into.
#![no_std]
//==================================================================================
/// Domain and low-level errors (identifier construction, frame building,
/// scheduling).
pub mod error;
/// Infrastructure shared by the protocol layer: the single-worker dispatch engine.
pub mod infra;
/// Node protocol: wire messages, the node agent and the CAN transport contract.
pub mod protocol;
//==================================================================================
