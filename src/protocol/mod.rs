//! Node protocol: wire messages, the node agent, and the CAN transport.
pub mod messages;
pub mod node;
pub mod transport;
