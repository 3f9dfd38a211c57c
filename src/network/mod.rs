//! Network module.
//!
//! Contains the Gateway (TCP listener), the per-client Connection and the
//! transport tuning capability connections require.

mod connection;
mod gateway;
mod socket;

pub use connection::Connection;
pub use gateway::Gateway;
pub use socket::TransportTuning;
