//! Live channel networking: wire DTOs and the WebSocket client.

pub mod socket;
pub mod types;
