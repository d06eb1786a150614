//! Live channel session state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Connection status of the live channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Session-level state: the live channel's connection status.
///
/// The channel handle itself is owned by the socket task; components only
/// observe its status here.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub connection_status: ConnectionStatus,
}

impl SessionState {
    /// Whether the page currently has a live connection to the server.
    pub fn is_connected(&self) -> bool {
        self.connection_status == ConnectionStatus::Connected
    }
}
