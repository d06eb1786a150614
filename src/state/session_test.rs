use super::*;

#[test]
fn default_session_is_disconnected() {
    let session = SessionState::default();
    assert_eq!(session.connection_status, ConnectionStatus::Disconnected);
    assert!(!session.is_connected());
}

#[test]
fn connecting_is_not_connected() {
    let session = SessionState { connection_status: ConnectionStatus::Connecting };
    assert!(!session.is_connected());
}

#[test]
fn connected_status_reports_connected() {
    let session = SessionState { connection_status: ConnectionStatus::Connected };
    assert!(session.is_connected());
}
