use super::*;
use crate::net::types::Event;

fn event(name: &str, payload: serde_json::Value) -> Event {
    Event { reference: None, event: name.to_owned(), payload }
}

// =============================================================
// socket_url
// =============================================================

#[test]
fn socket_url_uses_wss_for_https_pages() {
    let url = socket_url("https://shop.example/checkout", "shop.example", Some("tok"));
    assert_eq!(url, "wss://shop.example/live/websocket?_csrf_token=tok");
}

#[test]
fn socket_url_uses_ws_for_http_pages() {
    let url = socket_url("http://localhost:3000/", "localhost:3000", Some("tok"));
    assert_eq!(url, "ws://localhost:3000/live/websocket?_csrf_token=tok");
}

#[test]
fn socket_url_omits_missing_csrf_token() {
    let url = socket_url("http://localhost:3000/", "localhost:3000", None);
    assert_eq!(url, "ws://localhost:3000/live/websocket");
}

// =============================================================
// parse_inbound
// =============================================================

#[test]
fn confirm_payment_routes_to_widget() {
    let inbound = parse_inbound(&event(
        "confirm_payment",
        serde_json::json!({"client_secret": "sec_123"}),
    ));
    assert_eq!(inbound, Some(Inbound::ConfirmPayment { client_secret: "sec_123".to_owned() }));
}

#[test]
fn confirm_payment_without_token_is_dropped() {
    let inbound = parse_inbound(&event("confirm_payment", serde_json::json!({})));
    assert_eq!(inbound, None);
}

#[test]
fn unknown_events_are_ignored() {
    let inbound = parse_inbound(&event("presence_diff", serde_json::json!({"joins": {}})));
    assert_eq!(inbound, None);
}

// =============================================================
// EventSender
// =============================================================

#[test]
fn default_sender_reports_no_connection() {
    let sender = EventSender::default();
    assert!(!sender.send(&event("payment_error", serde_json::json!({"error": "x"}))));
}
