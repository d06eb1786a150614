//! Live channel client for real-time communication with the server.
//!
//! Manages the WebSocket lifecycle: connection with the CSRF token as a
//! query parameter, reconnection with exponential backoff, and dispatch of
//! inbound events. Confirmation requests are handed to the payment widget
//! through a channel; everything else the widget needs flows back out via
//! [`EventSender`].
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use crate::net::types::Event;
#[cfg(feature = "hydrate")]
use crate::state::session::{ConnectionStatus, SessionState};
#[cfg(feature = "hydrate")]
use leptos::prelude::Update;

/// Cloneable handle for sending events to the server over the live socket.
///
/// Inert until the socket client is spawned, and always inert on the server;
/// [`EventSender::send`] reports delivery into the outbound queue, not
/// delivery to the server.
#[derive(Clone, Debug, Default)]
pub struct EventSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl EventSender {
    #[cfg(feature = "hydrate")]
    fn new(tx: futures::channel::mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Queue an event for the server. Returns `false` if there is no active
    /// connection or the event cannot be serialized.
    pub fn send(&self, event: &Event) -> bool {
        #[cfg(feature = "hydrate")]
        {
            let Some(tx) = &self.tx else {
                return false;
            };
            match serde_json::to_string(event) {
                Ok(json) => tx.unbounded_send(json).is_ok(),
                Err(_) => false,
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = event;
            false
        }
    }
}

/// Actions the dispatcher derives from inbound server events.
///
/// Kept separate from the signal-touching dispatch path so event routing is
/// testable without a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    /// The server requests a payment confirmation for this charge token.
    ConfirmPayment { client_secret: String },
}

/// Route an inbound event to its action, if it is one this client handles.
///
/// Unknown events are ignored; a `confirm_payment` event without a usable
/// token yields `None` (logged and dropped by the dispatcher).
pub fn parse_inbound(event: &Event) -> Option<Inbound> {
    match event.event.as_str() {
        crate::net::types::CONFIRM_PAYMENT => {
            let client_secret = event.client_secret()?.to_owned();
            Some(Inbound::ConfirmPayment { client_secret })
        }
        _ => None,
    }
}

/// Build the WebSocket URL for the live endpoint.
///
/// Scheme follows the page (`https` pages get `wss`); the CSRF token rides
/// along as a query parameter when present.
pub fn socket_url(location: &str, host: &str, csrf_token: Option<&str>) -> String {
    let proto = if location.starts_with("https") { "wss" } else { "ws" };
    match csrf_token {
        Some(token) => format!("{proto}://{host}/live/websocket?_csrf_token={token}"),
        None => format!("{proto}://{host}/live/websocket"),
    }
}

/// Hand-off slot for the confirmation-request stream.
///
/// The socket client pushes charge tokens into the sending half; the payment
/// widget takes the receiving half out of this slot exactly once, at mount.
#[cfg(feature = "hydrate")]
#[derive(Clone)]
pub struct ConfirmRequests(
    std::rc::Rc<std::cell::RefCell<Option<futures::channel::mpsc::UnboundedReceiver<String>>>>,
);

#[cfg(feature = "hydrate")]
impl ConfirmRequests {
    fn new(rx: futures::channel::mpsc::UnboundedReceiver<String>) -> Self {
        Self(std::rc::Rc::new(std::cell::RefCell::new(Some(rx))))
    }

    /// Take the request stream. Returns `None` if it was already claimed.
    pub fn take(&self) -> Option<futures::channel::mpsc::UnboundedReceiver<String>> {
        self.0.borrow_mut().take()
    }
}

/// Spawn the live channel client as a local async task.
///
/// Connects to the server, dispatches inbound events, and reconnects on
/// disconnect with exponential backoff. Returns the outbound sender and the
/// hand-off slot for confirmation requests.
#[cfg(feature = "hydrate")]
pub fn spawn_socket_client(
    session: leptos::prelude::RwSignal<SessionState>,
) -> (EventSender, ConfirmRequests) {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<String>();
    let (confirm_tx, confirm_rx) = mpsc::unbounded::<String>();

    leptos::task::spawn_local(socket_loop(session, confirm_tx, rx));

    (EventSender::new(tx), ConfirmRequests::new(confirm_rx))
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "hydrate")]
async fn socket_loop(
    session: leptos::prelude::RwSignal<SessionState>,
    confirm_tx: futures::channel::mpsc::UnboundedSender<String>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    let rx = Rc::new(RefCell::new(rx));
    let csrf_token = crate::util::page_meta::csrf_token();
    let mut backoff_ms: u32 = 1000;
    let max_backoff_ms: u32 = 10_000;

    loop {
        session.update(|s| s.connection_status = ConnectionStatus::Connecting);

        let location = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_else(|| "localhost:3000".to_owned());
        let url = socket_url(&location, &host, csrf_token.as_deref());

        match connect_and_run(&url, session, &confirm_tx, &rx).await {
            Ok(()) => {
                leptos::logging::log!("live socket disconnected cleanly");
            }
            Err(e) => {
                leptos::logging::warn!("live socket error: {e}");
            }
        }

        session.update(|s| s.connection_status = ConnectionStatus::Disconnected);

        // Exponential backoff before reconnect.
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = (backoff_ms * 2).min(max_backoff_ms);
    }
}

/// Connect to the WebSocket and process messages until disconnect.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    session: leptos::prelude::RwSignal<SessionState>,
    confirm_tx: &futures::channel::mpsc::UnboundedSender<String>,
    rx: &std::rc::Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<String>>>,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    session.update(|s| s.connection_status = ConnectionStatus::Connected);

    // Forward outgoing messages from our channel to the WS.
    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        use futures::SinkExt;
        while let Some(msg) = rx_borrow.next().await {
            if ws_write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    };

    // Receive loop: process incoming events.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<Event>(&text) {
                    Ok(event) => dispatch_event(&event, confirm_tx),
                    Err(e) => {
                        leptos::logging::warn!("malformed event dropped: {e}");
                    }
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("live socket recv error: {e}");
                    break;
                }
            }
        }
    };

    // Run both tasks; when either finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}

/// Dispatch an inbound event to its consumer.
#[cfg(feature = "hydrate")]
fn dispatch_event(event: &Event, confirm_tx: &futures::channel::mpsc::UnboundedSender<String>) {
    match parse_inbound(event) {
        Some(Inbound::ConfirmPayment { client_secret }) => {
            if confirm_tx.unbounded_send(client_secret).is_err() {
                leptos::logging::warn!("confirmation request dropped: widget gone");
            }
        }
        None if event.event == crate::net::types::CONFIRM_PAYMENT => {
            leptos::logging::warn!("confirm_payment without client_secret dropped");
        }
        None => {}
    }
}
