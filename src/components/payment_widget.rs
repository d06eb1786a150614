//! Hosted card entry widget.
//!
//! DESIGN
//! ======
//! The component renders the fixed collaborator regions (card mount node,
//! error region, pay trigger) and, in the browser, drives the widget
//! lifecycle: initialize the processor client, create and mount the hosted
//! element with the theme snapshotted at creation, track validity on every
//! change notification, and answer each server confirmation request with
//! exactly one outcome report. All decisions live in
//! [`crate::state::payment`]; this file only wires them to the page.

use leptos::prelude::*;

use crate::state::payment::PaymentState;

/// Payment entry widget.
///
/// `publishable_key` is rendered onto the mount node as `data-stripe-key`;
/// the widget reads it back from the node at mount, so the key observed is
/// always the one in the document.
#[component]
pub fn PaymentWidget(#[prop(into)] publishable_key: String) -> impl IntoView {
    let payment = expect_context::<RwSignal<PaymentState>>();
    let node = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    wire_hosted_element(payment, node);

    let error_text = move || payment.get().ui.error_text.unwrap_or_default();
    let error_hidden = move || payment.get().ui.error_text.is_none();
    let pay_disabled = move || !payment.get().ui.pay_enabled;

    view! {
        <div class="payment-widget">
            <div
                id="card-element"
                class="payment-widget__card"
                data-stripe-key=publishable_key
                node_ref=node
            ></div>
            <div id="card-error-display" class="payment-widget__error" class:hidden=error_hidden>
                <span id="card-error-text">{error_text}</span>
            </div>
            <button id="pay-button" class="payment-widget__pay" disabled=pay_disabled>
                "Pay now"
            </button>
        </div>
    }
}

/// Mount the hosted element once the node exists, and release it on cleanup.
#[cfg(feature = "hydrate")]
fn wire_hosted_element(payment: RwSignal<PaymentState>, node: NodeRef<leptos::html::Div>) {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use crate::net::socket::{ConfirmRequests, EventSender};
    use crate::state::payment::Phase;

    let requests = expect_context::<ConfirmRequests>();
    let sender = expect_context::<RwSignal<EventSender>>();

    let (stop_tx, stop_rx) = futures::channel::oneshot::channel::<()>();
    // The cleanup callback must be Send + Sync; the receiving half stays local.
    let stop_tx = Arc::new(Mutex::new(Some(stop_tx)));
    let stop_rx = Rc::new(RefCell::new(Some(stop_rx)));

    Effect::new(move || {
        let Some(el) = node.get() else {
            return;
        };
        // Mount exactly once per widget instance.
        if payment.get_untracked().phase != Phase::Unmounted {
            return;
        }
        let Some(confirm_rx) = requests.take() else {
            leptos::logging::warn!("confirmation request stream already claimed");
            return;
        };
        let Some(stop) = stop_rx.borrow_mut().take() else {
            return;
        };

        payment.update(|p| p.begin_mount());
        leptos::task::spawn_local(run_widget(payment, sender, el.into(), confirm_rx, stop));
    });

    on_cleanup(move || {
        if let Some(stop) = stop_tx.lock().ok().and_then(|mut slot| slot.take()) {
            let _ = stop.send(());
        }
    });
}

/// Widget task: mount the hosted element, then serve confirmation requests
/// until the component is torn down.
#[cfg(feature = "hydrate")]
async fn run_widget(
    payment: RwSignal<PaymentState>,
    sender: RwSignal<crate::net::socket::EventSender>,
    el: web_sys::Element,
    mut confirm_rx: futures::channel::mpsc::UnboundedReceiver<String>,
    mut stop: futures::channel::oneshot::Receiver<()>,
) {
    use futures::StreamExt;
    use futures::future::Either;

    use crate::pay::stripe;
    use crate::state::payment::{ConfirmDecision, parse_card_change};
    use crate::util::theme;

    let Some(key) = el.get_attribute("data-stripe-key") else {
        leptos::logging::error!("payment widget mount node is missing data-stripe-key");
        return;
    };

    // Suspension point: processor client initialization. Failure here is an
    // unrecoverable startup fault for the widget; it stays unmounted.
    let client = match stripe::load(&key).await {
        Ok(client) => client,
        Err(e) => {
            leptos::logging::error!("payment client initialization failed: {e:?}");
            payment.update(|p| p.unmounted());
            return;
        }
    };

    // Theme is snapshotted here and baked into the element's style.
    let style = theme::card_style(theme::snapshot());
    let card = stripe::create_card_element(&client, &style, &el);
    payment.update(|p| p.mounted());

    // Change notifications arrive in emission order on the UI task queue.
    let _change = stripe::on_change(&card, move |event| {
        let change = parse_card_change(&event);
        payment.update(|p| p.apply_card_change(&change));
    });

    loop {
        let next = futures::future::select(confirm_rx.next(), &mut stop).await;
        let client_secret = match next {
            Either::Left((Some(client_secret), _)) => client_secret,
            Either::Left((None, _)) | Either::Right(_) => break,
        };

        let decision = {
            let mut state = payment.get_untracked();
            let decision = state.begin_confirmation(&client_secret);
            payment.set(state);
            decision
        };

        let outcome = match decision {
            ConfirmDecision::Proceed { client_secret } => {
                // Suspension point: the confirmation round trip. No timeout,
                // no cancellation; it runs until the processor answers.
                // Tokens arriving meanwhile are answered with a busy Failure
                // without touching the in-flight attempt.
                let mut confirm =
                    Box::pin(stripe::confirm_card_payment(&client, &card, &client_secret));
                let result = loop {
                    match futures::future::select(confirm.as_mut(), confirm_rx.next()).await {
                        Either::Left((result, _)) => break result,
                        Either::Right((Some(newcomer), _)) => {
                            reject_while_confirming(payment, sender, &newcomer);
                        }
                        Either::Right((None, _)) => break confirm.await,
                    }
                };
                let mut state = payment.get_untracked();
                let outcome = state.finish_confirmation(result);
                payment.set(state);
                outcome
            }
            ConfirmDecision::Reject { outcome } => outcome,
        };

        if !sender.get_untracked().send(&outcome.into_event()) {
            leptos::logging::warn!("outcome report could not be queued: no live connection");
        }
    }

    // Terminal: release the hosted element and stop processing events.
    stripe::release(&card);
    payment.update(|p| p.unmounted());
}

/// Answer a confirmation request that arrived while another one is in
/// flight: one busy Failure report, no processor contact.
#[cfg(feature = "hydrate")]
fn reject_while_confirming(
    payment: RwSignal<PaymentState>,
    sender: RwSignal<crate::net::socket::EventSender>,
    client_secret: &str,
) {
    use crate::state::payment::ConfirmDecision;

    let decision = {
        let mut state = payment.get_untracked();
        let decision = state.begin_confirmation(client_secret);
        payment.set(state);
        decision
    };

    // The phase is `Confirming` here, so the guard always rejects.
    if let ConfirmDecision::Reject { outcome } = decision {
        if !sender.get_untracked().send(&outcome.into_event()) {
            leptos::logging::warn!("outcome report could not be queued: no live connection");
        }
    }
}
