//! Checkout page hosting the payment widget.

use leptos::prelude::*;

use crate::components::payment_widget::PaymentWidget;
use crate::state::session::SessionState;

/// Checkout page: order summary region plus the card entry widget.
#[component]
pub fn CheckoutPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let connection_note = move || {
        if session.get().is_connected() {
            None
        } else {
            Some(view! {
                <p class="checkout-page__offline">
                    "Reconnecting to the store. Payment stays available once the connection is back."
                </p>
            })
        }
    };

    view! {
        <div class="checkout-page">
            <h1>"Checkout"</h1>
            {connection_note}
            <PaymentWidget publishable_key=publishable_key()/>
        </div>
    }
}

/// Publishable processor credential for this deployment.
///
/// The server renders it from the environment; the hydrating client reads
/// the same value back from the page metadata, so both sides agree on the
/// attribute they render.
fn publishable_key() -> String {
    #[cfg(feature = "ssr")]
    {
        std::env::var("PAYMENT_PUBLISHABLE_KEY").unwrap_or_default()
    }
    #[cfg(not(feature = "ssr"))]
    {
        crate::util::page_meta::payment_key().unwrap_or_default()
    }
}
