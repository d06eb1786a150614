//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::progress_bar::ProgressBar;
use crate::net::socket::EventSender;
use crate::pages::checkout::CheckoutPage;
use crate::state::{payment::PaymentState, session::SessionState};

/// HTML shell rendered on the server for SSR + hydration.
///
/// The processor's embedded script is loaded here so its global constructor
/// is available by the time the payment widget mounts; the publishable key
/// is published as page metadata for the hydrating client.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="payment-key" content=payment_key()/>
                <script src="https://js.stripe.com/v3/"></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides shared state contexts, spawns the live channel client in the
/// browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let session = RwSignal::new(SessionState::default());
    let payment = RwSignal::new(PaymentState::default());
    let sender = RwSignal::new(EventSender::default());

    provide_context(session);
    provide_context(payment);
    provide_context(sender);

    #[cfg(feature = "hydrate")]
    {
        let (tx, confirm_requests) = crate::net::socket::spawn_socket_client(session);
        sender.set(tx.clone());
        provide_context(confirm_requests);

        // Scoped debug access to the socket handle; torn down with the app.
        let guard = crate::util::diagnostics::init(crate::util::diagnostics::Diagnostics {
            socket: tx,
        });
        on_cleanup(move || drop(guard));
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="Storefront"/>

        <ProgressBar/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=CheckoutPage/>
            </Routes>
        </Router>
    }
}

/// Publishable processor credential, read from the server environment.
fn payment_key() -> String {
    #[cfg(feature = "ssr")]
    {
        std::env::var("PAYMENT_PUBLISHABLE_KEY").unwrap_or_default()
    }
    #[cfg(not(feature = "ssr"))]
    {
        String::new()
    }
}
