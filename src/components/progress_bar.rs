//! Navigation progress indicator.
//!
//! Thin bar at the top of the page while the live channel is (re)connecting.
//! Visibility rules live in [`crate::state::progress`]; this component only
//! feeds it wall-clock ticks.

use leptos::prelude::*;

use crate::state::progress::ProgressState;

/// Progress bar shown while a loading phase is pending.
#[component]
pub fn ProgressBar() -> impl IntoView {
    let progress = RwSignal::new(ProgressState::default());

    #[cfg(feature = "hydrate")]
    wire_progress(progress);

    view! {
        <div
            class="progress-bar"
            class=("progress-bar--active", move || progress.get().visible)
        ></div>
    }
}

/// Track the session's connection phase and tick visibility on a short timer.
#[cfg(feature = "hydrate")]
fn wire_progress(progress: RwSignal<ProgressState>) {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::state::session::{ConnectionStatus, SessionState};

    let session = expect_context::<RwSignal<SessionState>>();

    Effect::new(move || {
        let status = session.get().connection_status;
        let now = js_sys::Date::now();
        progress.update(|p| match status {
            ConnectionStatus::Connecting => p.loading_started(now),
            ConnectionStatus::Connected | ConnectionStatus::Disconnected => p.loading_stopped(),
        });
    });

    let tick_alive = Arc::new(AtomicBool::new(true));
    let tick_alive_task = Arc::clone(&tick_alive);
    leptos::task::spawn_local(async move {
        loop {
            gloo_timers::future::sleep(std::time::Duration::from_millis(100)).await;
            if !tick_alive_task.load(Ordering::Relaxed) {
                break;
            }
            progress.update(|p| {
                let _ = p.tick(js_sys::Date::now());
            });
        }
    });
    on_cleanup(move || tick_alive.store(false, Ordering::Relaxed));
}
