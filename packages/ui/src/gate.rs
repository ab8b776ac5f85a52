//! Route gate components.
//!
//! The decisions themselves live in [`store::gate`]; these components feed
//! them the session signal, render the outcome, and navigate on redirects.

use dioxus::prelude::*;
use store::gate::{auth_required, no_auth_required, GateOutcome, GuestOutcome};
use store::Role;

use crate::auth::{use_client_config, use_session};
use crate::notice::sleep_ms;

/// Pages for signed-in users. With `required_role` set, only that role gets in.
#[component]
pub fn AuthRequired(required_role: Option<Role>, children: Element) -> Element {
    let session = use_session();
    let debounce_ms = use_client_config().ui.gate_debounce_ms;
    let mut settled = use_signal(|| debounce_ms == 0);
    let nav = use_navigator();

    use_hook(move || {
        if debounce_ms > 0 {
            spawn(async move {
                sleep_ms(debounce_ms).await;
                settled.set(true);
            });
        }
    });

    use_effect(move || {
        let outcome = auth_required(&session.read(), required_role, settled());
        if let Some(route) = outcome.redirect() {
            tracing::debug!("Gate {:?} redirects to {}", outcome, route);
            nav.replace(route);
        }
    });

    let outcome = auth_required(&session.read(), required_role, settled());
    match outcome {
        GateOutcome::Allowed => rsx! {
            {children}
        },
        outcome if outcome.is_waiting() => rsx! {
            LoadingIndicator {}
        },
        _ => rsx! {},
    }
}

/// Pages only for visitors who are not signed in.
#[component]
pub fn NoAuthRequired(children: Element) -> Element {
    let session = use_session();
    let nav = use_navigator();

    use_effect(move || {
        if let GuestOutcome::Redirect(route) = no_auth_required(&session.read()) {
            nav.replace(route);
        }
    });

    let outcome = no_auth_required(&session.read());
    match outcome {
        GuestOutcome::Render => rsx! {
            {children}
        },
        GuestOutcome::Redirect(_) => rsx! {},
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div { class: "loading-indicator",
            div { class: "spinner" }
            p { "Loading..." }
        }
    }
}
