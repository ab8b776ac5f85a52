//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] builds the one [`ApiClient`] the app uses and publishes
//! it, the [`ClientConfig`] and a `Signal<Session>` snapshot through context.
//! The signal is refreshed from storage after every operation that writes the
//! session, so components never read storage themselves.

use api::RestClient;
use dioxus::prelude::*;
use store::gate::LOGIN_ROUTE;
use store::{ClientConfig, Session};

use crate::icons::FaRightFromBracket;
use crate::Icon;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

pub type ApiClient = RestClient<PlatformStorage>;

/// The current session snapshot. Updates after login, logout and profile edits.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_client_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// Re-read the persisted session into the context signal.
pub fn sync_session(mut session: Signal<Session>, client: &ApiClient) {
    let fresh = client.session().get();
    if *session.peek() != fresh {
        session.set(fresh);
    }
}

/// Provider component for the client, its configuration and the session.
/// Wrap the router with this component.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let client = use_hook(|| ApiClient::new(&config, PlatformStorage::default()));
    let session = use_signal(|| client.session().get());

    use_context_provider(|| client.clone());
    use_context_provider(|| config.clone());
    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button to sign out: clears both session keys and goes to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_api();
    let session = use_session();
    let nav = use_navigator();

    let onclick = move |_| {
        if let Err(e) = client.session().clear() {
            tracing::error!("Failed to clear session: {}", e);
        }
        sync_session(session, &client);
        nav.push(LOGIN_ROUTE);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            " {label}"
        }
    }
}
