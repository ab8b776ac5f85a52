use dioxus::prelude::*;

use store::{ClientConfig, Role};
use ui::{AuthRequired, Navbar, NoAuthRequired, SessionProvider};
use views::{
    AdminDashboard, CreateEmployee, CreateJob, JobDashboard, Login, NotFound, Profile, SignUp,
    UpdateProfile,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(GuestOnly)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        SignUp {},
    #[end_layout]
    #[layout(SignedIn)]
        #[route("/jobs")]
        JobDashboard {},
        #[route("/profile")]
        Profile {},
        #[route("/update-profile")]
        UpdateProfile {},
    #[end_layout]
    #[layout(AdminOnly)]
        #[route("/admin")]
        AdminDashboard {},
        #[route("/createjob")]
        CreateJob {},
        #[route("/create-employee")]
        CreateEmployee {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Embedded at build time; `KITCHEN_SAVER_API_BASE_URL` overrides the backend.
const CONFIG_TOML: &str = include_str!("../kitchen-saver.toml");

fn client_config() -> ClientConfig {
    let config = ClientConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::error!("Invalid {}: {}", ClientConfig::filename(), e);
        ClientConfig::default()
    });
    match option_env!("KITCHEN_SAVER_API_BASE_URL") {
        Some(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url),
        _ => config,
    }
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(client_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider { config,
            Router::<Route> {}
        }
    }
}

/// `/` shows the login form.
#[component]
fn Home() -> Element {
    rsx! {
        Login {}
    }
}

#[component]
fn GuestOnly() -> Element {
    rsx! {
        NoAuthRequired {
            Navbar {}
            Outlet::<Route> {}
        }
    }
}

#[component]
fn SignedIn() -> Element {
    rsx! {
        AuthRequired {
            Navbar {}
            main { class: "wrapper", Outlet::<Route> {} }
        }
    }
}

#[component]
fn AdminOnly() -> Element {
    rsx! {
        AuthRequired { required_role: Role::Admin,
            Navbar {}
            main { class: "wrapper", Outlet::<Route> {} }
        }
    }
}
