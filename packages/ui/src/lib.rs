//! Shared UI for the Kitchen Saver client: the session context, route gates,
//! the job table and the small building blocks the pages are made of.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const THEME_CSS: Asset = asset!("/assets/theme.css");

mod auth;
pub use auth::{
    sync_session, use_api, use_client_config, use_session, ApiClient, LogoutButton,
    PlatformStorage, SessionProvider,
};

mod gate;
pub use gate::{AuthRequired, LoadingIndicator, NoAuthRequired};

mod navbar;
pub use navbar::Navbar;

mod notice;
pub use notice::{sleep_ms, use_notice, NoticeBanner, NoticeHandle};

mod filter_bar;
pub use filter_bar::{office_options, status_options, JobFilterBar, OfficeFilter};

mod job_table;
pub use job_table::JobTable;
