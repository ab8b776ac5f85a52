//! Job dashboards: one for shop staff, one for admins. Both show the same
//! filterable table; the admin table also offers deletion.

use dioxus::prelude::*;
use store::JobFilter;
use ui::{use_session, JobFilterBar, JobTable};

#[component]
pub fn JobDashboard() -> Element {
    let filter = use_signal(JobFilter::default);

    rsx! {
        header { class: "page-header",
            h1 { "Job Dashboard" }
            h2 { "Track cabinet jobs from order to install" }
        }
        JobFilterBar { filter }
        JobTable { filter: filter() }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let session = use_session();
    let filter = use_signal(JobFilter::default);
    let greeting = session()
        .user
        .map(|user| user.first_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Admin".to_string());

    rsx! {
        header { class: "page-header",
            h1 { "Admin Dashboard" }
            h2 { "Welcome back, {greeting}. Manage every job across all offices." }
        }
        JobFilterBar { filter }
        JobTable { filter: filter() }
    }
}
