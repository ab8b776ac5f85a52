use dioxus::prelude::*;
use store::gate::{ADMIN_ROUTE, JOBS_ROUTE};

use crate::auth::{use_session, LogoutButton};
use crate::icons::{FaBriefcase, FaHouse, FaUser, FaUserPen, FaUserPlus};
use crate::Icon;

/// Top navigation. Links appear only while a token is present; admins also
/// get the create links.
#[component]
pub fn Navbar() -> Element {
    let session = use_session();
    let state = session();
    let home = if state.is_admin() { ADMIN_ROUTE } else { JOBS_ROUTE };

    rsx! {
        nav { class: "navbar",
            div { class: "nav-container",
                h1 { class: "brand-name", "Kitchen Saver" }
                if state.is_authenticated() {
                    Link { class: "nav-link", to: home,
                        Icon { icon: FaHouse, width: 14, height: 14 }
                        " Home"
                    }
                    if state.is_admin() {
                        Link { class: "nav-link", to: "/createjob",
                            Icon { icon: FaBriefcase, width: 14, height: 14 }
                            " Create Job"
                        }
                        Link { class: "nav-link", to: "/create-employee",
                            Icon { icon: FaUserPlus, width: 14, height: 14 }
                            " Create Employee"
                        }
                    }
                    Link { class: "nav-link", to: "/profile",
                        Icon { icon: FaUser, width: 14, height: 14 }
                        " Profile"
                    }
                    Link { class: "nav-link", to: "/update-profile",
                        Icon { icon: FaUserPen, width: 14, height: 14 }
                        " Update Profile"
                    }
                    LogoutButton { class: "btn btn-secondary" }
                }
            }
        }
    }
}
