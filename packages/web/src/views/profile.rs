//! The signed-in user's own account.

use api::UpdateProfileRequest;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::views::ConfirmDialog;
use ui::{sync_session, use_api, use_notice, use_session, NoticeBanner};

use crate::Route;

/// Read-only summary of the cached user.
#[component]
pub fn Profile() -> Element {
    let session = use_session();
    let Some(user) = session().user else {
        return rsx! {
            p { "No profile loaded." }
        };
    };
    let name = user.full_name();
    let role = user.role.map(|r| r.label()).unwrap_or("");
    let office = user.office.map(|o| o.as_str()).unwrap_or("");

    rsx! {
        header { class: "page-header",
            h1 { "Your Profile, Your Way" }
            h2 { "Review the details your team sees" }
        }
        dl { class: "profile-card",
            dt { "Name" }
            dd { "{name}" }
            dt { "Username" }
            dd { "{user.username}" }
            dt { "Email" }
            dd { "{user.email}" }
            dt { "Cell" }
            dd { "{user.cell}" }
            dt { "Role" }
            dd { "{role}" }
            dt { "Office" }
            dd { "{office}" }
        }
        Link { class: "btn btn-primary", to: Route::UpdateProfile {}, "Update Profile" }
    }
}

/// Edit username, email, cell and optionally the password. Changes are
/// confirmed in a modal before they are sent.
#[component]
pub fn UpdateProfile() -> Element {
    let client = use_api();
    let session = use_session();
    let mut notice = use_notice();
    let mut form = use_signal(|| {
        session()
            .user
            .as_ref()
            .map(UpdateProfileRequest::from_user)
            .unwrap_or_default()
    });
    let mut confirming = use_signal(|| false);

    let loader = client.clone();
    use_hook(move || {
        spawn(async move {
            match loader.get_self().await {
                Ok(user) => form.set(UpdateProfileRequest::from_user(&user)),
                Err(e) => tracing::warn!("Could not refresh profile: {}", e),
            }
        });
    });

    let ask = move |_: MouseEvent| {
        notice.clear();
        match form.peek().validate() {
            Ok(()) => confirming.set(true),
            Err(e) => notice.error(e.to_string()),
        }
    };

    let confirm = move |_: ()| {
        confirming.set(false);
        let client = client.clone();
        spawn(async move {
            let mut request = form.peek().clone();
            request.confirm_password = request.password.clone();
            match client.update_profile(&request).await {
                Ok(user) => {
                    sync_session(session, &client);
                    form.set(UpdateProfileRequest::from_user(&user));
                    notice.success("Profile updated successfully!");
                }
                Err(e) => {
                    tracing::warn!("Profile update failed: {}", e);
                    notice.error("Failed to update profile.");
                }
            }
        });
    };

    let current = form();

    rsx! {
        header { class: "page-header",
            h1 { "Update Your Profile" }
            h2 { "Keep your contact details current" }
        }

        div { class: "form-card",
            Input {
                label: "Username",
                value: current.username.clone(),
                oninput: move |value: String| form.write().username = value,
            }
            Input {
                label: "Email",
                r#type: "email",
                value: current.email.clone(),
                oninput: move |value: String| form.write().email = value,
            }
            Input {
                label: "Cell",
                r#type: "tel",
                value: current.cell.clone(),
                oninput: move |value: String| form.write().cell = value,
            }
            Input {
                label: "New Password",
                r#type: "password",
                placeholder: "Leave blank to keep the current one",
                value: current.password.clone(),
                oninput: move |value: String| form.write().password = value,
            }

            Button { variant: ButtonVariant::Primary, onclick: ask, "Update Profile" }

            NoticeBanner { handle: notice }
        }

        if confirming() {
            ConfirmDialog {
                title: "Confirm Update",
                message: "Are you sure you want to update your profile?",
                confirm_label: "Yes, Update",
                on_confirm: confirm,
                on_cancel: move |_| confirming.set(false),
            }
        }
    }
}
