//! Self-registration page.

use api::RegisterRequest;
use dioxus::prelude::*;
use store::Role;
use ui::components::{Button, ButtonVariant, Input, Select};
use ui::{office_options, sync_session, use_api, use_session};

use super::role_options;
use crate::Route;

#[component]
pub fn SignUp() -> Element {
    let client = use_api();
    let session = use_session();
    let nav = use_navigator();
    let mut form = use_signal(RegisterRequest::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let request = form();
            if let Err(e) = request.validate() {
                error.set(Some(e.to_string()));
                return;
            }

            loading.set(true);
            match client.register(&request).await {
                Ok(signed_in) => {
                    sync_session(session, &client);
                    nav.push(signed_in.user.home_route());
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let current = form();

    rsx! {
        div { class: "login-container",
            h1 { "Create Account" }
            p { class: "subheadline", "Join your team on Kitchen Saver" }

            form { onsubmit: handle_register, class: "stacked-form",
                if let Some(err) = error() {
                    div { class: "notice notice-error", "{err}" }
                }

                Input {
                    label: "First Name",
                    value: current.first_name.clone(),
                    oninput: move |value: String| form.write().first_name = value,
                }
                Input {
                    label: "Last Name",
                    value: current.last_name.clone(),
                    oninput: move |value: String| form.write().last_name = value,
                }
                Input {
                    label: "Username",
                    placeholder: "lowercase letters, numbers and _",
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
                Select {
                    label: "Office",
                    value: current.office.clone(),
                    options: office_options(),
                    placeholder: "Select office",
                    onchange: move |value: String| form.write().office = value,
                }
                Select {
                    label: "Role",
                    value: current.role.clone(),
                    options: role_options(&Role::ASSIGNABLE),
                    placeholder: "Select role",
                    onchange: move |value: String| form.write().role = value,
                }
                Input {
                    label: "Password",
                    r#type: "password",
                    placeholder: "At least 8 characters",
                    value: current.password.clone(),
                    oninput: move |value: String| form.write().password = value,
                }
                Input {
                    label: "Confirm Password",
                    r#type: "password",
                    value: current.confirm_password.clone(),
                    oninput: move |value: String| form.write().confirm_password = value,
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign Up" }
                }
            }

            p { class: "form-footer",
                "Already have an account? "
                Link { to: Route::Login {}, "Login" }
            }
        }
    }
}
