//! Login page view with email/password form.

use api::{Field, LoginRequest};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{sync_session, use_api, use_session};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let client = use_api();
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut email_error = use_signal(|| Option::<String>::None);
    let mut password_error = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            email_error.set(None);
            password_error.set(None);

            let request = LoginRequest {
                email: email().trim().to_string(),
                password: password(),
            };
            if let Err(errors) = request.validate() {
                for e in errors {
                    let message = Some(e.to_string());
                    match e.field() {
                        Field::Email => email_error.set(message),
                        Field::Password => password_error.set(message),
                        Field::Form => error.set(message),
                    }
                }
                return;
            }

            loading.set(true);
            match client.login(&request).await {
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

    rsx! {
        div { class: "login-container",
            h1 { "Welcome Back" }
            p { class: "subheadline", "Sign in to manage your cabinet jobs" }

            form { onsubmit: handle_login, class: "stacked-form",
                if let Some(err) = error() {
                    div { class: "notice notice-error", "{err}" }
                }

                Input {
                    label: "Email",
                    r#type: "email",
                    placeholder: "Enter your email",
                    value: email(),
                    oninput: move |value: String| email.set(value),
                    error: email_error(),
                }

                Input {
                    label: "Password",
                    r#type: "password",
                    placeholder: "Enter your password",
                    value: password(),
                    oninput: move |value: String| password.set(value),
                    error: password_error(),
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Login" }
                }
            }

            p { class: "form-footer",
                "Don't have an account? "
                Link { to: Route::SignUp {}, "Sign up" }
            }
        }
    }
}
