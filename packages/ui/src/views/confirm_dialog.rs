use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::views::ModalOverlay;

/// Yes/no question in a modal. Dismissing the overlay counts as "no".
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    #[props(default)] danger: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let variant = if danger {
        ButtonVariant::Danger
    } else {
        ButtonVariant::Primary
    };

    rsx! {
        ModalOverlay { on_close: move |_| on_cancel.call(()),
            div { class: "modal-body",
                h3 { class: "modal-title", "{title}" }
                p { "{message}" }
                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button { variant, onclick: move |_| on_confirm.call(()), "{confirm_label}" }
                }
            }
        }
    }
}
