//! Form building blocks shared by the pages.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Danger => "btn btn-danger",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] class: String,
    #[props(default)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let variant_class = variant.class();
    rsx! {
        button {
            class: "{variant_class} {class}",
            r#type: r#type.clone(),
            disabled,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

/// A labelled text input.
#[component]
pub fn Input(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    /// Message shown under the input.
    error: Option<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", "{label}" }
            input {
                class: "form-control",
                r#type: r#type.clone(),
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(error) = error {
                div { class: "field-error", "{error}" }
            }
        }
    }
}

/// A labelled `select` over `(value, label)` options, with an optional
/// leading blank entry.
#[component]
pub fn Select(
    label: String,
    value: String,
    options: Vec<(String, String)>,
    onchange: EventHandler<String>,
    placeholder: Option<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", "{label}" }
            select {
                class: "form-control",
                value: "{value}",
                onchange: move |evt: FormEvent| onchange.call(evt.value()),
                if let Some(placeholder) = placeholder {
                    option { value: "", selected: value.is_empty(), "{placeholder}" }
                }
                for (option_value, option_label) in options {
                    option {
                        value: "{option_value}",
                        selected: option_value == value,
                        "{option_label}"
                    }
                }
            }
        }
    }
}
