//! Filter controls. They only edit the criteria signal; the lists they
//! narrow are filtered at render time.

use dioxus::prelude::*;
use store::{JobFilter, JobStatus, Office};

use crate::components::{Button, ButtonVariant, Select};
use crate::icons::FaFilterCircleXmark;
use crate::Icon;

/// `(value, label)` pairs for an office `Select`.
pub fn office_options() -> Vec<(String, String)> {
    Office::ALL
        .iter()
        .map(|office| (office.as_str().to_string(), office.as_str().to_string()))
        .collect()
}

/// `(value, label)` pairs for a job status `Select`.
pub fn status_options() -> Vec<(String, String)> {
    JobStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), status.as_str().to_string()))
        .collect()
}

fn office_value(office: Option<Office>) -> String {
    office.map(|o| o.as_str().to_string()).unwrap_or_default()
}

/// Office, installer and status criteria for the job table.
#[component]
pub fn JobFilterBar(mut filter: Signal<JobFilter>) -> Element {
    let current = filter();

    rsx! {
        form { class: "filter-container", onsubmit: move |evt: FormEvent| evt.prevent_default(),
            Select {
                label: "Filter by Office:",
                value: office_value(current.office),
                options: office_options(),
                placeholder: "All Offices",
                onchange: move |value: String| filter.write().office = value.parse().ok(),
            }
            div { class: "form-group",
                label { class: "form-label", "Filter by Installer:" }
                input {
                    class: "form-control",
                    r#type: "text",
                    placeholder: "Installer Name",
                    value: "{current.installer_name}",
                    oninput: move |evt: FormEvent| filter.write().installer_name = evt.value(),
                }
            }
            Select {
                label: "Filter by Status:",
                value: current.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
                options: status_options(),
                placeholder: "All Statuses",
                onchange: move |value: String| filter.write().status = value.parse().ok(),
            }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: current.is_empty(),
                onclick: move |_| filter.set(JobFilter::default()),
                Icon { icon: FaFilterCircleXmark, width: 14, height: 14 }
                " Clear Filters"
            }
        }
    }
}

/// Office-only criterion for the employee list.
#[component]
pub fn OfficeFilter(mut office: Signal<Option<Office>>) -> Element {
    rsx! {
        form { class: "filter-container", onsubmit: move |evt: FormEvent| evt.prevent_default(),
            Select {
                label: "Filter by Office:",
                value: office_value(office()),
                options: office_options(),
                placeholder: "All Offices",
                onchange: move |value: String| office.set(value.parse().ok()),
            }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: office().is_none(),
                onclick: move |_| office.set(None),
                "Clear Filters"
            }
        }
    }
}
