//! Admin form for adding a job.

use api::JobForm;
use dioxus::prelude::*;
use store::{Role, User};
use ui::components::{Button, ButtonVariant, Input, Select};
use ui::{office_options, status_options, use_api, use_notice, NoticeBanner};

fn people_with_role(employees: &[User], role: Role) -> Vec<(String, String)> {
    employees
        .iter()
        .filter(|user| user.role == Some(role))
        .map(|user| (user.id.to_string(), user.full_name()))
        .collect()
}

#[component]
pub fn CreateJob() -> Element {
    let client = use_api();
    let mut notice = use_notice();
    let mut form = use_signal(JobForm::default);
    let mut employees = use_signal(Vec::<User>::new);
    let mut saving = use_signal(|| false);

    let loader = client.clone();
    use_hook(move || {
        spawn(async move {
            match loader.get_all_employees().await {
                Ok(list) => employees.set(list),
                Err(e) => {
                    tracing::warn!("Could not load employees for job form: {}", e);
                    notice.error(e.to_string());
                }
            }
        });
    });

    let add_job = move |_: MouseEvent| {
        let client = client.clone();
        spawn(async move {
            let job = match form.peek().validate() {
                Ok(job) => job,
                Err(e) => {
                    notice.error(e.to_string());
                    return;
                }
            };

            saving.set(true);
            match client.create_job(&job).await {
                Ok(created) => {
                    tracing::info!("Created job {} ({})", created.job_number, created.id);
                    notice.success("Job Added Successfully!");
                    form.set(JobForm::default());
                }
                Err(e) => notice.error(e.to_string()),
            }
            saving.set(false);
        });
    };

    let current = form();
    let staff = employees.read();
    let cabinet_makers = people_with_role(&staff, Role::CabinetMaker);
    let installers = people_with_role(&staff, Role::Installer);

    rsx! {
        header { class: "page-header",
            h1 { "Create Jobs" }
            h2 { "Input job details, track progress, and manage tasks all in one place" }
        }

        div { class: "form-card",
            Input {
                label: "Job #",
                r#type: "number",
                value: current.job_number.clone(),
                oninput: move |value: String| form.write().job_number = value,
            }
            Input {
                label: "Job Name",
                value: current.job_name.clone(),
                oninput: move |value: String| form.write().job_name = value,
            }
            Input {
                label: "# of Cabinets",
                r#type: "number",
                value: current.num_cabinets.clone(),
                oninput: move |value: String| form.write().num_cabinets = value,
            }
            Input {
                label: "# of Uppers",
                r#type: "number",
                value: current.num_uppers.clone(),
                oninput: move |value: String| form.write().num_uppers = value,
            }
            Input {
                label: "# of Lowers",
                r#type: "number",
                value: current.num_lowers.clone(),
                oninput: move |value: String| form.write().num_lowers = value,
            }
            Select {
                label: "Cabinet Maker",
                value: current.cabinet_maker_id.clone(),
                options: cabinet_makers,
                placeholder: "Select Cabinet Maker",
                onchange: move |value: String| form.write().cabinet_maker_id = value,
            }
            Select {
                label: "Installer",
                value: current.installer_id.clone(),
                options: installers,
                placeholder: "Select Installer",
                onchange: move |value: String| form.write().installer_id = value,
            }
            Input {
                label: "Due Date",
                r#type: "date",
                value: current.due_date.clone(),
                oninput: move |value: String| form.write().due_date = value,
            }
            Input {
                label: "Job Color",
                value: current.job_color.clone(),
                oninput: move |value: String| form.write().job_color = value,
            }
            Select {
                label: "Office",
                value: current.office.clone(),
                options: office_options(),
                placeholder: "Select Office",
                onchange: move |value: String| form.write().office = value,
            }
            Select {
                label: "Status",
                value: current.status.clone(),
                options: status_options(),
                placeholder: "Select Status",
                onchange: move |value: String| form.write().status = value,
            }

            Button {
                variant: ButtonVariant::Primary,
                disabled: saving(),
                onclick: add_job,
                if saving() { "Saving..." } else { "Add Job" }
            }

            NoticeBanner { handle: notice }
        }
    }
}
