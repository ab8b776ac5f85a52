//! Admin page for managing employee accounts.
//!
//! One form serves both create and edit. The list is fetched again after
//! every successful write so it always mirrors the backend.

use api::{EmployeeRequest, ValidationError};
use dioxus::prelude::*;
use store::{EmployeeFilter, Office, Role, User};
use ui::components::{Button, ButtonVariant, Input, Select};
use ui::views::ConfirmDialog;
use ui::{
    office_options, use_api, use_notice, ApiClient, NoticeBanner, NoticeHandle, OfficeFilter,
};

use super::role_options;

const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

async fn reload(client: &ApiClient, mut employees: Signal<Vec<User>>, mut notice: NoticeHandle) {
    match client.get_all_employees().await {
        Ok(list) => employees.set(list),
        Err(e) => notice.error(e.to_string()),
    }
}

/// A validated employee form, ready to send.
#[derive(Clone, Debug, PartialEq)]
enum Submission {
    Create(EmployeeRequest),
    Update(EmployeeRequest),
}

/// Snapshot and validate the form. Every signal is read and released here, so
/// the request that follows can be awaited while the user keeps editing.
fn prepare(
    form: Signal<EmployeeRequest>,
    editing: Signal<Option<i64>>,
    employees: Signal<Vec<User>>,
) -> Result<Submission, ValidationError> {
    let request = form.peek().clone();
    let editing_id = *editing.peek();
    match editing_id {
        Some(id) => {
            request.validate_edit()?;
            Ok(Submission::Update(EmployeeRequest {
                id: Some(id),
                ..request.with_confirmed_password()
            }))
        }
        None => {
            request.validate_new(&employees.peek())?;
            Ok(Submission::Create(request.with_confirmed_password()))
        }
    }
}

#[component]
pub fn CreateEmployee() -> Element {
    let client = use_api();
    let mut notice = use_notice();
    let employees = use_signal(Vec::<User>::new);
    let mut form = use_signal(EmployeeRequest::default);
    let mut editing = use_signal(|| Option::<i64>::None);
    let mut pending_delete = use_signal(|| Option::<i64>::None);
    let office = use_signal(|| Option::<Office>::None);

    let loader = client.clone();
    use_hook(move || {
        spawn(async move { reload(&loader, employees, notice).await });
    });

    let save_client = client.clone();
    let save = move |_: MouseEvent| {
        let client = save_client.clone();
        spawn(async move {
            notice.clear();
            let submission = match prepare(form, editing, employees) {
                Ok(submission) => submission,
                Err(e) => {
                    notice.error(e.to_string());
                    return;
                }
            };
            let result = match &submission {
                Submission::Update(request) => client.update_employee(request).await,
                Submission::Create(request) => client.create_employee(request).await,
            };

            match result {
                Ok(response) => {
                    if let Some(message) = response.message.filter(|m| !m.is_empty()) {
                        notice.success(message);
                    }
                    editing.set(None);
                    form.set(EmployeeRequest::default());
                    reload(&client, employees, notice).await;
                }
                Err(e) => notice.error(e.to_string()),
            }
        });
    };

    let confirm_delete = move |_: ()| {
        let client = client.clone();
        let Some(id) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        spawn(async move {
            match client.delete_user(id).await {
                Ok(()) => {
                    tracing::info!("Deleted employee {}", id);
                    reload(&client, employees, notice).await;
                }
                Err(e) => notice.error(e.to_string()),
            }
        });
    };

    let current = form();
    let is_editing = editing().is_some();
    let password_label = if is_editing {
        "New Password (leave blank to keep)"
    } else {
        "Password"
    };
    let filter = EmployeeFilter { office: office() };
    let rows: Vec<User> = filter.apply(&employees.read()).into_iter().cloned().collect();

    rsx! {
        header { class: "page-header",
            h1 { "Effortlessly Build Your Team" }
            h2 { "Add, manage, and organize employees seamlessly with our intuitive interface." }
        }

        div { class: "form-card",
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
                label: "Role",
                value: current.role.clone(),
                options: role_options(&[Role::CabinetMaker, Role::Installer]),
                placeholder: "Select Role",
                onchange: move |value: String| form.write().role = value,
            }
            Select {
                label: "Office",
                value: current.office.clone(),
                options: office_options(),
                placeholder: "Select Office",
                onchange: move |value: String| form.write().office = value,
            }
            Input {
                label: password_label,
                r#type: "password",
                value: current.password.clone(),
                oninput: move |value: String| form.write().password = value,
            }

            div { class: "form-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: save,
                    if is_editing { "Update Employee" } else { "Add Employee" }
                }
                if is_editing {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| {
                            editing.set(None);
                            form.set(EmployeeRequest::default());
                        },
                        "Cancel"
                    }
                }
            }

            NoticeBanner { handle: notice }
        }

        OfficeFilter { office }

        table { class: "job-table",
            thead {
                tr {
                    th { "Name" }
                    th { "Username" }
                    th { "Email" }
                    th { "Cell" }
                    th { "Role" }
                    th { "Office" }
                    th { "Actions" }
                }
            }
            tbody {
                for user in rows {
                    EmployeeRow {
                        key: "{user.id}",
                        user: user.clone(),
                        on_edit: move |user: User| {
                            editing.set(Some(user.id));
                            form.set(EmployeeRequest::from_user(&user));
                        },
                        on_delete: move |id: i64| pending_delete.set(Some(id)),
                    }
                }
            }
        }

        if pending_delete().is_some() {
            ConfirmDialog {
                title: "Delete employee",
                message: DELETE_PROMPT.to_string(),
                confirm_label: "Delete",
                danger: true,
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn EmployeeRow(user: User, on_edit: EventHandler<User>, on_delete: EventHandler<i64>) -> Element {
    let id = user.id;
    let name = user.full_name();
    let role = user.role.map(|r| r.label()).unwrap_or("");
    let office = user.office.map(|o| o.as_str()).unwrap_or("");
    let edited = user.clone();

    rsx! {
        tr {
            td { "{name}" }
            td { "{user.username}" }
            td { "{user.email}" }
            td { "{user.cell}" }
            td { "{role}" }
            td { "{office}" }
            td { class: "row-actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_edit.call(edited.clone()),
                    "Edit"
                }
                Button {
                    variant: ButtonVariant::Danger,
                    onclick: move |_| on_delete.call(id),
                    "Delete"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    /// Shared event log a test component writes into.
    #[derive(Clone, Default)]
    struct Events(Arc<Mutex<Vec<String>>>);

    impl PartialEq for Events {
        fn eq(&self, other: &Self) -> bool {
            Arc::ptr_eq(&self.0, &other.0)
        }
    }

    impl Events {
        fn push(&self, event: impl Into<String>) {
            self.0.lock().unwrap().push(event.into());
        }

        fn take(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    fn filled_form() -> EmployeeRequest {
        EmployeeRequest {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            username: "asilva".into(),
            email: "ana@kitchensaver.test".into(),
            cell: "5550100".into(),
            role: "INSTALLER".into(),
            office: "402".into(),
            password: "hunter2hunter2".into(),
            ..EmployeeRequest::default()
        }
    }

    fn existing() -> Vec<User> {
        vec![User {
            id: 3,
            username: "asilva".into(),
            email: "other@kitchensaver.test".into(),
            ..User::default()
        }]
    }

    /// Saves an edit through a slow request while "Cancel" is clicked.
    #[component]
    fn CancelDuringSave(events: Events) -> Element {
        let form = use_signal(filled_form);
        let mut editing = use_signal(|| Some(7_i64));
        let employees = use_signal(Vec::<User>::new);

        use_hook(move || {
            let saving = events.clone();
            spawn(async move {
                let submission = prepare(form, editing, employees);
                tokio::time::sleep(Duration::from_millis(50)).await;
                match submission {
                    Ok(Submission::Update(request)) => {
                        saving.push(format!("update {:?}", request.id))
                    }
                    other => saving.push(format!("unexpected {:?}", other)),
                }
            });
            let cancelling = events.clone();
            spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                editing.set(None);
                cancelling.push("cancel");
            });
        });

        rsx! {}
    }

    /// Runs the checks against signals owned by a throwaway component.
    #[component]
    fn PrepareCases(events: Events) -> Element {
        let mut form = use_signal(filled_form);
        let mut editing = use_signal(|| Option::<i64>::None);
        let employees = use_signal(existing);

        use_hook(move || {
            match prepare(form, editing, employees) {
                Err(e) => events.push(e.to_string()),
                Ok(other) => events.push(format!("unexpected {:?}", other)),
            }

            form.write().username = "ana_s".into();
            match prepare(form, editing, employees) {
                Ok(Submission::Create(request)) => {
                    events.push(format!("create confirm={}", request.confirm_password))
                }
                other => events.push(format!("unexpected {:?}", other)),
            }

            editing.set(Some(3));
            form.write().password.clear();
            match prepare(form, editing, employees) {
                Ok(Submission::Update(request)) => events.push(format!(
                    "update {:?} password={:?}",
                    request.id, request.password
                )),
                other => events.push(format!("unexpected {:?}", other)),
            }
        });

        rsx! {}
    }

    async fn run_until_idle(dom: &mut VirtualDom) {
        let _ = tokio::time::timeout(Duration::from_millis(200), async {
            loop {
                dom.wait_for_work().await;
            }
        })
        .await;
    }

    #[tokio::test]
    async fn test_cancel_while_saving_keeps_snapshot() {
        let events = Events::default();
        let mut dom = VirtualDom::new_with_props(
            CancelDuringSave,
            CancelDuringSaveProps {
                events: events.clone(),
            },
        );
        dom.rebuild_in_place();
        run_until_idle(&mut dom).await;

        assert_eq!(events.take(), vec!["cancel", "update Some(7)"]);
    }

    #[test]
    fn test_prepare_rules() {
        let events = Events::default();
        let mut dom = VirtualDom::new_with_props(
            PrepareCases,
            PrepareCasesProps {
                events: events.clone(),
            },
        );
        dom.rebuild_in_place();

        assert_eq!(
            events.take(),
            vec![
                "An employee with the same username or email already exists.".to_string(),
                "create confirm=hunter2hunter2".to_string(),
                "update Some(3) password=\"\"".to_string(),
            ]
        );
    }
}
