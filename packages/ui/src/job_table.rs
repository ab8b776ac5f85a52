//! The job table: one row per job, with inline controls for status,
//! materials, photos and (for admins) deletion.
//!
//! Every row action goes through [`api::JobBoard`] to build the change and
//! then [`api::mutate_and_resync`]; the rows themselves are never edited in
//! place.

use api::{mutate_and_resync, resync, ImageFile, JobBoard, JobMutation, PendingDelete, SyncError};
use dioxus::prelude::*;
use store::{Clock, Job, JobFilter, JobStatus, SystemClock};

use crate::auth::{use_api, use_client_config, use_session, ApiClient};
use crate::components::{Button, ButtonVariant};
use crate::icons::{FaImage, FaTrash};
use crate::notice::{sleep_ms, NoticeText};
use crate::views::ConfirmDialog;
use crate::Icon;

/// What a row asks the table to do with its job.
#[derive(Clone, Debug, PartialEq)]
enum RowAction {
    Status(JobStatus),
    Ordered(bool),
    Arrived(bool),
    Upload(ImageFile),
    Delete,
}

const HEADERS: [&str; 15] = [
    "Job #",
    "Job Name",
    "# of Cabinets",
    "# of Uppers",
    "# of Lowers",
    "Cabinet Maker",
    "Installer",
    "Due Date",
    "Job Color",
    "Office",
    "Status",
    "Materials Ordered",
    "Materials Arrived",
    "Photos",
    "Actions",
];

/// Clear the board's message once its lifetime is over.
fn expire_later(mut board: Signal<JobBoard>, shown_at: u64, ttl: u64) {
    spawn(async move {
        sleep_ms(ttl).await;
        let now = SystemClock.now_millis().max(shown_at + ttl);
        board.write().expire_notice(now);
    });
}

fn settle(mut board: Signal<JobBoard>, result: Result<Vec<Job>, SyncError>, ttl: u64) {
    let now = SystemClock.now_millis();
    let failed = result.is_err();
    board.write().finish(result, now, ttl);
    if failed {
        expire_later(board, now, ttl);
    }
}

fn reject(mut board: Signal<JobBoard>, error: &SyncError, ttl: u64) {
    let now = SystemClock.now_millis();
    board.write().reject(error, now, ttl);
    expire_later(board, now, ttl);
}

async fn apply(client: ApiClient, mut board: Signal<JobBoard>, mutation: JobMutation, ttl: u64) {
    board.write().begin();
    let result = mutate_and_resync(&client, &mutation).await;
    settle(board, result, ttl);
}

/// Jobs matching `filter`, loaded on mount and re-fetched after every change.
#[component]
pub fn JobTable(filter: JobFilter) -> Element {
    let client = use_api();
    let session = use_session();
    let ttl = use_client_config().ui.notice_dismiss_ms;
    let board = use_signal(JobBoard::new);
    let mut pending = use_signal(|| Option::<PendingDelete>::None);

    let loader = client.clone();
    use_hook(move || {
        spawn(async move {
            let result = resync(&loader).await;
            settle(board, result, ttl);
        });
    });

    let actions = client.clone();
    let on_action = use_callback(move |(id, action): (i64, RowAction)| {
        let prepared = {
            let current = board.read();
            match action {
                RowAction::Status(status) => current.status_change(id, status).map(Some),
                RowAction::Ordered(ordered) => current.material_ordered(id, ordered).map(Some),
                RowAction::Arrived(arrived) => current.material_arrived(id, arrived).map(Some),
                RowAction::Upload(file) => current.upload_image(id, file).map(Some),
                RowAction::Delete => current.request_delete(id, &session.read()).map(|request| {
                    pending.set(Some(request));
                    None
                }),
            }
        };
        match prepared {
            Ok(Some(mutation)) => {
                spawn(apply(actions.clone(), board, mutation, ttl));
            }
            Ok(None) => {}
            Err(e) => reject(board, &e, ttl),
        }
    });

    let confirm_client = client.clone();
    let on_confirm = move |_: ()| {
        let request = pending.write().take();
        if let Some(request) = request {
            spawn(apply(confirm_client.clone(), board, request.confirm(), ttl));
        }
    };

    let state = board.read();
    if state.is_loading() {
        return rsx! {
            div { class: "skeleton-loader",
                for _ in 0..3 {
                    div { class: "skeleton-row",
                        div { class: "skeleton-cell" }
                        div { class: "skeleton-cell" }
                        div { class: "skeleton-cell" }
                    }
                }
            }
        };
    }

    let notice = state
        .notice()
        .kind()
        .zip(state.notice().message().map(str::to_string));
    let rows: Vec<(i64, Option<String>, Job)> = state
        .visible(&filter)
        .into_iter()
        .map(|job| {
            let photo_url = job.image.as_deref().map(|image| client.file_url(image));
            (job.id, photo_url, job.clone())
        })
        .collect();
    drop(state);
    let is_admin = session.read().is_admin();

    rsx! {
        div { class: "job-table",
            if let Some((kind, message)) = notice {
                NoticeText { kind, message }
            }
            table {
                thead {
                    tr {
                        for header in HEADERS {
                            th { "{header}" }
                        }
                    }
                }
                tbody {
                    for (id, photo_url, job) in rows {
                        JobRow {
                            key: "{id}",
                            job,
                            photo_url,
                            is_admin,
                            on_action: move |action| on_action.call((id, action)),
                        }
                    }
                }
            }
            if pending.read().is_some() {
                ConfirmDialog {
                    title: "Delete job",
                    message: PendingDelete::PROMPT.to_string(),
                    confirm_label: "Delete",
                    danger: true,
                    on_confirm,
                    on_cancel: move |_| pending.set(None),
                }
            }
        }
    }
}

#[component]
fn JobRow(
    job: Job,
    is_admin: bool,
    photo_url: Option<String>,
    on_action: EventHandler<RowAction>,
) -> Element {
    let status = job.status;
    let status_class = status.css_class();
    let ordered = job.is_material_ordered();
    let arrived = job.is_material_arrived();
    let ordered_class = if ordered { "text-success" } else { "text-danger" };
    let arrived_class = if arrived { "text-success" } else { "text-danger" };
    let due_date = job.due_date_label().to_string();
    let cabinet_maker = job.cabinet_maker_label().to_string();
    let installer = job.installer_label().to_string();
    let office = job.office.map(|o| o.as_str()).unwrap_or("");

    rsx! {
        tr {
            td { "{job.job_number}" }
            td { "{job.job_name}" }
            td { "{job.num_cabinets}" }
            td { "{job.num_uppers}" }
            td { "{job.num_lowers}" }
            td { "{cabinet_maker}" }
            td { "{installer}" }
            td { "{due_date}" }
            td { "{job.job_color}" }
            td { "{office}" }
            td {
                select {
                    class: "{status_class} form-control form-control-sm",
                    onchange: move |evt: FormEvent| {
                        if let Ok(status) = evt.value().parse() {
                            on_action.call(RowAction::Status(status));
                        }
                    },
                    for option_status in JobStatus::ALL {
                        option {
                            value: option_status.as_str(),
                            selected: option_status == status,
                            "{option_status}"
                        }
                    }
                }
            }
            td {
                select {
                    class: "form-control form-control-sm {ordered_class}",
                    onchange: move |evt: FormEvent| on_action.call(RowAction::Ordered(evt.value() == "ordered")),
                    option { value: "", selected: !ordered, "No" }
                    option { value: "ordered", selected: ordered, "Yes" }
                }
            }
            td {
                select {
                    class: "form-control form-control-sm {arrived_class}",
                    onchange: move |evt: FormEvent| on_action.call(RowAction::Arrived(evt.value() == "arrived")),
                    option { value: "", selected: !arrived, "No" }
                    option { value: "arrived", selected: arrived, "Yes" }
                }
            }
            td {
                input {
                    r#type: "file",
                    class: "form-control form-control-sm",
                    accept: "image/png,image/jpeg,image/svg+xml",
                    onchange: move |evt: FormEvent| async move {
                        let Some(file) = evt.files().into_iter().next() else {
                            return;
                        };
                        let name = file.name();
                        let mime = file.content_type().unwrap_or_default();
                        match file.read_bytes().await {
                            Ok(bytes) => on_action.call(RowAction::Upload(ImageFile {
                                name,
                                mime,
                                bytes: bytes.to_vec(),
                            })),
                            Err(e) => tracing::warn!("Could not read {}: {}", name, e),
                        }
                    },
                }
                if let Some(url) = photo_url {
                    a {
                        href: "{url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        Icon { icon: FaImage, width: 12, height: 12 }
                        " View Photo"
                    }
                }
            }
            td {
                if is_admin {
                    Button {
                        variant: ButtonVariant::Danger,
                        onclick: move |_| on_action.call(RowAction::Delete),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                        " Delete"
                    }
                }
            }
        }
    }
}
