//! Transient banners that clear themselves.

use std::time::Duration;

use dioxus::prelude::*;
use store::{Clock, Notice, NoticeKind, SystemClock};

use crate::auth::use_client_config;

pub async fn sleep_ms(millis: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(Duration::from_millis(millis)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// A page's notice slot plus the configured lifetime.
#[derive(Clone, Copy, PartialEq)]
pub struct NoticeHandle {
    notice: Signal<Notice>,
    ttl_millis: u64,
}

impl NoticeHandle {
    pub fn error(&mut self, message: impl Into<String>) {
        self.show(NoticeKind::Error, message.into());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(NoticeKind::Success, message.into());
    }

    pub fn clear(&mut self) {
        self.notice.write().dismiss();
    }

    pub fn ttl_millis(&self) -> u64 {
        self.ttl_millis
    }

    /// Kind and text currently showing.
    pub fn current(&self) -> Option<(NoticeKind, String)> {
        let notice = self.notice.read();
        Some((notice.kind()?, notice.message()?.to_string()))
    }

    fn show(&mut self, kind: NoticeKind, message: String) {
        let shown_at = SystemClock.now_millis();
        let ttl = self.ttl_millis;
        self.notice.write().show(kind, message, shown_at, ttl);

        let mut notice = self.notice;
        spawn(async move {
            sleep_ms(ttl).await;
            // A timer may fire a little early; never let this one outlive its own message.
            let now = SystemClock.now_millis().max(shown_at + ttl);
            notice.write().expire(now);
        });
    }
}

/// A notice slot for the calling component.
pub fn use_notice() -> NoticeHandle {
    let ttl_millis = use_client_config().ui.notice_dismiss_ms;
    let notice = use_signal(Notice::default);
    NoticeHandle { notice, ttl_millis }
}

/// Renders whatever `handle` is showing, or nothing.
#[component]
pub fn NoticeBanner(handle: NoticeHandle) -> Element {
    match handle.current() {
        Some((kind, message)) => rsx! {
            NoticeText { kind, message }
        },
        None => rsx! {},
    }
}

#[component]
pub(crate) fn NoticeText(kind: NoticeKind, message: String) -> Element {
    let class = match kind {
        NoticeKind::Error => "notice notice-error",
        NoticeKind::Success => "notice notice-success",
    };
    rsx! {
        div { class: "{class}", role: "status", "{message}" }
    }
}
