//! # Transient notices and the clock they expire against
//!
//! Error and success banners disappear on their own after a fixed delay. Instead
//! of tying that to a real timer, a [`Notice`] records when it expires and is
//! asked "what is showing at time *t*?". The UI schedules a wake-up and then
//! calls [`Notice::expire`]; tests move a [`ManualClock`] forward instead of
//! sleeping.
//!
//! [`SystemClock`] is platform-aware: `js_sys::Date::now()` on WASM and
//! `std::time::SystemTime` on native.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of the current time in milliseconds.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// A message that is visible until its expiry time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    current: Option<(NoticeKind, String, u64)>,
}

impl Notice {
    /// Show `message` from `now` for `ttl_millis`, replacing whatever was showing.
    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>, now: u64, ttl_millis: u64) {
        self.current = Some((kind, message.into(), now.saturating_add(ttl_millis)));
    }

    /// The message visible at `now`, if any.
    pub fn visible(&self, now: u64) -> Option<(NoticeKind, &str)> {
        match &self.current {
            Some((kind, message, expires_at)) if now < *expires_at => Some((*kind, message.as_str())),
            _ => None,
        }
    }

    /// The message currently held, ignoring expiry. Use after [`Notice::expire`].
    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, message, _)| message.as_str())
    }

    pub fn kind(&self) -> Option<NoticeKind> {
        self.current.as_ref().map(|(kind, _, _)| *kind)
    }

    /// Drop the message if it has expired at `now`. Returns whether anything was dropped.
    pub fn expire(&mut self, now: u64) -> bool {
        if matches!(&self.current, Some((_, _, expires_at)) if now >= *expires_at) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_ttl() {
        let clock = ManualClock::new(10_000);
        let mut notice = Notice::default();
        notice.show(NoticeKind::Error, "Something went wrong", clock.now_millis(), 3_000);

        clock.advance(2_999);
        assert_eq!(
            notice.visible(clock.now_millis()),
            Some((NoticeKind::Error, "Something went wrong"))
        );
        assert!(!notice.expire(clock.now_millis()));

        clock.advance(1);
        assert_eq!(notice.visible(clock.now_millis()), None);
        assert!(notice.expire(clock.now_millis()));
        assert_eq!(notice.message(), None);
    }

    #[test]
    fn test_newer_notice_survives_older_timer() {
        let clock = ManualClock::new(0);
        let mut notice = Notice::default();
        notice.show(NoticeKind::Error, "first", clock.now_millis(), 3_000);

        clock.advance(2_000);
        notice.show(NoticeKind::Success, "second", clock.now_millis(), 3_000);

        // The wake-up scheduled for the first message fires here.
        clock.advance(1_000);
        assert!(!notice.expire(clock.now_millis()));
        assert_eq!(notice.message(), Some("second"));
        assert_eq!(notice.kind(), Some(NoticeKind::Success));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(b >= a);
        assert!(a > 0);
    }
}
