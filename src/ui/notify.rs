//! Transient banners. Each alert carries its own deadline, so showing a
//! second alert never shortens or removes the first.

use std::time::{Duration, Instant};

pub(crate) type AlertId = u64;

/// Longest an alert may stay on screen.
pub(crate) const MAX_LIFETIME: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Alert {
    pub(crate) id: AlertId,
    pub(crate) message: String,
    pub(crate) kind: AlertKind,
    pub(crate) expires_at: Instant,
}

#[derive(Debug)]
pub(crate) struct Notifications {
    lifetime: Duration,
    next_id: AlertId,
    active: Vec<Alert>,
}

impl Notifications {
    pub(crate) fn new(lifetime: Duration) -> Self {
        Self {
            lifetime: lifetime.min(MAX_LIFETIME),
            next_id: 1,
            active: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, message: impl Into<String>, kind: AlertKind, now: Instant) -> AlertId {
        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Alert {
            id,
            message: message.into(),
            kind,
            expires_at: now.checked_add(self.lifetime).unwrap_or(now),
        });
        id
    }

    /// Remove exactly the alert `id`. Returns false if it was already gone.
    pub(crate) fn dismiss(&mut self, id: AlertId) -> bool {
        let before = self.active.len();
        self.active.retain(|a| a.id != id);
        self.active.len() != before
    }

    /// Drop every alert whose own deadline has passed.
    pub(crate) fn expire(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|a| a.expires_at > now);
        before - self.active.len()
    }

    /// Oldest first.
    pub(crate) fn active(&self) -> &[Alert] {
        &self.active
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const LIFETIME: Duration = Duration::from_secs(3);

    #[test]
    fn test_push_assigns_distinct_ids() {
        let mut n = Notifications::new(LIFETIME);
        let now = Instant::now();
        let a = n.push("one", AlertKind::Success, now);
        let b = n.push("two", AlertKind::Error, now);
        assert_ne!(a, b);
        assert_eq!(n.active().len(), 2);
        assert_eq!(n.active()[0].message, "one");
        assert_eq!(n.active()[1].kind, AlertKind::Error);
    }

    #[test]
    fn test_each_alert_expires_on_its_own_deadline() {
        let mut n = Notifications::new(LIFETIME);
        let t0 = Instant::now();
        n.push("first", AlertKind::Success, t0);
        n.push("second", AlertKind::Success, t0 + Duration::from_secs(2));

        assert_eq!(n.expire(t0 + Duration::from_millis(2999)), 0);
        assert_eq!(n.expire(t0 + LIFETIME), 1);
        assert_eq!(n.active().len(), 1);
        assert_eq!(n.active()[0].message, "second");

        assert_eq!(n.expire(t0 + Duration::from_secs(5)), 1);
        assert!(n.is_empty());
    }

    #[test]
    fn test_dismiss_targets_only_that_alert() {
        let mut n = Notifications::new(LIFETIME);
        let now = Instant::now();
        let first = n.push("first", AlertKind::Success, now);
        let second = n.push("second", AlertKind::Error, now);

        assert!(n.dismiss(second));
        assert_eq!(n.active().len(), 1);
        assert_eq!(n.active()[0].id, first);
    }

    #[test]
    fn test_lifetime_is_capped() {
        let mut n = Notifications::new(Duration::MAX);
        let now = Instant::now();
        n.push("long", AlertKind::Success, now);
        assert_eq!(n.active()[0].expires_at, now + MAX_LIFETIME);
        assert_eq!(n.expire(now + MAX_LIFETIME), 1);
    }

    #[test]
    fn test_dismiss_after_expiry_is_noop() {
        let mut n = Notifications::new(LIFETIME);
        let now = Instant::now();
        let id = n.push("gone", AlertKind::Success, now);
        n.expire(now + LIFETIME);
        assert!(!n.dismiss(id));
        assert!(n.is_empty());
    }
}
