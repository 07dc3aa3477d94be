//! Session expiry notifications
//!
//! Whoever owns the login session calls [`SessionNotifier::check`] on a
//! timer; views subscribe to hear about the coming expiry. Dropping a
//! [`Subscription`] unsubscribes.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

type Handler = Arc<dyn Fn(&SessionNotice) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    handlers: BTreeMap<u64, Handler>,
}

/// Something the session wants its listeners to know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNotice {
    /// The session ends in `remaining`
    ExpiringSoon { remaining: Duration },
    /// The session has ended
    Expired,
}

impl SessionNotice {
    /// Remaining time as `m:ss`, `0:00` once expired
    pub fn remaining_label(&self) -> String {
        let secs = match self {
            SessionNotice::ExpiringSoon { remaining } => remaining.as_secs(),
            SessionNotice::Expired => 0,
        };
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

/// Fan-out of session notices to subscribed handlers
#[derive(Clone, Default)]
pub struct SessionNotifier {
    subscribers: Arc<Mutex<Subscribers>>,
}

impl SessionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays registered while the returned value lives
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SessionNotice) + Send + Sync + 'static,
    {
        let id = match self.subscribers.lock() {
            Ok(mut subscribers) => {
                let id = subscribers.next_id;
                subscribers.next_id += 1;
                subscribers.handlers.insert(id, Arc::new(handler));
                id
            }
            Err(_) => {
                log::error!("Session subscribers lock poisoned, handler not registered");
                u64::MAX
            }
        };
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Deliver a notice to every live subscriber
    ///
    /// Handlers run without the subscriber lock held, so they may subscribe
    /// or drop their own subscription.
    pub fn notify(&self, notice: SessionNotice) {
        let handlers: Vec<Handler> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers.handlers.values().cloned().collect(),
            Err(_) => {
                log::error!("Session subscribers lock poisoned, dropping {:?}", notice);
                return;
            }
        };
        log::debug!(
            "Session notice {:?} to {} subscriber(s)",
            notice,
            handlers.len()
        );
        for handler in handlers {
            handler(&notice);
        }
    }

    /// Notify if `now` falls within `warn_before` of `expires_at`.
    ///
    /// Returns the notice that was sent, if any.
    pub fn check(
        &self,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        warn_before: Duration,
    ) -> Option<SessionNotice> {
        let notice = match (expires_at - now).to_std() {
            // Negative durations do not convert
            Err(_) => SessionNotice::Expired,
            Ok(remaining) if remaining.is_zero() => SessionNotice::Expired,
            Ok(remaining) if remaining <= warn_before => SessionNotice::ExpiringSoon { remaining },
            Ok(_) => return None,
        };
        self.notify(notice);
        Some(notice)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|subscribers| subscribers.handlers.len())
            .unwrap_or(0)
    }
}

/// Handle for a registered handler
pub struct Subscription {
    id: u64,
    subscribers: Weak<Mutex<Subscribers>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(subscribers) = self.subscribers.upgrade() else {
            return;
        };
        let removed = match subscribers.lock() {
            Ok(mut subscribers) => subscribers.handlers.remove(&self.id).is_some(),
            Err(_) => false,
        };
        if !removed {
            log::debug!("Session subscription {} was not registered", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remaining_label() {
        let notice = SessionNotice::ExpiringSoon {
            remaining: Duration::from_secs(125),
        };
        assert_eq!(notice.remaining_label(), "2:05");

        let notice = SessionNotice::ExpiringSoon {
            remaining: Duration::from_secs(9),
        };
        assert_eq!(notice.remaining_label(), "0:09");

        assert_eq!(SessionNotice::Expired.remaining_label(), "0:00");
    }

    #[test]
    fn test_drop_unsubscribes() {
        let notifier = SessionNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let subscription = notifier.subscribe(move |notice| sink.lock().unwrap().push(*notice));
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.notify(SessionNotice::Expired);
        drop(subscription);
        assert_eq!(notifier.subscriber_count(), 0);
        notifier.notify(SessionNotice::Expired);

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_handler_can_unsubscribe_itself() {
        let notifier = SessionNotifier::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(Mutex::new(0));

        let own = slot.clone();
        let counter = calls.clone();
        let subscription = notifier.subscribe(move |_| {
            *counter.lock().unwrap() += 1;
            // Teardown on expiry
            own.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(subscription);

        notifier.notify(SessionNotice::Expired);
        assert_eq!(notifier.subscriber_count(), 0);

        notifier.notify(SessionNotice::Expired);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_handler_can_subscribe() {
        let notifier = SessionNotifier::new();
        let late: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

        let inner = notifier.clone();
        let sink = late.clone();
        let _subscription = notifier.subscribe(move |_| {
            sink.lock().unwrap().push(inner.subscribe(|_| {}));
        });

        notifier.notify(SessionNotice::Expired);
        assert_eq!(notifier.subscriber_count(), 2);
        assert_eq!(late.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_subscription_outliving_notifier() {
        let notifier = SessionNotifier::new();
        let subscription = notifier.subscribe(|_| {});
        drop(notifier);
        drop(subscription);
    }

    #[test]
    fn test_check_window() {
        let notifier = SessionNotifier::new();
        let expires = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let warn = Duration::from_secs(300);

        let early = expires - chrono::Duration::minutes(10);
        assert_eq!(notifier.check(early, expires, warn), None);

        let close = expires - chrono::Duration::seconds(90);
        assert_eq!(
            notifier.check(close, expires, warn),
            Some(SessionNotice::ExpiringSoon {
                remaining: Duration::from_secs(90)
            })
        );

        let late = expires + chrono::Duration::seconds(1);
        assert_eq!(
            notifier.check(late, expires, warn),
            Some(SessionNotice::Expired)
        );
    }
}
