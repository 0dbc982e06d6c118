//! Snapshot publication for controllers.
//!
//! Each controller owns an `Observable` holding its current view model.
//! Views either read the latest snapshot directly or hold a
//! `watch::Receiver` and redraw when `has_changed()` reports an update.

use tokio::sync::watch;

#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// New receiver; its first `changed()` fires on the next publish.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Borrow the current snapshot. Do not hold across a publish.
    pub fn snapshot(&self) -> watch::Ref<'_, T> {
        self.tx.borrow()
    }

    /// Replace the snapshot and notify subscribers, even when none exist.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate in place and notify subscribers.
    pub fn modify<F>(&self, edit: F)
    where
        F: FnOnce(&mut T),
    {
        self.tx.send_modify(edit);
    }
}

impl<T: Clone> Observable<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let observable = Observable::new(1u32);
        observable.publish(2);
        assert_eq!(observable.get(), 2);
    }

    #[test]
    fn test_subscriber_sees_changes() {
        let observable = Observable::new(String::from("a"));
        let mut rx = observable.subscribe();
        assert!(!rx.has_changed().unwrap());

        observable.modify(|value| value.push('b'));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "ab");
        assert!(!rx.has_changed().unwrap());
    }
}
