//! Observable feature flag store
//!
//! Flag values live behind one lock. Each subscription gets its own queue,
//! seeded with the value at subscribe time and fed by every later change.

use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// Recognized feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    /// Show EUR prices next to USD prices
    SupportEur,
}

impl FeatureFlag {
    /// Stable key used in logs and configuration
    pub fn key(&self) -> &'static str {
        match self {
            FeatureFlag::SupportEur => "support_eur",
        }
    }

    /// Get all known flags
    pub fn all() -> &'static [FeatureFlag] {
        &[FeatureFlag::SupportEur]
    }
}

/// Snapshot of every flag value
pub type FlagMap = HashMap<FeatureFlag, bool>;

/// Per-subscriber stream of flag values
///
/// Yields the value current at subscribe time, then every later change in
/// write order, skipping repeats. Dropping the stream ends the subscription.
pub type FlagStream = BoxStream<'static, bool>;

/// Contract for reading, writing and observing feature flags
pub trait FeatureFlagProvider: Send + Sync {
    /// Observes changes to a specific feature flag value
    fn observe_flag_value(&self, flag: FeatureFlag) -> FlagStream;

    /// Gets the current value of a feature flag (`false` when unset)
    fn get_value(&self, flag: FeatureFlag) -> bool;

    /// Updates the value of a feature flag
    fn update(&self, flag: FeatureFlag, value: bool);
}

/// In-memory feature flag store
///
/// Every subscription owns an unbounded queue. A write that changes a value is
/// pushed to each live queue for that flag while the store lock is held, so a
/// subscriber sees every change in write order no matter how slowly it polls.
pub struct FeatureFlagStore {
    state: Mutex<FlagState>,
}

struct FlagState {
    values: FlagMap,
    subscribers: HashMap<FeatureFlag, Vec<mpsc::UnboundedSender<bool>>>,
}

impl FeatureFlagStore {
    /// Creates a store with every known flag switched off
    pub fn new() -> Self {
        Self::with_values(HashMap::new())
    }

    /// Creates a store seeded with the given values
    pub fn with_values(values: FlagMap) -> Self {
        let mut initial: FlagMap = FeatureFlag::all().iter().map(|f| (*f, false)).collect();
        initial.extend(values);

        Self {
            state: Mutex::new(FlagState {
                values: initial,
                subscribers: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlagState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current flag map
    pub fn snapshot(&self) -> FlagMap {
        self.lock().values.clone()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.lock()
            .subscribers
            .values()
            .flatten()
            .filter(|s| !s.is_closed())
            .count()
    }
}

impl Default for FeatureFlagStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureFlagProvider for FeatureFlagStore {
    fn observe_flag_value(&self, flag: FeatureFlag) -> FlagStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        {
            let mut state = self.lock();
            // The receiver is alive, so the current value is always queued first
            let _ = sender.send(flag_value(&state.values, flag));
            let subscribers = state.subscribers.entry(flag).or_default();
            subscribers.retain(|s| !s.is_closed());
            subscribers.push(sender);
        }

        stream::unfold(
            (receiver, None::<bool>),
            move |(mut receiver, last)| async move {
                // Queue closed: the store is gone
                while let Some(value) = receiver.recv().await {
                    if last != Some(value) {
                        tracing::trace!(flag = flag.key(), value, "Emitting flag value");
                        return Some((value, (receiver, Some(value))));
                    }
                }
                None
            },
        )
        .boxed()
    }

    fn get_value(&self, flag: FeatureFlag) -> bool {
        flag_value(&self.lock().values, flag)
    }

    fn update(&self, flag: FeatureFlag, value: bool) {
        let mut state = self.lock();
        let changed = flag_value(&state.values, flag) != value;

        if changed {
            state.values.insert(flag, value);
            if let Some(subscribers) = state.subscribers.get_mut(&flag) {
                subscribers.retain(|s| s.send(value).is_ok());
            }
        }
        drop(state);

        tracing::debug!(flag = flag.key(), value, changed, "Updated feature flag");
    }
}

fn flag_value(flags: &FlagMap, flag: FeatureFlag) -> bool {
    flags.get(&flag).copied().unwrap_or(false)
}

/// Drains every value a flag stream can yield without waiting
///
/// # Returns
/// The most recent ready value, or `None` if nothing new is pending.
pub fn latest_ready(stream: &mut FlagStream) -> Option<bool> {
    let mut latest = None;
    while let Some(Some(value)) = stream.next().now_or_never() {
        latest = Some(value);
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn next_value(stream: &mut FlagStream) -> Option<bool> {
        timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("timed out waiting for flag emission")
    }

    #[test]
    fn test_default_value() {
        let store = FeatureFlagStore::new();
        assert!(!store.get_value(FeatureFlag::SupportEur));
    }

    #[test]
    fn test_update_flag() {
        let store = FeatureFlagStore::new();
        assert!(!store.get_value(FeatureFlag::SupportEur));

        store.update(FeatureFlag::SupportEur, true);
        assert!(store.get_value(FeatureFlag::SupportEur));

        store.update(FeatureFlag::SupportEur, false);
        assert!(!store.get_value(FeatureFlag::SupportEur));
    }

    #[test]
    fn test_with_values_seeds_store() {
        let store = FeatureFlagStore::with_values(HashMap::from([(FeatureFlag::SupportEur, true)]));
        assert!(store.get_value(FeatureFlag::SupportEur));
        assert_eq!(store.snapshot().len(), FeatureFlag::all().len());
    }

    #[test]
    fn test_subscribe_emits_current_value_immediately() {
        let store = FeatureFlagStore::new();
        store.update(FeatureFlag::SupportEur, true);

        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);
        assert_eq!(stream.next().now_or_never(), Some(Some(true)));
        // Nothing else is pending until the flag changes
        assert!(stream.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn test_observe_flag_value() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);

        assert_eq!(next_value(&mut stream).await, Some(false));
        store.update(FeatureFlag::SupportEur, true);
        assert_eq!(next_value(&mut stream).await, Some(true));
    }

    #[tokio::test]
    async fn test_distinct_until_changed() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);
        let mut received = vec![next_value(&mut stream).await.unwrap()];

        store.update(FeatureFlag::SupportEur, true);
        store.update(FeatureFlag::SupportEur, true);
        store.update(FeatureFlag::SupportEur, true);

        received.push(next_value(&mut stream).await.unwrap());
        assert!(stream.next().now_or_never().is_none());
        assert_eq!(received, vec![false, true]);
    }

    #[tokio::test]
    async fn test_rewriting_current_value_does_not_emit() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);
        assert_eq!(next_value(&mut stream).await, Some(false));

        store.update(FeatureFlag::SupportEur, false);
        assert!(stream.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn test_toggle_sequence_is_delivered_in_order() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);
        let mut received = vec![next_value(&mut stream).await.unwrap()];

        for value in [true, false, true] {
            store.update(FeatureFlag::SupportEur, value);
            received.push(next_value(&mut stream).await.unwrap());
        }

        assert_eq!(received, vec![false, true, false, true]);
    }

    fn drain_ready(stream: &mut FlagStream) -> Vec<bool> {
        let mut values = Vec::new();
        while let Some(Some(value)) = stream.next().now_or_never() {
            values.push(value);
        }
        values
    }

    #[test]
    fn test_unpolled_subscriber_receives_every_change() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);
        assert_eq!(drain_ready(&mut stream), vec![false]);

        store.update(FeatureFlag::SupportEur, true);
        store.update(FeatureFlag::SupportEur, false);
        store.update(FeatureFlag::SupportEur, true);
        store.update(FeatureFlag::SupportEur, false);

        assert_eq!(drain_ready(&mut stream), vec![true, false, true, false]);
    }

    #[test]
    fn test_first_value_is_taken_at_subscribe_time() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);

        store.update(FeatureFlag::SupportEur, true);
        assert_eq!(drain_ready(&mut stream), vec![false, true]);
    }

    #[test]
    fn test_queued_values_skip_unchanged_writes() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);

        store.update(FeatureFlag::SupportEur, false);
        store.update(FeatureFlag::SupportEur, true);
        store.update(FeatureFlag::SupportEur, true);

        assert_eq!(drain_ready(&mut stream), vec![false, true]);
    }

    #[test]
    fn test_concurrent_writers_keep_subscriber_order() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);

        thread::scope(|s| {
            for i in 0..50 {
                let store = &store;
                s.spawn(move || store.update(FeatureFlag::SupportEur, i % 2 == 0));
            }
        });

        let received = drain_ready(&mut stream);
        assert_eq!(received.first(), Some(&false));
        assert!(received.windows(2).all(|pair| pair[0] != pair[1]));
        assert_eq!(received.last(), Some(&store.get_value(FeatureFlag::SupportEur)));
    }

    #[test]
    fn test_released_subscriptions_are_pruned() {
        let store = FeatureFlagStore::new();
        for _ in 0..10 {
            drop(store.observe_flag_value(FeatureFlag::SupportEur));
        }
        let _live = store.observe_flag_value(FeatureFlag::SupportEur);

        store.update(FeatureFlag::SupportEur, true);
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(store.lock().subscribers[&FeatureFlag::SupportEur].len(), 1);
    }

    #[tokio::test]
    async fn test_each_subscriber_tracks_its_own_history() {
        let store = FeatureFlagStore::new();
        let mut early = store.observe_flag_value(FeatureFlag::SupportEur);
        assert_eq!(next_value(&mut early).await, Some(false));

        store.update(FeatureFlag::SupportEur, true);
        let mut late = store.observe_flag_value(FeatureFlag::SupportEur);

        assert_eq!(next_value(&mut late).await, Some(true));
        assert_eq!(next_value(&mut early).await, Some(true));
    }

    #[test]
    fn test_latest_ready_drains_pending_values() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);

        assert_eq!(latest_ready(&mut stream), Some(false));
        assert_eq!(latest_ready(&mut stream), None);

        store.update(FeatureFlag::SupportEur, true);
        assert_eq!(latest_ready(&mut stream), Some(true));
    }

    #[tokio::test]
    async fn test_stream_ends_when_store_dropped() {
        let store = FeatureFlagStore::new();
        let mut stream = store.observe_flag_value(FeatureFlag::SupportEur);
        assert_eq!(next_value(&mut stream).await, Some(false));

        drop(store);
        assert_eq!(next_value(&mut stream).await, None);
    }

    #[test]
    fn test_dropping_stream_releases_subscription() {
        let store = FeatureFlagStore::new();
        let stream = store.observe_flag_value(FeatureFlag::SupportEur);
        assert_eq!(store.subscriber_count(), 1);

        drop(stream);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_thread_safety() {
        let store = FeatureFlagStore::new();

        thread::scope(|s| {
            for i in 0..100 {
                let store = &store;
                s.spawn(move || {
                    store.update(FeatureFlag::SupportEur, i % 2 == 0);
                    let _ = store.get_value(FeatureFlag::SupportEur);
                });
            }
        });

        store.update(FeatureFlag::SupportEur, true);
        assert!(store.get_value(FeatureFlag::SupportEur));
    }
}
