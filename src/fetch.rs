//! Generic fetch adapter: one asynchronous operation in, an observable
//! `{data, loading, error}` view out, plus manual re-invocation.
//!
//! Pages drive every read through a `Remote` so loading and error
//! presentation is uniform. Mutations are not routed through it; callers
//! handle those ad hoc and refetch afterwards.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::api::user_message;

/// Snapshot of one fetch slot. At most one of `loading`, a fresh `data`,
/// or `error` describes the latest attempt; stale `data` is kept visible
/// through a failed refetch.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

struct RemoteInner<T, K> {
    state: Mutex<FetchState<T>>,
    last_key: Mutex<Option<K>>,
    /// Generation counter: a settlement only lands if no newer invocation
    /// was issued while it was in flight.
    issued: AtomicU64,
    auto: bool,
}

/// Stateful adapter around an async operation returning `T`, keyed by `K`
/// for the automatic-invalidation path.
pub struct Remote<T, K = ()> {
    inner: Arc<RemoteInner<T, K>>,
}

impl<T, K> Clone for Remote<T, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, K: PartialEq> Remote<T, K> {
    /// Auto mode: `sync` runs the operation once per distinct key.
    pub fn new() -> Self {
        Self::with_auto(true)
    }

    /// Manual mode: nothing runs until `refetch` is called.
    pub fn manual() -> Self {
        Self::with_auto(false)
    }

    fn with_auto(auto: bool) -> Self {
        Self {
            inner: Arc::new(RemoteInner {
                state: Mutex::new(FetchState::idle()),
                last_key: Mutex::new(None),
                issued: AtomicU64::new(0),
                auto,
            }),
        }
    }

    pub fn state(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.inner.state.lock().expect("fetch lock poisoned").clone()
    }

    /// Automatic invocation: runs the operation if auto mode is on and the
    /// key differs from the last one synced (or nothing ran yet).
    pub async fn sync<F, Fut>(&self, key: K, op: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.inner.auto {
            return;
        }
        {
            let mut last = self.inner.last_key.lock().expect("fetch lock poisoned");
            if last.as_ref() == Some(&key) {
                return;
            }
            *last = Some(key);
        }
        self.run(op).await;
    }

    /// One fresh invocation, regardless of mode or key history.
    pub async fn refetch<F, Fut>(&self, op: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run(op).await;
    }

    async fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let generation = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.inner.state.lock().expect("fetch lock poisoned");
            state.loading = true;
            state.error = None;
        }

        let result = op().await;

        // A newer invocation was issued while this one was in flight; its
        // settlement owns the slot now.
        if self.inner.issued.load(Ordering::SeqCst) != generation {
            return;
        }

        let mut state = self.inner.state.lock().expect("fetch lock poisoned");
        match result {
            Ok(value) => {
                state.data = Some(value);
                state.error = None;
            }
            Err(e) => {
                // Prior data stays visible; only the message changes
                state.error = Some(user_message(&e));
            }
        }
        state.loading = false;
    }
}

impl<T, K: PartialEq> Default for Remote<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[tokio::test]
    async fn test_success_transitions() {
        let remote: Remote<Vec<i64>> = Remote::new();
        let idle = remote.state();
        assert!(!idle.loading);
        assert!(idle.data.is_none());
        assert!(idle.error.is_none());

        remote.refetch(|| async { Ok(vec![1, 2, 3]) }).await;
        let state = remote.state();
        assert!(!state.loading);
        assert_eq!(state.data.unwrap(), vec![1, 2, 3]);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_data() {
        let remote: Remote<i64> = Remote::new();
        remote.refetch(|| async { Ok(41) }).await;

        remote
            .refetch(|| async { Err(anyhow::anyhow!("Network Error")) })
            .await;
        let state = remote.state();
        assert!(!state.loading);
        assert_eq!(state.data, Some(41));
        assert_eq!(state.error.as_deref(), Some("Network Error"));

        // A subsequent success clears the error again
        remote.refetch(|| async { Ok(42) }).await;
        let state = remote.state();
        assert_eq!(state.data, Some(42));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_structured_detail_extracted() {
        let remote: Remote<i64> = Remote::new();
        remote
            .refetch(|| async {
                Err(ApiError::Validation(r#"{"detail": "Invalid credentials"}"#.into()).into())
            })
            .await;
        assert_eq!(
            remote.state().error.as_deref(),
            Some("Invalid credentials")
        );
    }

    #[tokio::test]
    async fn test_loading_visible_while_in_flight() {
        let remote: Remote<i64> = Remote::new();
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        let task = {
            let remote = remote.clone();
            tokio::spawn(async move {
                remote
                    .refetch(|| async {
                        gate.await.ok();
                        Ok(7)
                    })
                    .await;
            })
        };

        // Wait until the invocation has marked itself in flight
        while !remote.state().loading {
            tokio::task::yield_now().await;
        }
        assert!(remote.state().error.is_none());

        release.send(()).unwrap();
        task.await.unwrap();
        let state = remote.state();
        assert!(!state.loading);
        assert_eq!(state.data, Some(7));
    }

    #[tokio::test]
    async fn test_newest_invocation_wins() {
        let remote: Remote<&'static str> = Remote::new();
        let (release_first, gate_first) = tokio::sync::oneshot::channel::<()>();

        let first = {
            let remote = remote.clone();
            tokio::spawn(async move {
                remote
                    .refetch(|| async {
                        gate_first.await.ok();
                        Ok("first")
                    })
                    .await;
            })
        };
        while !remote.state().loading {
            tokio::task::yield_now().await;
        }

        // Second invocation issued and settled while the first hangs
        remote.refetch(|| async { Ok("second") }).await;
        assert_eq!(remote.state().data, Some("second"));

        // First settles late; its result must not clobber the newer one
        release_first.send(()).unwrap();
        first.await.unwrap();
        let state = remote.state();
        assert_eq!(state.data, Some("second"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_manual_mode_never_auto_fetches() {
        let remote: Remote<i64> = Remote::manual();
        remote.sync((), || async { Ok(1) }).await;
        assert!(remote.state().data.is_none());

        // refetch still works regardless of mode
        remote.refetch(|| async { Ok(1) }).await;
        assert_eq!(remote.state().data, Some(1));
    }

    #[tokio::test]
    async fn test_sync_runs_once_per_key() {
        let remote: Remote<i64, i64> = Remote::new();
        remote.sync(10, || async { Ok(100) }).await;
        assert_eq!(remote.state().data, Some(100));

        // Same key: no re-invocation
        remote.sync(10, || async { Ok(999) }).await;
        assert_eq!(remote.state().data, Some(100));

        // New key: re-invokes
        remote.sync(11, || async { Ok(111) }).await;
        assert_eq!(remote.state().data, Some(111));
    }

    #[tokio::test]
    async fn test_fallback_message_when_error_is_blank() {
        let remote: Remote<i64> = Remote::new();
        remote
            .refetch(|| async { Err(anyhow::anyhow!("")) })
            .await;
        assert_eq!(
            remote.state().error.as_deref(),
            Some(crate::api::FALLBACK_MESSAGE)
        );
    }
}
