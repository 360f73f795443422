//! The query client: keyed cache with de-duplication and invalidation.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_api::ApiError;
use tokio::sync::{broadcast, watch};

use crate::error::QueryError;
use crate::key::QueryKey;
use crate::state::{FetchStatus, QueryState};

/// Untyped fetch future. Values are cached as `serde_json::Value` and
/// typed at the edge, so entries for different resources share one map.
type FetchFuture = Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send>>;

/// Recorded fetch function, replayable for background refetch.
type Fetcher = Arc<dyn Fn() -> FetchFuture + Send + Sync>;

/// Notification emitted when the cache changes, for hosts that render
/// cached reads reactively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A fetch resolved and the entry now holds a fresh value.
    Updated(QueryKey),
    /// A fetch failed; the entry keeps its last good value.
    Failed(QueryKey),
    /// The entry was marked stale by a mutation.
    Invalidated(QueryKey),
}

struct CacheEntry {
    value: Option<Value>,
    status: FetchStatus,
    /// The most recent failure, kept as the original error so joined
    /// readers receive it with its classification intact.
    error: Option<ApiError>,
    stale: bool,
    /// Monotonic ticket of the most recently started fetch. A resolution
    /// whose ticket no longer matches is discarded (last writer wins).
    generation: u64,
    /// Present while a fetch is in flight; concurrent readers of the same
    /// key subscribe instead of issuing their own request.
    inflight: Option<watch::Sender<()>>,
    /// Last fetch function seen for this key, replayed when an observed
    /// entry is invalidated.
    fetcher: Option<Fetcher>,
    observers: usize,
}

impl CacheEntry {
    fn new() -> Self {
        Self {
            value: None,
            status: FetchStatus::Idle,
            error: None,
            stale: false,
            generation: 0,
            inflight: None,
            fetcher: None,
            observers: 0,
        }
    }
}

/// What a reader should do for a key, decided under the lock.
enum Plan {
    /// Fresh value available; serve it without touching the network.
    Cached(Value),
    /// Another fetch for this key is already in flight; wait for it.
    Join(watch::Receiver<()>),
    /// This reader owns the fetch.
    Run { generation: u64 },
}

/// Keyed cache of server-state reads.
///
/// Cloning is cheap and all clones share one cache. Locks guard only
/// short bookkeeping sections; no network request runs under a lock.
#[derive(Clone)]
pub struct QueryClient {
    entries: Arc<RwLock<HashMap<QueryKey, CacheEntry>>>,
    generations: Arc<AtomicU64>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient").finish_non_exhaustive()
    }
}

impl QueryClient {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            generations: Arc::new(AtomicU64::new(1)),
            events,
        }
    }

    /// Subscribe to cache change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Fetch the value for `key`, deserialized as `T`.
    ///
    /// Serves the cached value when the entry is fresh. When the entry is
    /// absent or stale, runs `fetcher` - unless a fetch for the same key
    /// is already in flight, in which case this call waits for that
    /// request's resolution instead of duplicating it.
    ///
    /// On failure the entry keeps its last good value and the error is
    /// returned to the caller.
    ///
    /// # Errors
    ///
    /// [`QueryError::Fetch`] when the fetch fails, [`QueryError::Deserialize`]
    /// when the cached value does not decode as `T`.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, QueryError>
    where
        T: DeserializeOwned,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let fetcher: Fetcher = Arc::new(move || Box::pin(fetcher()));
        let value = self.fetch_value(key, fetcher).await?;
        serde_json::from_value(value).map_err(|e| QueryError::Deserialize(e.to_string()))
    }

    /// Snapshot the entry for `key`, typed at the edge.
    ///
    /// An absent entry yields [`QueryState::default()`], whose `status` is
    /// [`FetchStatus::Idle`] - that is how callers tell a never-requested
    /// key from one whose first fetch is pending. A value that does not
    /// decode as `T` is reported through `error` instead of `data`.
    #[must_use]
    pub fn read_state<T: DeserializeOwned>(&self, key: &QueryKey) -> QueryState<T> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = entries.get(key) else {
            return QueryState::default();
        };

        let mut state = QueryState {
            data: None,
            is_pending: entry.value.is_none() && entry.status == FetchStatus::Loading,
            error: entry.error.as_ref().map(ToString::to_string),
            is_invalidated: entry.stale,
            status: entry.status,
        };
        if let Some(value) = &entry.value {
            match serde_json::from_value(value.clone()) {
                Ok(data) => state.data = Some(data),
                Err(e) => state.error = Some(e.to_string()),
            }
        }
        state
    }

    /// Mark the entry for `key` stale.
    ///
    /// The cached value stays in place so hosts keep rendering it; the
    /// next [`fetch`](Self::fetch) refetches. An entry with live observers
    /// refetches in the background immediately. An in-flight fetch for the
    /// key is not cancelled, but its resolution is superseded and will be
    /// discarded.
    pub fn invalidate(&self, key: &QueryKey) {
        let refetch = {
            let mut entries = self
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let Some(entry) = entries.get_mut(key) else {
                return;
            };
            entry.stale = true;
            entry.generation = self.generations.fetch_add(1, Ordering::SeqCst);
            // Dropping the sender wakes joined readers, who re-plan and
            // either join the replacement fetch or start one themselves.
            entry.inflight = None;
            metrics::counter!("query.invalidations").increment(1);
            if entry.observers > 0 {
                entry.fetcher.clone()
            } else {
                None
            }
        };
        tracing::debug!(key = %key, "Cache entry invalidated");
        let _ = self.events.send(CacheEvent::Invalidated(key.clone()));

        if let Some(fetcher) = refetch {
            let client = self.clone();
            let key = key.clone();
            tokio::spawn(async move {
                if let Err(error) = client.fetch_value(key.clone(), fetcher).await {
                    tracing::warn!(key = %key, %error, "Background refetch failed");
                }
            });
        }
    }

    /// Invalidate every entry whose key names `resource`.
    ///
    /// Mutations call this with the collection resource (`products`) so
    /// all paginated and filtered variants go stale at once.
    pub fn invalidate_resource(&self, resource: &str) {
        let keys: Vec<QueryKey> = {
            let entries = self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            entries
                .keys()
                .filter(|key| key.resource() == resource)
                .cloned()
                .collect()
        };
        for key in keys {
            self.invalidate(&key);
        }
    }

    /// Register a live observer of `key`, for as long as the guard lives.
    ///
    /// Observed entries refetch in the background when invalidated;
    /// unobserved entries wait for the next explicit fetch.
    #[must_use]
    pub fn observe(&self, key: QueryKey) -> ObserverGuard {
        {
            let mut entries = self
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            entries
                .entry(key.clone())
                .or_insert_with(CacheEntry::new)
                .observers += 1;
        }
        ObserverGuard {
            client: self.clone(),
            key,
        }
    }

    /// Untyped fetch core shared by typed reads and background refetch.
    fn fetch_value(
        &self,
        key: QueryKey,
        fetcher: Fetcher,
    ) -> Pin<Box<dyn Future<Output = Result<Value, QueryError>> + Send + '_>> {
        Box::pin(async move {
            let plan = self.plan_fetch(&key, &fetcher);
            match plan {
                Plan::Cached(value) => Ok(value),
                Plan::Join(mut rx) => {
                    metrics::counter!("query.dedup.joined").increment(1);
                    if rx.changed().await.is_err() {
                        // The in-flight fetch was superseded before it
                        // resolved; re-plan from scratch.
                        return self.fetch_value(key, fetcher).await;
                    }
                    let entries = self
                        .entries
                        .read()
                        .unwrap_or_else(PoisonError::into_inner);
                    match entries.get(&key) {
                        Some(entry) if entry.status == FetchStatus::Error => {
                            // Hand the owner's error over as-is, so a 401
                            // or a structured rejection keeps its variant.
                            let error = entry
                                .error
                                .clone()
                                .unwrap_or_else(|| ApiError::Request("Fetch failed".to_string()));
                            Err(QueryError::Fetch(error))
                        }
                        Some(entry) => entry.value.clone().ok_or_else(|| {
                            QueryError::Fetch(ApiError::Request("Fetch produced no value".into()))
                        }),
                        None => Err(QueryError::Fetch(ApiError::Request(
                            "Cache entry dropped while waiting".into(),
                        ))),
                    }
                }
                Plan::Run { generation } => self.run_fetch(&key, &fetcher, generation).await,
            }
        })
    }

    /// Decide, under the lock, how to serve one read.
    fn plan_fetch(&self, key: &QueryKey, fetcher: &Fetcher) -> Plan {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
        entry.fetcher = Some(Arc::clone(fetcher));

        if let Some(inflight) = &entry.inflight {
            return Plan::Join(inflight.subscribe());
        }
        if !entry.stale && entry.status == FetchStatus::Success {
            if let Some(value) = &entry.value {
                metrics::counter!("query.cache.hits").increment(1);
                return Plan::Cached(value.clone());
            }
        }

        metrics::counter!("query.cache.misses").increment(1);
        let generation = self.generations.fetch_add(1, Ordering::SeqCst);
        entry.generation = generation;
        if entry.status != FetchStatus::Success {
            entry.status = FetchStatus::Loading;
        }
        let (tx, _rx) = watch::channel(());
        entry.inflight = Some(tx);
        Plan::Run { generation }
    }

    /// Run the owned fetch and commit its resolution, unless superseded.
    async fn run_fetch(
        &self,
        key: &QueryKey,
        fetcher: &Fetcher,
        generation: u64,
    ) -> Result<Value, QueryError> {
        // The owning task can be aborted mid-await (cancellable effects).
        // The guard clears the in-flight marker on drop so joined readers
        // wake and re-plan instead of waiting on a fetch nobody is running.
        let _inflight = InflightGuard {
            entries: Arc::clone(&self.entries),
            key: key.clone(),
            generation,
        };
        let result = fetcher().await;

        let committed = {
            let mut entries = self
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            match entries.get_mut(key) {
                Some(entry) if entry.generation == generation => {
                    match &result {
                        Ok(value) => {
                            entry.value = Some(value.clone());
                            entry.status = FetchStatus::Success;
                            entry.error = None;
                            entry.stale = false;
                        }
                        Err(error) => {
                            // Keep the last good value; only the error
                            // surface changes.
                            entry.status = FetchStatus::Error;
                            entry.error = Some(error.clone());
                        }
                    }
                    if let Some(tx) = entry.inflight.take() {
                        let _ = tx.send(());
                    }
                    true
                }
                _ => {
                    metrics::counter!("query.fetch.discarded").increment(1);
                    false
                }
            }
        };

        if committed {
            let event = match &result {
                Ok(_) => CacheEvent::Updated(key.clone()),
                Err(_) => CacheEvent::Failed(key.clone()),
            };
            let _ = self.events.send(event);
        } else {
            tracing::debug!(key = %key, "Discarded superseded fetch resolution");
        }

        // The owner always receives its own response value, even when a
        // newer fetch superseded it in the cache.
        result.map_err(QueryError::Fetch)
    }
}

/// Clears a fetch's in-flight marker when its owning task stops, whether
/// by resolution or by abort. Dropping the stored watch sender wakes any
/// joined readers, who then re-plan.
struct InflightGuard {
    entries: Arc<RwLock<HashMap<QueryKey, CacheEntry>>>,
    key: QueryKey,
    generation: u64,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get_mut(&self.key) {
            // A newer fetch owns the entry now; leave its marker alone.
            if entry.generation == self.generation {
                entry.inflight = None;
            }
        }
    }
}

/// Decrements the observer count for a key when dropped.
pub struct ObserverGuard {
    client: QueryClient,
    key: QueryKey,
}

impl std::fmt::Debug for ObserverGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverGuard")
            .field("key", &self.key)
            .finish()
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        let mut entries = self
            .client
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get_mut(&self.key) {
            entry.observers = entry.observers.saturating_sub(1);
        }
    }
}
