use crate::persistence::{BlobStore, PersistenceResult};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Storage key the favorites blob lives under.
pub const FAVORITES_KEY: &str = "favoriteCourses";

/// Favorite course ids in the order they were added. Serializes as a plain
/// JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first occurrence of every id and drops blanks.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let ids = ids
            .into_iter()
            .map(Into::into)
            .filter(|id: &String| !id.is_empty() && seen.insert(id.clone()))
            .collect();
        Self { ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// The set after toggling `id`, plus whether `id` is a member afterwards.
    pub fn toggled(&self, id: &str) -> (FavoriteSet, bool) {
        if self.contains(id) {
            let ids = self.ids.iter().filter(|e| *e != id).cloned().collect();
            (FavoriteSet { ids }, false)
        } else {
            let mut ids = self.ids.clone();
            ids.push(id.to_string());
            (FavoriteSet { ids }, true)
        }
    }
}

pub type SubscriptionId = u64;

type Listener = Arc<dyn Fn(&FavoriteSet) + Send + Sync>;

/// Owns the persisted favorites. Every successful toggle writes the whole set
/// back before the new snapshot becomes visible, then notifies subscribers.
pub struct FavoritesStore<B: BlobStore> {
    backend: B,
    key: String,
    current: RwLock<Arc<FavoriteSet>>,
    write_lock: Mutex<()>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

impl<B: BlobStore> FavoritesStore<B> {
    pub fn open(backend: B) -> PersistenceResult<Self> {
        Self::open_with_key(backend, FAVORITES_KEY)
    }

    pub fn open_with_key(backend: B, key: impl Into<String>) -> PersistenceResult<Self> {
        let key = key.into();
        let initial = match backend.read_blob(&key)? {
            None => FavoriteSet::new(),
            Some(blob) => match serde_json::from_str::<Vec<String>>(&blob) {
                Ok(ids) => FavoriteSet::from_ids(ids),
                Err(err) => {
                    warn!(%key, error = %err, "ignoring unreadable favorites blob");
                    FavoriteSet::new()
                }
            },
        };
        debug!(%key, count = initial.len(), "opened favorites store");
        Ok(Self {
            backend,
            key,
            current: RwLock::new(Arc::new(initial)),
            write_lock: Mutex::new(()),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Adds `id` if absent, removes it otherwise, and returns whether it is a
    /// favorite afterwards. A blank id is ignored. If the write fails the
    /// in-memory set is left untouched.
    ///
    /// Listeners run before this returns and must not call `toggle` themselves.
    pub fn toggle(&self, id: &str) -> PersistenceResult<bool> {
        if id.is_empty() {
            return Ok(false);
        }
        let _guard = self.write_lock.lock();
        let current = self.list();
        let (next, member) = current.toggled(id);
        let blob = serde_json::to_string(&next)?;
        self.backend.write_blob(&self.key, &blob)?;
        let next = Arc::new(next);
        *self.current.write() = Arc::clone(&next);
        debug!(%id, member, count = next.len(), "toggled favorite");
        // Still under the write lock so listeners see snapshots in toggle order.
        self.notify(&next);
        Ok(next.contains(id))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.current.read().contains(id)
    }

    pub fn list(&self) -> Arc<FavoriteSet> {
        Arc::clone(&self.current.read())
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&FavoriteSet) + Send + Sync + 'static,
    {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn notify(&self, snapshot: &FavoriteSet) {
        // The listener list is cloned so listeners may (un)subscribe.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}
