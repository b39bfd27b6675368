use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Default key under which dismissed announcement ids are stored.
pub const DISMISSAL_KEY: &str = "dismissedAnnouncements";

/// Minimal persistent key-value capability. Implementations decide where the
/// values live (process memory, a browser cookie, ...).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
    }
}

/// Store backed by the visitor's cookies. Each key maps to one cookie of the
/// same name; writes accumulate in the jar, which the handler returns with
/// its response.
pub struct CookieStore {
    jar: Mutex<CookieJar>,
}

impl CookieStore {
    pub fn new(jar: CookieJar) -> Self {
        Self {
            jar: Mutex::new(jar),
        }
    }

    /// The jar including every write made through this store.
    pub fn jar(&self) -> CookieJar {
        self.jar.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        let jar = self.jar.lock().unwrap_or_else(|e| e.into_inner());
        let cookie = jar.get(key)?;
        urlencoding::decode(cookie.value())
            .map(|v| v.into_owned())
            .ok()
    }

    fn set(&self, key: &str, value: String) {
        let cookie = Cookie::build((key.to_string(), urlencoding::encode(&value).into_owned()))
            .path("/")
            .same_site(SameSite::Lax)
            .permanent()
            .build();

        let mut jar = self.jar.lock().unwrap_or_else(|e| e.into_inner());
        *jar = jar.clone().add(cookie);
    }
}

/// The ids this visitor has chosen to hide. Only ever grows.
pub struct DismissalSet {
    store: Arc<dyn KeyValueStore>,
    key: String,
    ids: BTreeSet<String>,
}

impl DismissalSet {
    /// Reads the store once. Missing or unreadable values start an empty set.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = match store.get(&key) {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::debug!("Ignoring malformed dismissal value under {}: {}", key, e);
                    BTreeSet::new()
                }
            },
            None => BTreeSet::new(),
        };

        Self { store, key, ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Adds the id and writes the whole set back to the store.
    pub fn dismiss(&mut self, id: &str) {
        self.ids.insert(id.to_string());
        self.persist();
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) {
        let ids: Vec<&str> = self.ids().collect();
        match serde_json::to_string(&ids) {
            Ok(value) => self.store.set(&self.key, value),
            Err(e) => tracing::warn!("Failed to encode dismissal set: {}", e),
        }
    }
}
