//! Theme preference persistence.
//!
//! Best-effort by contract: a store that cannot read reports "nothing stored"
//! and a store that cannot write drops the value, so the sky always falls back
//! to the dark default rather than failing.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use web_sys::Storage;

/// A single-key, origin-scoped preference store.
pub trait PreferenceStore {
    /// The stored value, or `None` if absent or unreadable.
    fn load(&self) -> Option<String>;

    /// Store `value`. Failures are swallowed.
    fn save(&mut self, value: &str);
}

/// `window.localStorage` under one key.
pub struct LocalStore {
    storage: Option<Storage>,
    key: String,
}

impl LocalStore {
    /// Open `localStorage` for `key`.
    ///
    /// If storage is disabled (private mode, sandboxed iframe) the store
    /// still works but never remembers anything.
    #[must_use]
    pub fn open(window: &web_sys::Window, key: &str) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("preference store: localStorage unavailable: {err:?}");
                None
            }
        };
        Self { storage, key: key.to_owned() }
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(&self.key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("preference store: read of {} failed: {err:?}", self.key);
                None
            }
        }
    }

    fn save(&mut self, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(err) = storage.set_item(&self.key, value) {
            log::warn!("preference store: write of {} failed: {err:?}", self.key);
        }
    }
}

/// In-memory store, used where no browser storage exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value`.
    #[must_use]
    pub fn with_value(value: &str) -> Self {
        Self { value: Some(value.to_owned()), writes: 0 }
    }

    /// Number of `save` calls received.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, value: &str) {
        self.writes += 1;
        self.value = Some(value.to_owned());
    }
}
