use paper_trails_core::preferences::PreferenceStore;

/// `window.localStorage`, when the browser allows it.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("failed to store {key}: {err:?}");
        }
    }
}

/// Whether the system colour scheme is dark.
pub fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|m| m.matches())
}
