//! Theme and portrait preferences.
//!
//! Only the theme is persisted, as a single string flag in a
//! [`PreferenceStore`] (`localStorage` on the web).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "paperTrailsTheme";

pub const DEFAULT_PORTRAIT: &str = "images/default.png";
pub const DEFAULT_PORTRAIT_DARK: &str = "images/default_dark.png";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Placeholder portrait for people without a photo.
    pub fn default_portrait(self) -> &'static str {
        match self {
            Theme::Light => DEFAULT_PORTRAIT,
            Theme::Dark => DEFAULT_PORTRAIT_DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Which portrait variant people are drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortraitStyle {
    #[default]
    Photo,
    Cartoon,
}

/// A persisted string key/value store.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

/// Stored theme if valid, else the system preference, else light.
pub fn initial_theme(store: &dyn PreferenceStore, prefers_dark: bool) -> Theme {
    match store.get(THEME_KEY).map(|raw| raw.parse::<Theme>()) {
        Some(Ok(theme)) => theme,
        Some(Err(())) => {
            log::warn!("ignoring unknown stored theme");
            system_theme(prefers_dark)
        }
        None => system_theme(prefers_dark),
    }
}

fn system_theme(prefers_dark: bool) -> Theme {
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

/// Flip the theme and persist the new choice.
pub fn toggle_theme(current: Theme, store: &mut dyn PreferenceStore) -> Theme {
    let next = current.toggled();
    store.set(THEME_KEY, next.as_str());
    log::info!("theme set to {next}");
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_theme_wins() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "dark");
        assert_eq!(initial_theme(&store, false), Theme::Dark);
        store.set(THEME_KEY, "light");
        assert_eq!(initial_theme(&store, true), Theme::Light);
    }

    #[test]
    fn falls_back_to_system_preference() {
        let mut store = MemoryStore::default();
        assert_eq!(initial_theme(&store, true), Theme::Dark);
        assert_eq!(initial_theme(&store, false), Theme::Light);
        store.set(THEME_KEY, "sepia");
        assert_eq!(initial_theme(&store, true), Theme::Dark);
    }

    #[test]
    fn toggle_persists() {
        let mut store = MemoryStore::default();
        let theme = toggle_theme(Theme::Light, &mut store);
        assert_eq!(theme, Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(theme.default_portrait(), "images/default_dark.png");
    }
}
