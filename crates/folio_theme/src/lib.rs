//! Folio Theme
//!
//! Two color schemes and the state machine that switches between them. The
//! scheme changes only on an explicit toggle. It is read once from the durable
//! store at startup (missing or unknown values mean `Light`) and written back
//! on every transition.
//!
//! # Example
//!
//! ```rust
//! use folio_core::MemoryStore;
//! use folio_theme::{ColorScheme, ThemeState};
//!
//! let mut theme = ThemeState::load(Box::new(MemoryStore::new()));
//! assert_eq!(theme.scheme(), ColorScheme::Light);
//!
//! theme.toggle().unwrap();
//! assert_eq!(theme.root_class(), Some("dark"));
//! ```

use std::fmt;

use folio_core::{KeyValueStore, ListenerId, Listeners, Result};

/// Store key holding the persisted scheme
pub const THEME_KEY: &str = "pro_theme";

/// Color scheme of the page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    /// Parse a stored value; anything unrecognised is `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ColorScheme::Light),
            "dark" => Some(ColorScheme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    /// Class applied to the document root
    pub fn root_class(self) -> Option<&'static str> {
        match self {
            ColorScheme::Light => None,
            ColorScheme::Dark => Some("dark"),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current scheme plus its persistence and listeners
pub struct ThemeState {
    scheme: ColorScheme,
    store: Box<dyn KeyValueStore>,
    listeners: Listeners<ColorScheme>,
}

impl ThemeState {
    /// Initialise from the stored flag without emitting a change.
    ///
    /// A store that cannot be read falls back to the default scheme.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let scheme = match store.get(THEME_KEY) {
            Ok(Some(value)) => ColorScheme::parse(&value).unwrap_or_else(|| {
                tracing::warn!("ThemeState: ignoring unknown stored theme {:?}", value);
                ColorScheme::default()
            }),
            Ok(None) => ColorScheme::default(),
            Err(err) => {
                tracing::warn!("ThemeState: could not read stored theme: {}", err);
                ColorScheme::default()
            }
        };

        tracing::debug!("ThemeState: starting with {}", scheme);

        Self {
            scheme,
            store,
            listeners: Listeners::new(),
        }
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_dark(&self) -> bool {
        self.scheme == ColorScheme::Dark
    }

    pub fn root_class(&self) -> Option<&'static str> {
        self.scheme.root_class()
    }

    /// Switch scheme, notify listeners and persist.
    ///
    /// The in-memory transition always happens; an error means only the
    /// write to the store failed.
    pub fn toggle(&mut self) -> Result<ColorScheme> {
        self.scheme = self.scheme.toggled();
        tracing::info!("ThemeState: switched to {}", self.scheme);
        self.listeners.emit(&self.scheme);
        self.store.set(THEME_KEY, self.scheme.as_str())?;
        Ok(self.scheme)
    }

    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ColorScheme) + 'static,
    {
        self.listeners.add(listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{CoreError, FileStore, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shares one MemoryStore between "restarts"
    struct SharedStore(Rc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(CoreError::Store("unavailable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(CoreError::Store("unavailable".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_is_light() {
        let theme = ThemeState::load(Box::new(MemoryStore::new()));
        assert_eq!(theme.scheme(), ColorScheme::Light);
        assert_eq!(theme.root_class(), None);
    }

    #[test]
    fn test_toggle_persists_and_restart_restores() {
        let backing = Rc::new(MemoryStore::new());

        let mut theme = ThemeState::load(Box::new(SharedStore(Rc::clone(&backing))));
        assert_eq!(theme.toggle().unwrap(), ColorScheme::Dark);
        assert_eq!(backing.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        // Restart: initialised dark with no change event
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut restarted = ThemeState::load(Box::new(SharedStore(Rc::clone(&backing))));
        let e = Rc::clone(&events);
        restarted.on_change(move |scheme| e.borrow_mut().push(*scheme));

        assert_eq!(restarted.scheme(), ColorScheme::Dark);
        assert!(events.borrow().is_empty());

        restarted.toggle().unwrap();
        assert_eq!(*events.borrow(), vec![ColorScheme::Light]);
        assert_eq!(backing.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let store = MemoryStore::with_values([(THEME_KEY, "sepia")]);
        let theme = ThemeState::load(Box::new(store));
        assert_eq!(theme.scheme(), ColorScheme::Light);
    }

    #[test]
    fn test_broken_store() {
        let mut theme = ThemeState::load(Box::new(BrokenStore));
        assert_eq!(theme.scheme(), ColorScheme::Light);

        assert!(theme.toggle().is_err());
        assert!(theme.is_dark());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut theme = ThemeState::load(Box::new(FileStore::open(&path).unwrap()));
        theme.toggle().unwrap();
        drop(theme);

        let theme = ThemeState::load(Box::new(FileStore::open(&path).unwrap()));
        assert!(theme.is_dark());
    }
}
