//! Named deck presets.
//!
//! Stores deal in opaque bytes; [`save_deck`] and [`load_deck`] put the deck
//! codec in front of them. Names are used as given, so callers sanitize
//! user-supplied names before they reach a [`DirPresetStore`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::deck::Deck;

const PRESET_EXTENSION: &str = "deck";

/// Byte storage keyed by preset name. Failures surface as `false` / `None`.
pub trait PresetStore {
    fn save(&mut self, name: &str, bytes: &[u8]) -> bool;

    fn load(&self, name: &str) -> Option<Vec<u8>>;

    /// Returns whether a preset was removed.
    fn delete(&mut self, name: &str) -> bool;

    /// Preset names in sorted order.
    fn list(&self) -> Vec<String>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryPresetStore {
    presets: BTreeMap<String, Vec<u8>>,
}

impl MemoryPresetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl PresetStore for MemoryPresetStore {
    fn save(&mut self, name: &str, bytes: &[u8]) -> bool {
        self.presets.insert(name.to_string(), bytes.to_vec());
        true
    }

    fn load(&self, name: &str) -> Option<Vec<u8>> {
        self.presets.get(name).cloned()
    }

    fn delete(&mut self, name: &str) -> bool {
        self.presets.remove(name).is_some()
    }

    fn list(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }
}

/// One `<name>.deck` file per preset under a directory.
#[derive(Clone, Debug)]
pub struct DirPresetStore {
    dir: PathBuf,
}

impl DirPresetStore {
    /// The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{PRESET_EXTENSION}"))
    }
}

impl PresetStore for DirPresetStore {
    fn save(&mut self, name: &str, bytes: &[u8]) -> bool {
        if name.is_empty() {
            return false;
        }
        fs::create_dir_all(&self.dir).is_ok() && fs::write(self.path_for(name), bytes).is_ok()
    }

    fn load(&self, name: &str) -> Option<Vec<u8>> {
        fs::read(self.path_for(name)).ok()
    }

    fn delete(&mut self, name: &str) -> bool {
        fs::remove_file(self.path_for(name)).is_ok()
    }

    fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == PRESET_EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

/// Encode `deck` and store it under `name`.
pub fn save_deck(store: &mut dyn PresetStore, name: &str, deck: &Deck) -> bool {
    store.save(name, &deck.encode())
}

/// Load and decode a preset. Missing or corrupt presets are `None`.
#[must_use]
pub fn load_deck(store: &dyn PresetStore, name: &str) -> Option<Deck> {
    let bytes = store.load(name)?;
    Deck::decode(&bytes).ok()
}
