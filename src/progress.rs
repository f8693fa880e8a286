use std::collections::HashSet;

use crate::error::StoreError;
use crate::model::Catalog;
use crate::store::KeyValueStore;

const SOLVED_PREFIX: &str = "exercise-";
const SOLVED_VALUE: &str = "true";
const DARK_MODE_KEY: &str = "darkMode";
const ACTIVE_SECTION_KEY: &str = "activeSection";

pub fn solved_key(exercise_id: &str) -> String {
    format!("{SOLVED_PREFIX}{exercise_id}")
}

/// Records which exercises have ever been solved.
///
/// Solved ids live in memory; new ones are written through to the store.
/// Records are never cleared: once an id is marked it stays solved.
pub struct ProgressTracker {
    store: Box<dyn KeyValueStore>,
    solved: HashSet<String>,
}

impl ProgressTracker {
    /// A tracker that knows nothing solved yet.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            solved: HashSet::new(),
        }
    }

    /// Reads the solved flag of every catalog exercise once.
    pub fn load(store: Box<dyn KeyValueStore>, catalog: &Catalog) -> Self {
        let solved = catalog
            .exercises()
            .filter(|ex| store.get(&solved_key(&ex.id)).as_deref() == Some(SOLVED_VALUE))
            .map(|ex| ex.id.clone())
            .collect();
        Self { store, solved }
    }

    /// Marks `exercise_id` as solved. Returns `true` only the first time.
    pub fn mark_solved(&mut self, exercise_id: &str) -> Result<bool, StoreError> {
        if self.is_solved(exercise_id) {
            return Ok(false);
        }
        self.store.set(&solved_key(exercise_id), SOLVED_VALUE)?;
        self.solved.insert(exercise_id.to_string());
        log::info!("exercise '{exercise_id}' solved for the first time");
        Ok(true)
    }

    pub fn is_solved(&self, exercise_id: &str) -> bool {
        self.solved.contains(exercise_id)
    }

    /// Full recount over every exercise of every section.
    pub fn total_solved(&self, catalog: &Catalog) -> usize {
        catalog
            .exercises()
            .filter(|ex| self.is_solved(&ex.id))
            .count()
    }

    pub fn solved_in_section(&self, catalog: &Catalog, section_idx: usize) -> usize {
        catalog
            .sections
            .get(section_idx)
            .map(|s| s.exercises.iter().filter(|ex| self.is_solved(&ex.id)).count())
            .unwrap_or(0)
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// For preference keys. Solved flags written here are not seen until the next `load`.
    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}

/// Theme and last-viewed section, kept in the same store as progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub active_section: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            active_section: 0,
        }
    }
}

impl Preferences {
    /// Reads stored preferences; unreadable values fall back to defaults and
    /// the section index is clamped to `section_count`.
    pub fn load(store: &dyn KeyValueStore, section_count: usize) -> Self {
        let defaults = Self::default();
        let dark_mode = store
            .get(DARK_MODE_KEY)
            .and_then(|v| v.trim().parse::<bool>().ok())
            .unwrap_or(defaults.dark_mode);
        let active_section = store
            .get(ACTIVE_SECTION_KEY)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|idx| *idx < section_count)
            .unwrap_or(defaults.active_section);
        Self {
            dark_mode,
            active_section,
        }
    }

    pub fn set_dark_mode(
        &mut self,
        store: &mut dyn KeyValueStore,
        dark_mode: bool,
    ) -> Result<(), StoreError> {
        self.dark_mode = dark_mode;
        store.set(DARK_MODE_KEY, &dark_mode.to_string())
    }

    pub fn set_active_section(
        &mut self,
        store: &mut dyn KeyValueStore,
        section: usize,
    ) -> Result<(), StoreError> {
        self.active_section = section;
        store.set(ACTIVE_SECTION_KEY, &section.to_string())
    }
}
