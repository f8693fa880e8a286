use crate::config::TutorConfig;
use crate::model::{Catalog, ExecutionResult, Verdict};
use crate::progress::{Preferences, ProgressTracker};
use crate::runs::{RunQueue, RunTracker};
use crate::store::KeyValueStore;
use egui_commonmark::CommonMarkCache;
use std::collections::HashMap;
use std::sync::Arc;

pub mod actions;
pub mod navigation;
pub mod progress;
pub mod view_models;

pub use crate::view_models::{OutputView, SectionInfo};

/// What the output panel of an exercise currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunDisplay {
    #[default]
    Idle,
    Running,
    Finished(ExecutionResult),
}

/// View-level phase of an exercise card. The persisted "solved" bit is
/// tracked separately and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExercisePhase {
    Collapsed,
    Expanded,
    Editing,
    ViewingSolution,
}

/// Per-exercise UI state. Not persisted.
#[derive(Debug, Clone)]
pub struct ExerciseState {
    pub expanded: bool,
    pub code: String,
    pub show_solution: bool,
    pub hints_shown: usize,
    pub output: RunDisplay,
    pub verdict: Verdict,
    /// egui time of the last copy, for the check-mark flash.
    pub copied_at: Option<f64>,
}

impl ExerciseState {
    pub fn new(starter_code: &str) -> Self {
        Self {
            expanded: false,
            code: starter_code.to_string(),
            show_solution: false,
            hints_shown: 0,
            output: RunDisplay::Idle,
            verdict: Verdict::Unknown,
            copied_at: None,
        }
    }

    pub fn phase(&self, starter_code: &str) -> ExercisePhase {
        if !self.expanded {
            ExercisePhase::Collapsed
        } else if self.show_solution {
            ExercisePhase::ViewingSolution
        } else if self.code != starter_code || self.output != RunDisplay::Idle {
            ExercisePhase::Editing
        } else {
            ExercisePhase::Expanded
        }
    }
}

pub struct TutorApp {
    /// Shared so views can borrow content while mutating the app.
    pub catalog: Arc<Catalog>,
    pub config: TutorConfig,
    pub tracker: ProgressTracker,
    pub prefs: Preferences,
    pub runs: RunTracker,
    pub queue: RunQueue,
    pub exercises: HashMap<String, ExerciseState>,
    /// Updated incrementally on each first solve, recounted on navigation.
    pub solved_count: usize,
    pub sidebar_open: bool,
    pub message: String,
    pub cm_cache: CommonMarkCache,
}

impl TutorApp {
    pub fn from_parts(
        catalog: Catalog,
        config: TutorConfig,
        store: Box<dyn KeyValueStore>,
        queue: RunQueue,
    ) -> Self {
        let prefs = Preferences::load(store.as_ref(), catalog.sections.len());
        let tracker = ProgressTracker::load(store, &catalog);
        let exercises = catalog
            .exercises()
            .map(|ex| (ex.id.clone(), ExerciseState::new(&ex.starter_code)))
            .collect();

        let mut app = Self {
            catalog: Arc::new(catalog),
            config,
            tracker,
            prefs,
            runs: RunTracker::new(),
            queue,
            exercises,
            solved_count: 0,
            sidebar_open: true,
            message: String::new(),
            cm_cache: CommonMarkCache::default(),
        };
        app.recount_solved();
        app
    }

    /// Builds the app with the platform's store and execution client.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn launch(config: TutorConfig) -> Result<Self, Box<dyn std::error::Error>> {
        use crate::gateway::PistonGateway;
        use crate::store::{FileStore, MemoryStore};

        let catalog = crate::data::read_catalog_embedded()?;
        let store: Box<dyn KeyValueStore> = match FileStore::open(&config.store_path) {
            Ok(store) => {
                log::info!("progress file: {}", store.path().display());
                Box::new(store)
            }
            Err(err) => {
                log::warn!(
                    "could not open {}: {err}; progress will not be saved",
                    config.store_path.display()
                );
                Box::new(MemoryStore::new())
            }
        };
        let gateway = PistonGateway::new(config.clone())?;
        log::info!("execution endpoint: {}", gateway.endpoint());
        let queue = RunQueue::new(Arc::new(gateway));
        Ok(Self::from_parts(catalog, config, store, queue))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn launch(config: TutorConfig) -> Result<Self, Box<dyn std::error::Error>> {
        use crate::gateway::PistonGateway;
        use crate::store::{LocalStorageStore, MemoryStore};

        let catalog = crate::data::read_catalog_embedded()?;
        let store: Box<dyn KeyValueStore> = match LocalStorageStore::open() {
            Ok(store) => Box::new(store),
            Err(err) => {
                log::warn!("{err}; progress will not be saved");
                Box::new(MemoryStore::new())
            }
        };
        let gateway = PistonGateway::new(config.clone())?;
        log::info!("execution endpoint: {}", gateway.endpoint());
        let queue = RunQueue::new(gateway);
        Ok(Self::from_parts(catalog, config, store, queue))
    }

    /// Hooks the app to a running egui context.
    pub fn attach(&mut self, ctx: &egui::Context) {
        self.queue.set_repaint(ctx.clone());
        crate::ui::apply_theme(ctx, self.prefs.dark_mode);
    }

    pub fn exercise_state(&self, id: &str) -> Option<&ExerciseState> {
        self.exercises.get(id)
    }

    pub fn exercise_phase(&self, id: &str) -> Option<ExercisePhase> {
        let ex = self.catalog.exercise(id)?;
        self.exercises.get(id).map(|s| s.phase(&ex.starter_code))
    }
}
