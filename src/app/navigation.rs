use super::*;

impl TutorApp {
    pub fn active_section(&self) -> usize {
        self.prefs.active_section
    }

    /// Opens a section, persisting the choice and recounting the solved total.
    pub fn select_section(&mut self, idx: usize) {
        let count = self.catalog.sections.len();
        if count == 0 {
            return;
        }
        let idx = idx.min(count - 1);

        if let Err(err) = self
            .prefs
            .set_active_section(self.tracker.store_mut(), idx)
        {
            log::warn!("could not save active section: {err}");
        }
        self.recount_solved();
    }

    pub fn has_next_section(&self) -> bool {
        self.prefs.active_section + 1 < self.catalog.sections.len()
    }

    pub fn has_prev_section(&self) -> bool {
        self.prefs.active_section > 0
    }

    pub fn next_section(&mut self) {
        if self.has_next_section() {
            self.select_section(self.prefs.active_section + 1);
        }
    }

    pub fn prev_section(&mut self) {
        if self.has_prev_section() {
            self.select_section(self.prefs.active_section - 1);
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        if let Err(err) = self.prefs.set_dark_mode(self.tracker.store_mut(), dark_mode) {
            log::warn!("could not save theme: {err}");
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn selection_is_clamped_and_persisted() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(""));
        app.select_section(9);
        assert_eq!(app.active_section(), 1);
        assert_eq!(app.tracker.store().get("activeSection").as_deref(), Some("1"));
    }

    #[test]
    fn prev_and_next_stop_at_the_edges() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(""));
        app.prev_section();
        assert_eq!(app.active_section(), 0);
        app.next_section();
        app.next_section();
        assert_eq!(app.active_section(), 1);
        assert!(!app.has_next_section());
        app.prev_section();
        assert_eq!(app.active_section(), 0);
    }

    #[test]
    fn changing_section_reconciles_the_counter() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(""));
        app.tracker.mark_solved("lambda-1").unwrap();
        app.solved_count = 7;
        app.select_section(1);
        assert_eq!(app.solved_count, 1);
    }

    #[test]
    fn theme_choice_is_saved() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(""));
        assert!(app.prefs.dark_mode);
        app.set_dark_mode(false);
        assert!(!app.prefs.dark_mode);
        assert_eq!(app.tracker.store().get("darkMode").as_deref(), Some("false"));
    }

    #[test]
    fn empty_catalog_ignores_navigation() {
        let (mut app, _) = app_with(Catalog::default(), ExecutionResult::success(""));
        app.select_section(3);
        app.next_section();
        assert_eq!(app.active_section(), 0);
        assert_eq!(app.progress_label(), "0/0");
    }
}
