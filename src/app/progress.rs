use super::*;

impl TutorApp {
    pub fn is_solved(&self, exercise_id: &str) -> bool {
        self.tracker.is_solved(exercise_id)
    }

    /// Replaces the running counter with a full count over the catalog.
    pub fn recount_solved(&mut self) {
        self.solved_count = self.tracker.total_solved(&self.catalog);
    }
}
