use super::*;
use crate::runs::RunCompletion;
use crate::verify::{normalize_text, verdict_for};

/// How long the copy button shows its check mark, in seconds.
pub const COPY_FLASH_SECS: f64 = 2.0;

impl TutorApp {
    pub fn toggle_expanded(&mut self, exercise_id: &str) {
        if let Some(state) = self.exercises.get_mut(exercise_id) {
            state.expanded = !state.expanded;
        }
    }

    pub fn reveal_next_hint(&mut self, exercise_id: &str) {
        let total = match self.catalog.exercise(exercise_id) {
            Some(ex) => ex.hints.len(),
            None => return,
        };
        if let Some(state) = self.exercises.get_mut(exercise_id) {
            state.hints_shown = (state.hints_shown + 1).min(total);
        }
    }

    pub fn toggle_solution(&mut self, exercise_id: &str) {
        if let Some(state) = self.exercises.get_mut(exercise_id) {
            state.show_solution = !state.show_solution;
        }
    }

    /// Restores the starter code and forgets the last run. A run still out
    /// for this exercise is superseded and its answer will be ignored.
    pub fn reset_code(&mut self, exercise_id: &str) {
        let starter = match self.catalog.exercise(exercise_id) {
            Some(ex) => ex.starter_code.clone(),
            None => return,
        };
        self.runs.supersede(exercise_id);
        if let Some(state) = self.exercises.get_mut(exercise_id) {
            state.code = starter;
            state.output = RunDisplay::Idle;
            state.verdict = Verdict::Unknown;
        }
    }

    /// Marks the code as copied at egui time `now`; the clipboard write
    /// itself happens in the view.
    pub fn mark_copied(&mut self, exercise_id: &str, now: f64) {
        if let Some(state) = self.exercises.get_mut(exercise_id) {
            state.copied_at = Some(now);
        }
    }

    pub fn copy_flash_active(&self, exercise_id: &str, now: f64) -> bool {
        self.exercises
            .get(exercise_id)
            .and_then(|s| s.copied_at)
            .is_some_and(|t| now - t < COPY_FLASH_SECS)
    }

    pub fn is_running(&self, exercise_id: &str) -> bool {
        self.runs.is_running(exercise_id)
    }

    /// Sends the current editor contents for execution.
    pub fn run_exercise(&mut self, exercise_id: &str) {
        let Some(state) = self.exercises.get_mut(exercise_id) else {
            self.message = format!("Bilinmeyen alıştırma: {exercise_id}");
            return;
        };

        let Some(ticket) = self.runs.dispatch(exercise_id) else {
            self.message = "⏳ Bu alıştırma zaten çalışıyor. Sonucu bekleyin.".into();
            return;
        };

        let source = if self.config.fold_source {
            normalize_text(&state.code)
        } else {
            state.code.clone()
        };
        state.output = RunDisplay::Running;
        state.verdict = Verdict::Unknown;
        self.message.clear();

        self.queue.submit(ticket, source);
    }

    /// Applies every result that has come back since the last frame.
    pub fn poll_runs(&mut self) {
        for completion in self.queue.poll() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: RunCompletion) {
        let RunCompletion { ticket, result } = completion;
        if !self.runs.complete(&ticket) {
            log::debug!(
                "dropping stale result {} for '{}'",
                ticket.seq,
                ticket.exercise_id
            );
            return;
        }
        self.apply_result(&ticket.exercise_id, result);
    }

    pub(crate) fn apply_result(&mut self, exercise_id: &str, result: ExecutionResult) {
        let expected = self
            .catalog
            .exercise(exercise_id)
            .and_then(|ex| ex.expected())
            .map(str::to_string);
        let verdict = verdict_for(&result, expected.as_deref());
        log::debug!("run for '{exercise_id}' finished: {verdict:?}");

        if let Some(state) = self.exercises.get_mut(exercise_id) {
            state.output = RunDisplay::Finished(result);
            state.verdict = verdict;
        }

        if verdict == Verdict::Correct {
            match self.tracker.mark_solved(exercise_id) {
                Ok(true) => self.solved_count += 1,
                Ok(false) => {}
                Err(err) => {
                    log::warn!("could not save progress for '{exercise_id}': {err}");
                    self.message = format!("⚠ İlerleme kaydedilemedi: {err}");
                }
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    const LAMBDA_OK: &str = "5'in iki katı: 10\n10'un iki katı: 20\n";

    #[test]
    fn correct_run_marks_solved_once() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(LAMBDA_OK));
        app.run_exercise("lambda-1");
        assert!(app.is_running("lambda-1"));
        settle(&mut app);

        let state = app.exercise_state("lambda-1").unwrap();
        assert_eq!(state.verdict, Verdict::Correct);
        assert!(app.is_solved("lambda-1"));
        assert_eq!(app.solved_count, 1);

        app.run_exercise("lambda-1");
        settle(&mut app);
        assert_eq!(app.solved_count, 1);
    }

    #[test]
    fn folded_output_still_matches() {
        let output = "5'in iki kati: 10\n10’un iki kati: 20";
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(output));
        app.run_exercise("lambda-1");
        settle(&mut app);
        assert_eq!(app.exercise_state("lambda-1").unwrap().verdict, Verdict::Correct);
    }

    #[test]
    fn wrong_output_is_incorrect_and_reports_first_difference() {
        let output = "Max(10, 20): 10\nMax(50, 30): 50\n";
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(output));
        app.run_exercise("operator-2");
        settle(&mut app);

        assert_eq!(
            app.exercise_state("operator-2").unwrap().verdict,
            Verdict::Incorrect
        );
        assert!(!app.is_solved("operator-2"));
        let report = app.mismatch_report("operator-2").unwrap();
        assert!(report.contains("Satır 1"), "{report}");
    }

    #[test]
    fn transport_failure_leaves_no_verdict() {
        let result = ExecutionResult::transport_failure("Hata: connection refused");
        let (mut app, _) = app_with(two_section_catalog(), result);
        app.run_exercise("lambda-1");
        settle(&mut app);

        let state = app.exercise_state("lambda-1").unwrap();
        assert_eq!(state.verdict, Verdict::Unknown);
        assert_eq!(
            app.output_view("lambda-1"),
            OutputView::Error("Hata: connection refused".into())
        );
        assert!(!app.is_solved("lambda-1"));
        assert!(!app.is_running("lambda-1"));
    }

    #[test]
    fn program_failure_with_expectation_is_incorrect() {
        let result = ExecutionResult::program_failure("", "Main.java:3: error");
        let (mut app, _) = app_with(two_section_catalog(), result);
        app.run_exercise("lambda-1");
        app.run_exercise("free");
        settle(&mut app);
        assert_eq!(app.exercise_state("lambda-1").unwrap().verdict, Verdict::Incorrect);
        assert_eq!(app.exercise_state("free").unwrap().verdict, Verdict::Unknown);
    }

    #[test]
    fn exercise_without_expectation_never_gets_solved() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success("anything"));
        app.run_exercise("free");
        settle(&mut app);
        assert_eq!(app.exercise_state("free").unwrap().verdict, Verdict::Unknown);
        assert_eq!(app.solved_count, 0);
    }

    #[test]
    fn second_run_is_refused_while_first_is_out() {
        let (mut app, executor) =
            app_with(two_section_catalog(), ExecutionResult::success(LAMBDA_OK));
        app.run_exercise("lambda-1");
        app.run_exercise("lambda-1");
        assert!(!app.message.is_empty());
        settle(&mut app);
        assert_eq!(executor.sources.lock().unwrap().len(), 1);
    }

    #[test]
    fn reset_drops_the_pending_answer() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(LAMBDA_OK));
        app.exercises.get_mut("lambda-1").unwrap().code = "edited".into();
        app.run_exercise("lambda-1");
        app.reset_code("lambda-1");
        assert!(!app.is_running("lambda-1"));

        std::thread::sleep(std::time::Duration::from_millis(100));
        app.poll_runs();

        let state = app.exercise_state("lambda-1").unwrap();
        assert_eq!(state.code, "// lambda-1");
        assert_eq!(state.output, RunDisplay::Idle);
        assert_eq!(state.verdict, Verdict::Unknown);
        assert!(!app.is_solved("lambda-1"));
    }

    #[test]
    fn solved_survives_a_later_wrong_run() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(LAMBDA_OK));
        app.run_exercise("lambda-1");
        settle(&mut app);
        app.apply_result("lambda-1", ExecutionResult::success("nope"));
        assert_eq!(app.exercise_state("lambda-1").unwrap().verdict, Verdict::Incorrect);
        assert!(app.is_solved("lambda-1"));
        assert_eq!(app.solved_count, 1);
    }

    #[test]
    fn source_is_folded_before_sending() {
        let (mut app, executor) = app_with(two_section_catalog(), ExecutionResult::success(""));
        app.exercises.get_mut("lambda-1").unwrap().code =
            "System.out.println(\"İki katı şöyle\");".into();
        app.run_exercise("lambda-1");
        settle(&mut app);
        let sent = executor.sources.lock().unwrap().clone();
        assert_eq!(sent, vec!["System.out.println(\"Iki kati soyle\");".to_string()]);
    }

    #[test]
    fn folding_can_be_switched_off() {
        let (mut app, executor) = app_with(two_section_catalog(), ExecutionResult::success(""));
        app.config.fold_source = false;
        app.exercises.get_mut("lambda-1").unwrap().code = "şöyle".into();
        app.run_exercise("lambda-1");
        settle(&mut app);
        assert_eq!(executor.sources.lock().unwrap()[0], "şöyle");
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn store_failure_still_shows_verdict() {
        let executor = std::sync::Arc::new(Scripted {
            result: ExecutionResult::success(LAMBDA_OK),
            sources: std::sync::Mutex::new(Vec::new()),
        });
        let mut app = TutorApp::from_parts(
            two_section_catalog(),
            TutorConfig::default(),
            Box::new(FailingStore),
            RunQueue::new(executor),
        );
        app.run_exercise("lambda-1");
        settle(&mut app);
        assert_eq!(app.exercise_state("lambda-1").unwrap().verdict, Verdict::Correct);
        assert!(app.message.contains("kaydedilemedi"), "{}", app.message);
        assert_eq!(app.solved_count, 0);
    }

    #[test]
    fn hints_stop_at_the_last_one() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(""));
        for _ in 0..5 {
            app.reveal_next_hint("lambda-1");
        }
        assert_eq!(app.exercise_state("lambda-1").unwrap().hints_shown, 2);
    }

    #[test]
    fn phases_follow_user_actions() {
        let (mut app, _) = app_with_store(
            two_section_catalog(),
            ExecutionResult::success(""),
            MemoryStore::new(),
        );
        app.toggle_expanded("free");
        assert_eq!(app.exercise_phase("free"), Some(ExercisePhase::Expanded));
        app.exercises.get_mut("free").unwrap().code.push_str("\nint x;");
        assert_eq!(app.exercise_phase("free"), Some(ExercisePhase::Editing));
        app.toggle_solution("free");
        assert_eq!(app.exercise_phase("free"), Some(ExercisePhase::ViewingSolution));
        app.toggle_solution("free");
        app.reset_code("free");
        assert_eq!(app.exercise_phase("free"), Some(ExercisePhase::Expanded));
        app.toggle_expanded("free");
        assert_eq!(app.exercise_phase("free"), Some(ExercisePhase::Collapsed));
    }

    #[test]
    fn copy_flash_lasts_two_seconds() {
        let (mut app, _) = app_with(two_section_catalog(), ExecutionResult::success(""));
        app.mark_copied("lambda-1", 10.0);
        assert!(app.copy_flash_active("lambda-1", 11.5));
        assert!(!app.copy_flash_active("lambda-1", 12.0));
        assert!(!app.copy_flash_active("free", 10.0));
    }
}
