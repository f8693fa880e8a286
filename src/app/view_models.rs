use super::*;
use crate::verify::line_diff;

impl TutorApp {
    pub fn section_infos(&self) -> Vec<SectionInfo> {
        self.catalog
            .sections
            .iter()
            .enumerate()
            .map(|(idx, section)| SectionInfo {
                idx,
                title: section.title.clone(),
                solved: self.tracker.solved_in_section(&self.catalog, idx),
                total: section.exercises.len(),
                active: idx == self.prefs.active_section,
            })
            .collect()
    }

    pub fn output_view(&self, exercise_id: &str) -> OutputView {
        match self.exercises.get(exercise_id).map(|s| &s.output) {
            None | Some(RunDisplay::Idle) => OutputView::Empty,
            Some(RunDisplay::Running) => OutputView::Running,
            Some(RunDisplay::Finished(result)) => match result.error_text() {
                Some(err) => OutputView::Error(err.to_string()),
                None => OutputView::Output(result.raw_output.clone()),
            },
        }
    }

    /// Expected output to show next to the run, only after an incorrect verdict.
    pub fn expected_block(&self, exercise_id: &str) -> Option<&str> {
        let state = self.exercises.get(exercise_id)?;
        if state.verdict != Verdict::Incorrect {
            return None;
        }
        self.catalog.exercise(exercise_id)?.expected()
    }

    /// First differing line between the expected output and the last run,
    /// only after an incorrect verdict.
    pub fn mismatch_report(&self, exercise_id: &str) -> Option<String> {
        let expected = self.expected_block(exercise_id)?;
        match &self.exercises.get(exercise_id)?.output {
            RunDisplay::Finished(result) if result.error.is_none() => {
                Some(line_diff(expected, &result.raw_output))
            }
            _ => None,
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.solved_count, self.catalog.exercise_count())
    }

    pub fn hint_button_label(&self, exercise_id: &str) -> Option<String> {
        let total = self.catalog.exercise(exercise_id)?.hints.len();
        let shown = self.exercises.get(exercise_id)?.hints_shown;
        if total == 0 {
            return None;
        }
        Some(if shown == 0 {
            "💡 İpucu Al".to_string()
        } else {
            format!("💡 Sonraki İpucu ({shown}/{total})")
        })
    }
}
