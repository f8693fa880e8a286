use crate::app::TutorApp;
use crate::app::actions::COPY_FLASH_SECS;
use crate::code_utils::{editor_rows, java_syntax};
use crate::model::{Exercise, Verdict};
use crate::ui::helpers::{difficulty_badge, output_panel, text_block, verdict_label};
use crate::ui::layout::{code_editor_input, code_editor_solution};
use egui::{Button, RichText, Ui};
use std::time::Duration;

const EDITOR_MIN_ROWS: usize = 8;
const EDITOR_MAX_ROWS: usize = 24;
const EDITOR_FONT: f32 = 14.0;

pub fn ui_exercise_card(app: &mut TutorApp, ui: &mut Ui, exercise: &Exercise, width: f32) {
    let id = exercise.id.as_str();
    let Some(expanded) = app.exercise_state(id).map(|s| s.expanded) else {
        return;
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(width);

        ui.horizontal(|ui| {
            let arrow = if expanded { "▼" } else { "▶" };
            let header = RichText::new(format!("{arrow} {}", exercise.title)).strong();
            if ui.add(Button::new(header).frame(false)).clicked() {
                app.toggle_expanded(id);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                difficulty_badge(ui, exercise.difficulty);
                if app.is_solved(id) {
                    ui.label("✅").on_hover_text("Çözüldü");
                }
            });
        });

        if expanded {
            ui.add_space(6.0);
            ui_exercise_body(app, ui, exercise, width);
        }
    });
}

fn ui_exercise_body(app: &mut TutorApp, ui: &mut Ui, exercise: &Exercise, width: f32) {
    let id = exercise.id.as_str();
    if !exercise.description.is_empty() {
        ui.label(&exercise.description);
        ui.add_space(6.0);
    }

    let now = ui.input(|i| i.time);
    let running = app.is_running(id);
    let show_solution = app.exercise_state(id).is_some_and(|s| s.show_solution);
    let hints_shown = app.exercise_state(id).map_or(0, |s| s.hints_shown);

    if let Some(state) = app.exercises.get_mut(id) {
        let rows = editor_rows(&state.code, EDITOR_MIN_ROWS, EDITOR_MAX_ROWS);
        code_editor_input(
            ui,
            &format!("{id}_code"),
            width,
            rows,
            EDITOR_FONT,
            java_syntax(),
            &mut state.code,
            420.0,
        );
    }

    ui.add_space(6.0);
    ui.horizontal_wrapped(|ui| {
        let run_label = if running { "⏳ Çalışıyor..." } else { "▶ Çalıştır" };
        if ui.add_enabled(!running, Button::new(run_label)).clicked() {
            app.run_exercise(id);
        }
        if ui.button("⟲ Sıfırla").clicked() {
            app.reset_code(id);
        }

        let copy_label = if app.copy_flash_active(id, now) {
            "✓ Kopyalandı"
        } else {
            "📋 Kopyala"
        };
        if ui.button(copy_label).clicked() {
            if let Some(state) = app.exercise_state(id) {
                ui.ctx().copy_text(state.code.clone());
            }
            app.mark_copied(id, now);
            ui.ctx()
                .request_repaint_after(Duration::from_secs_f64(COPY_FLASH_SECS));
        }

        if let Some(hint_label) = app.hint_button_label(id) {
            let more = hints_shown < exercise.hints.len();
            if ui.add_enabled(more, Button::new(hint_label)).clicked() {
                app.reveal_next_hint(id);
            }
        }

        let solution_label = if show_solution {
            "🙈 Çözümü Gizle"
        } else {
            "👁 Çözümü Göster"
        };
        if ui.button(solution_label).clicked() {
            app.toggle_solution(id);
        }
    });

    for (n, hint) in exercise.hints.iter().take(hints_shown).enumerate() {
        ui.label(format!("💡 İpucu {}: {hint}", n + 1));
    }

    if show_solution {
        ui.add_space(6.0);
        ui.label(RichText::new("Çözüm:").strong());
        let rows = editor_rows(&exercise.solution, EDITOR_MIN_ROWS, EDITOR_MAX_ROWS);
        code_editor_solution(
            ui,
            &format!("{id}_solution"),
            width,
            rows,
            EDITOR_FONT,
            java_syntax(),
            &exercise.solution,
            420.0,
        );
    }

    let view = app.output_view(id);
    ui.add_space(6.0);
    output_panel(ui, &format!("{id}_output"), &view, 220.0);

    let verdict = app.exercise_state(id).map_or(Verdict::Unknown, |s| s.verdict);
    verdict_label(ui, verdict);

    if let Some(expected) = app.expected_block(id) {
        ui.label(RichText::new("Beklenen çıktı:").strong());
        text_block(
            ui,
            &format!("{id}_expected"),
            RichText::new(expected).monospace(),
            160.0,
        );
    }
    if let Some(report) = app.mismatch_report(id) {
        text_block(
            ui,
            &format!("{id}_diff"),
            RichText::new(report).monospace().small(),
            120.0,
        );
    }
}
