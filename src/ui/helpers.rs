// src/ui/helpers.rs
use crate::model::{Difficulty, Verdict};
use crate::view_models::{OutputView, verdict_badge};
use egui::{Color32, RichText, ScrollArea, Ui};

pub fn difficulty_color(difficulty: Difficulty) -> Color32 {
    let (r, g, b) = difficulty.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn difficulty_badge(ui: &mut Ui, difficulty: Difficulty) {
    ui.label(RichText::new(difficulty.marker()).color(difficulty_color(difficulty)));
}

pub fn verdict_label(ui: &mut Ui, verdict: Verdict) {
    if let Some(text) = verdict_badge(verdict) {
        let color = match verdict {
            Verdict::Correct => difficulty_color(Difficulty::Easy),
            _ => difficulty_color(Difficulty::Hard),
        };
        ui.label(RichText::new(text).strong().color(color));
    }
}

/// Monospace block for run output, expected output and diffs.
pub fn output_panel(ui: &mut Ui, id: &str, view: &OutputView, max_height: f32) {
    if *view == OutputView::Empty {
        return;
    }
    let text = view.text();
    let mut rich = RichText::new(text).monospace();
    if view.is_error() {
        rich = rich.color(ui.visuals().error_fg_color);
    }
    text_block(ui, id, rich, max_height);
}

pub fn text_block(ui: &mut Ui, id: &str, text: impl Into<RichText>, max_height: f32) {
    egui::Frame::default()
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ScrollArea::vertical()
                .id_salt(id)
                .max_height(max_height)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.label(text.into());
                });
        });
}
