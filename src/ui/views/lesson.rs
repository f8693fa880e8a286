use crate::app::TutorApp;
use crate::ui::layout::two_button_row;
use crate::ui::views::exercise::ui_exercise_card;
use eframe::egui;
use egui_commonmark::CommonMarkViewer;
use std::sync::Arc;

pub fn ui_lesson(app: &mut TutorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let max_width = 860.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        let catalog = Arc::clone(&app.catalog);
        let Some(section) = catalog.sections.get(app.active_section()) else {
            ui.label("Gösterilecek bölüm yok.");
            return;
        };

        egui::ScrollArea::vertical()
            .id_salt("lesson_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(panel_width);
                    egui::Frame::default()
                        .fill(ui.visuals().window_fill())
                        .inner_margin(egui::Margin::symmetric(24, 20))
                        .show(ui, |ui| {
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                ui.set_width(panel_width - 48.0);
                                ui.heading(&section.title);
                                ui.add_space(10.0);

                                CommonMarkViewer::new().show(ui, &mut app.cm_cache, &section.content);

                                if !section.exercises.is_empty() {
                                    ui.add_space(16.0);
                                    ui.separator();
                                    ui.heading("📝 Alıştırmalar");
                                    ui.add_space(8.0);
                                    for exercise in &section.exercises {
                                        ui_exercise_card(app, ui, exercise, panel_width - 48.0);
                                        ui.add_space(10.0);
                                    }
                                }

                                if !app.message.is_empty() {
                                    ui.add_space(8.0);
                                    ui.label(&app.message);
                                }

                                ui.add_space(12.0);
                                ui.separator();
                                ui.add_space(8.0);

                                let (prev, next) = two_button_row(
                                    ui,
                                    panel_width - 48.0,
                                    ("⬅ Önceki bölüm", app.has_prev_section()),
                                    ("Sonraki bölüm ➡", app.has_next_section()),
                                );
                                if prev {
                                    app.prev_section();
                                    app.message.clear();
                                }
                                if next {
                                    app.next_section();
                                    app.message.clear();
                                }
                            });
                        });
                });
            });
    });
}
