mod helpers;
pub mod layout;
pub mod views;

use crate::app::TutorApp;
use eframe::{App, Frame};
use egui::{Context, Visuals};
use layout::{section_sidebar, top_panel};
use std::time::Duration;

impl App for TutorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_runs();

        top_panel(self, ctx);
        if self.sidebar_open {
            section_sidebar(self, ctx);
        }
        views::lesson::ui_lesson(self, ctx);

        // Keep the ⏳ panel ticking while the worker is busy.
        if self.runs.running_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

pub fn apply_theme(ctx: &Context, dark_mode: bool) {
    ctx.set_visuals(if dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    });
}
