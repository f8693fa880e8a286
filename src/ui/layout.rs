use crate::app::TutorApp;
use crate::ui::apply_theme;
use egui::{Button, Context, RichText, ScrollArea, Ui};
use egui_code_editor::{CodeEditor, ColorTheme, Syntax};

pub fn top_panel(app: &mut TutorApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            let menu_label = if app.sidebar_open { "✖" } else { "☰" };
            if ui.button(menu_label).on_hover_text("Bölümler").clicked() {
                app.toggle_sidebar();
            }
            ui.heading("☕ Java Lambda & Stream");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme_label = if app.prefs.dark_mode {
                    "☀ Açık tema"
                } else {
                    "🌙 Koyu tema"
                };
                if ui.button(theme_label).clicked() {
                    let dark = !app.prefs.dark_mode;
                    app.set_dark_mode(dark);
                    apply_theme(ctx, dark);
                }
                ui.label(RichText::new(format!("✓ {}", app.progress_label())).strong())
                    .on_hover_text("Çözülen alıştırmalar");
            });
        });
    });
}

pub fn section_sidebar(app: &mut TutorApp, ctx: &Context) {
    egui::SidePanel::left("sections_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(RichText::new("Bölümler").strong());
            ui.separator();

            let mut selected = None;
            ScrollArea::vertical().show(ui, |ui| {
                for info in app.section_infos() {
                    if ui.selectable_label(info.active, info.label()).clicked() {
                        selected = Some(info.idx);
                    }
                }
            });

            if let Some(idx) = selected {
                app.select_section(idx);
            }
        });
}

fn editor_theme(ui: &Ui) -> ColorTheme {
    if ui.visuals().dark_mode {
        ColorTheme::GITHUB_DARK
    } else {
        ColorTheme::GITHUB_LIGHT
    }
}

/// Editable code editor with a fixed width.
pub fn code_editor_input(
    ui: &mut Ui,
    id: &str,
    width: f32,
    rows: usize,
    fontsize: f32,
    syntax: Syntax,
    text: &mut String,
    max_height: f32,
) {
    let theme = editor_theme(ui);
    ScrollArea::vertical()
        .id_salt(format!("{id}_scroll"))
        .max_height(max_height)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.set_width(width);
            CodeEditor::default()
                .id_source(id)
                .with_rows(rows)
                .with_fontsize(fontsize)
                .with_theme(theme)
                .with_syntax(syntax)
                .with_numlines(true)
                .vscroll(false)
                .show(ui, text);
        });
}

/// Read-only editor; edits to the buffer are thrown away every frame.
pub fn code_editor_solution(
    ui: &mut Ui,
    id: &str,
    width: f32,
    rows: usize,
    fontsize: f32,
    syntax: Syntax,
    code: &str,
    max_height: f32,
) {
    let mut buf = code.to_owned();
    code_editor_input(ui, id, width, rows, fontsize, syntax, &mut buf, max_height);
}

/// Two equally sized buttons in one row. Returns (left clicked, right clicked).
pub fn two_button_row(
    ui: &mut Ui,
    panel_width: f32,
    left: (&str, bool),
    right: (&str, bool),
) -> (bool, bool) {
    let btn_w = (panel_width - 8.0) / 2.0;
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        clicked_left = ui
            .add_enabled_ui(left.1, |ui| ui.add_sized([btn_w, 36.0], Button::new(left.0)))
            .inner
            .clicked();
        clicked_right = ui
            .add_enabled_ui(right.1, |ui| ui.add_sized([btn_w, 36.0], Button::new(right.0)))
            .inner
            .clicked();
    });
    (clicked_left, clicked_right)
}
