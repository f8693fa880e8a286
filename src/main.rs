#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use lambda_tutor::{TutorApp, TutorConfig};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lambda_tutor=info")),
        )
        .init();

    let config = TutorConfig::from_env();
    let mut app = TutorApp::launch(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1180.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Java Lambda & Stream",
        options,
        Box::new(move |cc| {
            app.attach(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

// The web build starts from `web::start` in the library.
#[cfg(target_arch = "wasm32")]
fn main() {}
