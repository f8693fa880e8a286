use crate::{TutorApp, TutorConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

const CANVAS_ID: &str = "lambda_tutor_canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    eframe::WebLogger::init(log::LevelFilter::Info).ok();

    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CANVAS_ID))
        .ok_or_else(|| JsValue::from_str("canvas bulunamadı"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    let config = TutorConfig::from_env();
    let mut app = TutorApp::launch(config).map_err(|err| JsValue::from_str(&err.to_string()))?;

    wasm_bindgen_futures::spawn_local(async move {
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| {
                    app.attach(&cc.egui_ctx);
                    Ok(Box::new(app))
                }),
            )
            .await;
        if let Err(err) = result {
            log::error!("failed to start: {err:?}");
        }
    });
    Ok(())
}
