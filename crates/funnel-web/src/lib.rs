#![cfg(target_arch = "wasm32")]
use funnel_core::{Funnel, ViewController};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod info_panel;
mod input;
mod markup;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("funnel-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    let view = Rc::new(RefCell::new(ViewController::new(
        Funnel::aarrr(),
        width as f32 / height.max(1) as f32,
    )));
    let surface = Rc::new(RefCell::new(info_panel::DomInfoSurface::new(
        document.clone(),
    )));
    view.borrow().present(&mut *surface.borrow_mut());

    let handles = events::AppHandles {
        document,
        canvas: canvas.clone(),
        view: view.clone(),
        surface: surface.clone(),
        pointer: Rc::new(RefCell::new(input::PointerTracker::default())),
    };
    events::wire_all(&handles);

    // Listeners may fire while the device is requested, so hand the GPU a snapshot.
    let scene = view.borrow().scene().clone();
    let gpu = frame::init_gpu(&canvas, &scene).await;
    if gpu.is_none() {
        log::warn!("[gpu] rendering disabled; controls stay live");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        view,
        surface,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
