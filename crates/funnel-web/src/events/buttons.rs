use super::AppHandles;
use crate::constants::{
    FOCUS_SELECTED_ID, RESET_VIEW_ID, ROTATE_TOGGLE_ID, VIEW_BUTTON_SELECTOR, VIEW_DATA_ATTR,
};
use crate::dom;
use funnel_core::{Command, ViewMode};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_buttons(h: &AppHandles) {
    let rotate = h.clone();
    dom::add_click_listener(&h.document, ROTATE_TOGGLE_ID, move || {
        rotate.dispatch(Command::ToggleAutoRotate);
        log::info!(
            "[click] auto-rotate {}",
            if rotate.view.borrow().state().auto_rotate { "on" } else { "off" }
        );
    });

    let reset = h.clone();
    dom::add_click_listener(&h.document, RESET_VIEW_ID, move || {
        log::info!("[click] reset view");
        reset.dispatch(Command::ResetView);
    });

    let focus = h.clone();
    dom::add_click_listener(&h.document, FOCUS_SELECTED_ID, move || {
        focus.dispatch(Command::FocusSelected);
    });

    for button in dom::query_all(&h.document, VIEW_BUTTON_SELECTOR) {
        let Some(raw) = button.get_attribute(VIEW_DATA_ATTR) else {
            continue;
        };
        let mode = match raw.parse::<ViewMode>() {
            Ok(mode) => mode,
            Err(e) => {
                log::warn!("[dom] {}", e);
                continue;
            }
        };
        let hb = h.clone();
        let closure = Closure::wrap(Box::new(move || {
            log::info!("[click] view {}", mode);
            hb.dispatch(Command::SetMode(mode));
        }) as Box<dyn FnMut()>);
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_window_resize(h: &AppHandles) {
    let h = h.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&h.canvas);
        h.dispatch(Command::Resize { width, height });
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
