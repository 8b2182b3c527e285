use super::AppHandles;
use crate::info_panel;
use crate::input::{self, KeyAction};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, h: &AppHandles) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    match input::action_for_key(&key) {
        Some(KeyAction::Dispatch(command)) => {
            log::info!("[keys] {:?} -> {:?}", key, command);
            h.dispatch(command);
            ev.prevent_default();
        }
        Some(KeyAction::ToggleInfoPanel) => info_panel::toggle_panel(&h.document),
        None => {}
    }
}

pub fn wire_global_keydown(h: &AppHandles) {
    let h = h.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &h);
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        let _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
