use super::AppHandles;
use crate::input;
use funnel_core::Command;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(h: &AppHandles) {
    wire_pointermove(h);
    wire_pointerdown(h);
    wire_pointerup(h);
    wire_pointerleave(h);
    wire_gesture_abort(h, "pointercancel");
    wire_gesture_abort(h, "lostpointercapture");
    wire_wheel(h);
}

/// Pointer position relative to the canvas in CSS pixels, plus the canvas CSS size.
fn canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let pos = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    (pos, Vec2::new(rect.width() as f32, rect.height() as f32))
}

fn wire_pointermove(h: &AppHandles) {
    let h = h.clone();
    let canvas = h.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (pos, size) = canvas_css(&ev, &h.canvas);
        let drag_delta = h.pointer.borrow_mut().moved(pos);
        if let Some(delta) = drag_delta {
            if h.pointer.borrow().is_dragging() {
                let (azimuth, polar) = input::orbit_angles(delta, size.y);
                h.dispatch(Command::Orbit { azimuth, polar });
            }
        }
        if let Some(ndc) = input::client_to_ndc(pos.x, pos.y, size.x, size.y) {
            h.dispatch(Command::PointerMove { ndc });
        }
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(h: &AppHandles) {
    let h = h.clone();
    let canvas = h.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let (pos, _) = canvas_css(&ev, &h.canvas);
        h.pointer.borrow_mut().press(pos);
        let _ = h.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(h: &AppHandles) {
    let h = h.clone();
    let canvas = h.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (pos, _) = canvas_css(&ev, &h.canvas);
        let was_down = h.pointer.borrow().is_down();
        let click = h.pointer.borrow_mut().release(pos);
        let _ = h.canvas.release_pointer_capture(ev.pointer_id());
        if was_down && click {
            let selected = h.view.borrow().state().selected_index;
            if let Some(i) = selected {
                log::info!("[click] focus tier {}", i);
            }
            h.dispatch(Command::PointerClick);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(h: &AppHandles) {
    let h = h.clone();
    let canvas = h.canvas.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if !h.pointer.borrow().is_down() {
            h.dispatch(Command::PointerLeave);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

// A normal release clears the tracker before capture is dropped, so this only
// fires for gestures the browser took away mid-press.
fn wire_gesture_abort(h: &AppHandles, event: &'static str) {
    let h = h.clone();
    let canvas = h.canvas.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if h.pointer.borrow_mut().cancel() {
            log::debug!("[pointer] {} aborted gesture", event);
            h.dispatch(Command::PointerLeave);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(h: &AppHandles) {
    let h = h.clone();
    let canvas = h.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        if let Some(scale) = input::zoom_scale_for_wheel(ev.delta_y()) {
            h.dispatch(Command::Zoom { scale });
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
