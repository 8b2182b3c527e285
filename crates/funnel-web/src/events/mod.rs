pub mod buttons;
pub mod keyboard;
pub mod pointer;

use crate::constants::{ACTIVE_CLASS, VIEW_BUTTON_SELECTOR, VIEW_DATA_ATTR};
use crate::dom;
use crate::info_panel::DomInfoSurface;
use crate::input::PointerTracker;
use funnel_core::{Command, ViewController};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Shared handles every DOM listener closes over.
#[derive(Clone)]
pub struct AppHandles {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub view: Rc<RefCell<ViewController>>,
    pub surface: Rc<RefCell<DomInfoSurface>>,
    pub pointer: Rc<RefCell<PointerTracker>>,
}

impl AppHandles {
    pub fn dispatch(&self, command: Command) {
        let mut surface = self.surface.borrow_mut();
        self.view.borrow_mut().dispatch(command, &mut *surface);
        drop(surface);
        if matches!(command, Command::SetMode(_) | Command::ResetView) {
            self.sync_view_buttons();
        }
    }

    /// Mark the button for the current view mode as active.
    pub fn sync_view_buttons(&self) {
        let mode = self.view.borrow().state().mode;
        for button in dom::query_all(&self.document, VIEW_BUTTON_SELECTOR) {
            let is_current = button.get_attribute(VIEW_DATA_ATTR).as_deref() == Some(mode.as_str());
            let _ = button.class_list().toggle_with_force(ACTIVE_CLASS, is_current);
        }
    }
}

pub fn wire_all(handles: &AppHandles) {
    pointer::wire_pointer_handlers(handles);
    keyboard::wire_global_keydown(handles);
    buttons::wire_buttons(handles);
    buttons::wire_window_resize(handles);
    handles.sync_view_buttons();
}
