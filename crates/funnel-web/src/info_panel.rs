use crate::constants::{
    CONTROLS_ID, HIDDEN_CLASS, STAGE_DESCRIPTION_ID, STAGE_METRICS_ID, STAGE_NUMBER_SELECTOR,
    STAGE_TITLE_ID,
};
use crate::dom;
use crate::markup;
use funnel_core::{InfoPayload, InfoSurface};
use web_sys as web;

/// Info panel backed by the page's `#controls` block.
pub struct DomInfoSurface {
    document: web::Document,
}

impl DomInfoSurface {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn set_stage_number(&self, label: Option<&str>) {
        let existing = self
            .document
            .query_selector(STAGE_NUMBER_SELECTOR)
            .ok()
            .flatten();
        match (existing, label) {
            (Some(el), Some(text)) => el.set_text_content(Some(text)),
            (Some(el), None) => el.remove(),
            (None, Some(text)) => {
                let Some(controls) = self.document.get_element_by_id(CONTROLS_ID) else {
                    return;
                };
                if let Ok(el) = self.document.create_element("div") {
                    el.set_class_name("stage-number");
                    el.set_text_content(Some(text));
                    let _ = controls.append_child(&el);
                }
            }
            (None, None) => {}
        }
    }
}

impl InfoSurface for DomInfoSurface {
    fn show(&mut self, payload: &InfoPayload) {
        dom::set_text(&self.document, STAGE_TITLE_ID, payload.title());
        match payload {
            InfoPayload::Stage(info) => {
                dom::set_text(&self.document, STAGE_DESCRIPTION_ID, &info.description);
                if let Some(el) = self.document.get_element_by_id(STAGE_METRICS_ID) {
                    el.set_inner_html(&markup::metrics_markup(info));
                }
                self.set_stage_number(Some(&info.number));
            }
            InfoPayload::Empty => {
                dom::set_text(&self.document, STAGE_DESCRIPTION_ID, "");
                if let Some(el) = self.document.get_element_by_id(STAGE_METRICS_ID) {
                    el.set_inner_html("");
                }
                self.set_stage_number(None);
            }
        }
    }

    fn set_hovering(&mut self, hovering: bool) {
        dom::set_body_cursor(&self.document, if hovering { "pointer" } else { "default" });
    }
}

/// Show or hide the whole `#controls` panel.
pub fn toggle_panel(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CONTROLS_ID) {
        let hidden = el.class_list().toggle(HIDDEN_CLASS).unwrap_or(false);
        log::info!("[keys] info panel {}", if hidden { "hidden" } else { "shown" });
    }
}
