//! Selection bookkeeping and the payload handed to the info panel.

use crate::constants::PLACEHOLDER_TITLE;
use crate::funnel::{Funnel, Stage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageInfo {
    pub number: String,
    pub title: String,
    pub description: String,
    pub volume: String,
    pub rate: String,
    pub channels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InfoPayload {
    /// Nothing is under the pointer.
    Empty,
    Stage(StageInfo),
}

impl InfoPayload {
    pub fn for_stage(stage: &Stage) -> Self {
        InfoPayload::Stage(StageInfo {
            number: stage.number_label(),
            title: stage.name.clone(),
            description: stage.description.clone(),
            volume: stage.metrics.volume.clone(),
            rate: stage.metrics.rate.clone(),
            channels: stage.channels.clone(),
        })
    }

    pub fn title(&self) -> &str {
        match self {
            InfoPayload::Empty => PLACEHOLDER_TITLE,
            InfoPayload::Stage(info) => &info.title,
        }
    }
}

/// Presentation boundary: whatever renders the info panel (DOM, test recorder).
pub trait InfoSurface {
    fn show(&mut self, payload: &InfoPayload);

    /// Pointer is over a tier (true) or over empty space (false).
    fn set_hovering(&mut self, _hovering: bool) {}
}

/// Which tier loses its highlight and which one gains it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightChange {
    pub cleared: Option<usize>,
    pub set: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub highlight: HighlightChange,
    pub payload: InfoPayload,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionPresenter {
    selected: Option<usize>,
}

impl SelectionPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Payload describing the current selection.
    pub fn payload(&self, funnel: &Funnel) -> InfoPayload {
        self.selected
            .and_then(|i| funnel.get(i))
            .map_or(InfoPayload::Empty, InfoPayload::for_stage)
    }

    /// Record a pick result. Returns `None` when the selection did not change;
    /// callers must have validated `new_index` against the stage count.
    pub fn on_pick(&mut self, new_index: Option<usize>, funnel: &Funnel) -> Option<SelectionUpdate> {
        if new_index == self.selected {
            return None;
        }
        let highlight = HighlightChange {
            cleared: self.selected,
            set: new_index,
        };
        self.selected = new_index;
        Some(SelectionUpdate {
            highlight,
            payload: self.payload(funnel),
        })
    }

    pub fn clear(&mut self, funnel: &Funnel) -> Option<SelectionUpdate> {
        self.on_pick(None, funnel)
    }
}
