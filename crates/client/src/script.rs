//! Frame-indexed input scripts.
//!
//! Stands in for a live event source: each cue fires on a fixed frame.

use std::collections::BTreeMap;

use client_frontend_core::{InputEvent, PointerEvent, ScreenLayout};
use crossterm::event::KeyCode;
use game_core::{EntityId, GridCell};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Input(InputEvent),
    KeyUp(KeyCode),
    Pointer(PointerEvent),
    /// Server-driven walk of another entity.
    Walk(EntityId, GridCell),
}

#[derive(Clone, Debug, Default)]
pub struct Script {
    cues: BTreeMap<u64, Vec<Cue>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, frame: u64, cue: Cue) -> Self {
        self.cues.entry(frame).or_default().push(cue);
        self
    }

    /// Removes and returns every cue due on or before `frame`.
    pub fn take(&mut self, frame: u64) -> Vec<Cue> {
        let later = self.cues.split_off(&(frame + 1));
        let due = std::mem::replace(&mut self.cues, later);
        due.into_values().flatten().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// Page position at the centre of `cell`, assuming the camera at the origin.
pub fn pointer_at(layout: &ScreenLayout, cell: GridCell) -> PointerEvent {
    let edge = f64::from(layout.cell_pixels());
    PointerEvent::new(
        layout.canvas_left + (f64::from(cell.x) * edge + edge / 2.0) * layout.zoom,
        layout.canvas_top + (f64::from(cell.y) * edge + edge / 2.0) * layout.zoom,
    )
}
