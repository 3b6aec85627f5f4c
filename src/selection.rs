//! Drag-to-select state machine.
//!
//! `Idle --down--> Dragging --move*--> Dragging --up--> Idle`. A finished
//! rectangle stays around until a consumer takes it or select mode is left.

use crate::data_types::{BrushKind, InteractionMode, SelectionRect};
use gpui::Point;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Clone, Debug)]
pub struct SelectionTracker {
    mode: InteractionMode,
    drag: DragState,
    rect: Option<SelectionRect>,
    brush: BrushKind,
    /// Plot height, used by the horizontal brush to span the full height.
    extent_height: f32,
}

impl SelectionTracker {
    pub fn new(brush: BrushKind, extent_height: f32) -> Self {
        Self {
            mode: InteractionMode::Idle,
            drag: DragState::Idle,
            rect: None,
            brush,
            extent_height,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn brush(&self) -> BrushKind {
        self.brush
    }

    pub fn set_extent_height(&mut self, height: f32) {
        self.extent_height = height;
    }

    /// Switching mode in either direction drops whatever was selected.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
        self.clear();
    }

    pub fn toggle_mode(&mut self) -> InteractionMode {
        let next = match self.mode {
            InteractionMode::Idle => InteractionMode::Selecting,
            InteractionMode::Selecting => InteractionMode::Idle,
        };
        self.set_mode(next);
        debug!(?next, "selection mode toggled");
        next
    }

    /// Starts a drag at `local`. Ignored unless in select mode.
    pub fn pointer_down(&mut self, local: Point<f32>) -> bool {
        if self.mode != InteractionMode::Selecting {
            return false;
        }
        let mut rect = SelectionRect::at(local);
        self.fit_brush(&mut rect);
        self.rect = Some(rect);
        self.drag = DragState::Dragging;
        debug!(x = local.x, y = local.y, "selection started");
        true
    }

    /// Moves the free corner. Only the second corner ever changes.
    pub fn pointer_move(&mut self, local: Point<f32>) -> bool {
        if self.drag != DragState::Dragging {
            return false;
        }
        let Some(mut rect) = self.rect else {
            return false;
        };
        rect.x2 = local.x;
        rect.y2 = local.y;
        self.fit_brush(&mut rect);
        self.rect = Some(rect);
        true
    }

    /// Ends the drag; the rectangle is kept for an explicit consumer.
    pub fn pointer_up(&mut self) -> bool {
        if self.drag != DragState::Dragging {
            return false;
        }
        self.drag = DragState::Idle;
        if let Some(rect) = &self.rect {
            debug!(width = rect.width(), height = rect.height(), "selection finished");
        }
        true
    }

    /// Current rectangle, pending or finished.
    pub fn selection(&self) -> Option<&SelectionRect> {
        self.rect.as_ref()
    }

    /// The rectangle if it is large enough to act on.
    pub fn valid_selection(&self, min_size: f32) -> Option<SelectionRect> {
        self.rect.filter(|r| !r.is_degenerate(min_size))
    }

    /// Consumes the rectangle and ends any drag in progress.
    pub fn take(&mut self) -> Option<SelectionRect> {
        self.drag = DragState::Idle;
        self.rect.take()
    }

    pub fn clear(&mut self) {
        self.drag = DragState::Idle;
        self.rect = None;
    }

    fn fit_brush(&self, rect: &mut SelectionRect) {
        if self.brush == BrushKind::Horizontal {
            rect.y1 = 0.0;
            rect.y2 = self.extent_height;
        }
    }
}
