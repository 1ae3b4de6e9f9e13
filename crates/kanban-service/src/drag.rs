//! Drag and drop of tasks between columns.
//!
//! Pointer input drives [`DragState`] directly. Touch input goes through
//! [`TouchGesture`], which turns a long press into a drag and a release
//! into either a tap or a drop; both end in [`BoardService::drop_on`].

use std::mem;
use std::time::{Duration, Instant};

use kanban_core::task::{Task, UpdateTask};
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::BoardService;

/// Hold time before a touch turns into a drag.
pub const LONG_PRESS: Duration = Duration::from_millis(150);

/// Finger travel, in pixels, that cancels a pending long press.
pub const MOVE_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task: Task,
    },
}

impl DragState {
    pub fn start_drag(&mut self, task: Task) {
        debug!(task = %task.id, "drag started");
        *self = DragState::Dragging { task };
    }

    /// Abandon the drag without touching the store.
    pub fn end_drag(&mut self) {
        *self = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn dragged(&self) -> Option<&Task> {
        match self {
            DragState::Dragging { task } => Some(task),
            DragState::Idle => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The task now lives in the target column.
    Moved(Task),
    /// Dropped on its own column or outside any column.
    SameColumn,
    NoDrag,
}

impl BoardService {
    /// Finish a drag over `column_id` (`None` when released outside every
    /// column). Only the task's column changes. The state is always back
    /// to idle afterwards, including on error.
    pub fn drop_on(
        &self,
        drag: &mut DragState,
        column_id: Option<&str>,
    ) -> Result<DropOutcome, ServiceError> {
        let task = match mem::take(drag) {
            DragState::Idle => return Ok(DropOutcome::NoDrag),
            DragState::Dragging { task } => task,
        };
        let Some(target) = column_id else {
            return Ok(DropOutcome::SameColumn);
        };
        if task.column_id == target {
            return Ok(DropOutcome::SameColumn);
        }
        let moved = self.update_task(&task.id, &UpdateTask::move_to(target))?;
        info!(task = %moved.id, from = %task.column_id, to = target, "dropped task");
        Ok(DropOutcome::Moved(moved))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TouchOutcome {
    /// Short press without movement: open the task.
    Tap(Task),
    /// Released while dragging over a column; hand to `drop_on`.
    Drop(String),
    /// Scroll, release outside any column, or no press at all.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Pressed {
        task: Task,
        origin: Point,
        at: Instant,
        moved: bool,
    },
    Dragging,
}

/// Long-press-to-drag recognizer for one finger.
///
/// Timestamps come from the caller so the recognizer stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct TouchGesture {
    phase: Phase,
}

impl TouchGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, task: Task, at: Point, now: Instant) {
        self.phase = Phase::Pressed {
            task,
            origin: at,
            at: now,
            moved: false,
        };
    }

    /// Track finger travel. Moving past the tolerance before the long
    /// press fires turns the touch into a scroll.
    pub fn move_to(&mut self, to: Point) {
        if let Phase::Pressed { origin, moved, .. } = &mut self.phase {
            if origin.distance(&to) > MOVE_TOLERANCE {
                *moved = true;
            }
        }
    }

    /// Fire the long press once the hold time has passed. Returns true
    /// when a drag started on this tick.
    pub fn tick(&mut self, now: Instant, drag: &mut DragState) -> bool {
        let ready = match &self.phase {
            Phase::Pressed { at, moved, .. } => !moved && now.duration_since(*at) >= LONG_PRESS,
            _ => false,
        };
        if !ready {
            return false;
        }
        if let Phase::Pressed { task, .. } = mem::replace(&mut self.phase, Phase::Dragging) {
            drag.start_drag(task);
        }
        true
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging)
    }

    /// Lift the finger. `over_column` is the column under the release point.
    pub fn release(
        &mut self,
        now: Instant,
        over_column: Option<&str>,
        drag: &mut DragState,
    ) -> TouchOutcome {
        self.tick(now, drag);
        match mem::take(&mut self.phase) {
            Phase::Idle => TouchOutcome::Cancelled,
            Phase::Pressed { task, moved, .. } => {
                if moved {
                    TouchOutcome::Cancelled
                } else {
                    TouchOutcome::Tap(task)
                }
            }
            Phase::Dragging => match over_column {
                Some(column_id) => TouchOutcome::Drop(column_id.to_string()),
                None => {
                    drag.end_drag();
                    TouchOutcome::Cancelled
                }
            },
        }
    }
}
