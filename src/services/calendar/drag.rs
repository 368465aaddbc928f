use chrono::NaiveDate;

use super::reschedule::{nav_drop_target, NavDirection};
use crate::models::task::Task;

/// Which task is being dragged and where it started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragContext {
    pub task_id: String,
    pub original_start: NaiveDate,
}

impl DragContext {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            original_start: task.date,
        }
    }
}

/// Drag-and-drop of a task onto a day cell or a month arrow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragContext),
    Hovering {
        context: DragContext,
        date: NaiveDate,
    },
}

/// A finished drag: move `task_id` so it starts on `target`.
///
/// Only the id travels with the drop. The caller resolves the task as it is
/// at drop time, so edits made while dragging are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropRequest {
    pub task_id: String,
    pub target: NaiveDate,
}

impl DragState {
    pub fn begin(&mut self, task: &Task) {
        *self = DragState::Dragging(DragContext::from_task(task));
    }

    pub fn active(&self) -> Option<&DragContext> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(context) | DragState::Hovering { context, .. } => Some(context),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// Day currently highlighted as a drop target.
    pub fn hovered_date(&self) -> Option<NaiveDate> {
        match self {
            DragState::Hovering { date, .. } => Some(*date),
            _ => None,
        }
    }

    /// Track the cell under the pointer. Hovering the origin day shows no
    /// highlight.
    pub fn hover(&mut self, date: NaiveDate) {
        let Some(context) = self.active().cloned() else {
            return;
        };
        *self = if date == context.original_start {
            DragState::Dragging(context)
        } else {
            DragState::Hovering { context, date }
        };
    }

    /// Finish on a day cell. `None` when nothing was being dragged.
    pub fn drop_on(&mut self, target: NaiveDate) -> Option<DropRequest> {
        let context = self.take()?;
        Some(DropRequest {
            task_id: context.task_id,
            target,
        })
    }

    /// Finish on a month arrow: the target is day 1 of the month before or
    /// after `displayed`.
    pub fn drop_on_nav(
        &mut self,
        displayed: NaiveDate,
        direction: NavDirection,
    ) -> Option<DropRequest> {
        self.drop_on(nav_drop_target(displayed, direction))
    }

    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    fn take(&mut self) -> Option<DragContext> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging(context) | DragState::Hovering { context, .. } => Some(context),
        }
    }
}
