//! Calendar layout entry point.
//! Pure derivations from the task collection: per-day occupancy, month and
//! week grids, and drag rescheduling.

pub mod drag;
pub mod grid;
pub mod occupancy;
pub mod reschedule;

pub use drag::{DragContext, DragState, DropRequest};
pub use grid::{build_month_grid, build_week, Cell, MonthGrid, NotesSide, WeekGrid};
pub use occupancy::{build_occupancy, Occupancy, OccupancyCache, Occurrence, MAX_SPAN_DAYS};
pub use reschedule::{nav_drop_target, reschedule, NavDirection};
