pub mod day;
pub mod grid;
pub mod projector;
pub mod time;

pub use day::{WEEK, parse_days};
pub use grid::{DEFAULT_SLOT_LABELS, GridConfig, GridConfigError, TimeSlot, WeeklyGrid};
pub use projector::{MatchPolicy, ScheduleCell, ScheduleProjection, project_schedule};
pub use time::TimeRange;
