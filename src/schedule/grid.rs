use super::day::{WEEK, parse_single_day};
use super::time::TimeRange;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display ranges of the default weekly grid.
pub const DEFAULT_SLOT_LABELS: [&str; 5] = [
    "08:30-10:00",
    "10:30-12:00",
    "13:00-14:30",
    "15:00-16:30",
    "17:00-18:30",
];

/// One row of the grid: the label shown to the user and the span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    label: String,
    range: TimeRange,
}

impl TimeSlot {
    pub fn parse(label: &str) -> Result<Self, GridConfigError> {
        let label = label.trim();
        let range = TimeRange::parse(label)
            .ok_or_else(|| GridConfigError::InvalidSlot(label.to_string()))?;
        Ok(Self {
            label: label.to_string(),
            range,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridConfigError {
    NoDays,
    NoSlots,
    UnknownDay(String),
    InvalidSlot(String),
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridConfigError::NoDays => write!(f, "grid needs at least one day"),
            GridConfigError::NoSlots => write!(f, "grid needs at least one time slot"),
            GridConfigError::UnknownDay(day) => write!(f, "unknown day '{day}'"),
            GridConfigError::InvalidSlot(label) => {
                write!(f, "time slot '{label}' is not a valid H:MM-H:MM range")
            }
        }
    }
}

impl std::error::Error for GridConfigError {}

/// The fixed display grid the projector fills: days are columns, slots rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGrid {
    days: Vec<Weekday>,
    slots: Vec<TimeSlot>,
}

/// Serializable form of [`WeeklyGrid`]; days are written as `Mon`..`Sun`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    days: Vec<String>,
    slots: Vec<String>,
}

impl Default for WeeklyGrid {
    fn default() -> Self {
        let slots = DEFAULT_SLOT_LABELS
            .iter()
            .filter_map(|label| TimeSlot::parse(label).ok())
            .collect();
        Self {
            days: WEEK.to_vec(),
            slots,
        }
    }
}

impl WeeklyGrid {
    pub fn new(days: Vec<Weekday>, slots: Vec<TimeSlot>) -> Result<Self, GridConfigError> {
        if days.is_empty() {
            return Err(GridConfigError::NoDays);
        }
        if slots.is_empty() {
            return Err(GridConfigError::NoSlots);
        }
        let mut days = days;
        days.sort_by_key(|wd| wd.num_days_from_monday());
        days.dedup();
        Ok(Self { days, slots })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self, GridConfigError> {
        let days = config
            .days
            .iter()
            .map(|day| parse_single_day(day).ok_or_else(|| GridConfigError::UnknownDay(day.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let slots = config
            .slots
            .iter()
            .map(|label| TimeSlot::parse(label))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(days, slots)
    }

    pub fn to_config(&self) -> GridConfig {
        GridConfig::from(self)
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn cell_count(&self) -> usize {
        self.days.len() * self.slots.len()
    }
}

impl GridConfig {
    pub fn new<I, J, S, T>(days: I, slots: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            slots: slots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig::from(&WeeklyGrid::default())
    }
}

impl From<&WeeklyGrid> for GridConfig {
    fn from(grid: &WeeklyGrid) -> Self {
        Self {
            days: grid.days.iter().map(|day| day.to_string()).collect(),
            slots: grid.slots.iter().map(|slot| slot.label.clone()).collect(),
        }
    }
}
