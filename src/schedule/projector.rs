use super::day::parse_days;
use super::grid::{TimeSlot, WeeklyGrid};
use super::time::TimeRange;
use crate::course::CourseRecord;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a course's `time` text is matched against a grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// `time` must equal the slot label exactly.
    ExactSlot,
    /// The parsed range must intersect the slot's range.
    #[default]
    Overlap,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::ExactSlot => "exact",
            MatchPolicy::Overlap => "overlap",
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "exact_slot" => Ok(MatchPolicy::ExactSlot),
            "overlap" => Ok(MatchPolicy::Overlap),
            other => Err(format!("unknown match policy '{other}'")),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The courses sitting in one (day, slot) cell, in input order.
#[derive(Debug, Clone)]
pub struct ScheduleCell<'a> {
    pub day: Weekday,
    pub slot_index: usize,
    pub courses: Vec<&'a CourseRecord>,
}

impl ScheduleCell<'_> {
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn is_conflict(&self) -> bool {
        self.courses.len() > 1
    }
}

/// Result of placing courses on a [`WeeklyGrid`]. Always has one cell per
/// grid coordinate, day-major, even when every cell is empty.
#[derive(Debug, Clone)]
pub struct ScheduleProjection<'a> {
    grid: WeeklyGrid,
    policy: MatchPolicy,
    cells: Vec<ScheduleCell<'a>>,
    unplaced: Vec<&'a CourseRecord>,
}

impl<'a> ScheduleProjection<'a> {
    pub fn grid(&self) -> &WeeklyGrid {
        &self.grid
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn cells(&self) -> &[ScheduleCell<'a>] {
        &self.cells
    }

    pub fn cell(&self, day: Weekday, slot_index: usize) -> Option<&ScheduleCell<'a>> {
        let day_pos = self.grid.days().iter().position(|d| *d == day)?;
        if slot_index >= self.grid.slots().len() {
            return None;
        }
        self.cells.get(day_pos * self.grid.slots().len() + slot_index)
    }

    /// Lookup by the slot's display label, e.g. `"10:30-12:00"`.
    pub fn cell_by_label(&self, day: Weekday, label: &str) -> Option<&ScheduleCell<'a>> {
        let slot_index = self.grid.slots().iter().position(|s| s.label() == label)?;
        self.cell(day, slot_index)
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = &ScheduleCell<'a>> {
        self.cells.iter().filter(|cell| !cell.is_empty())
    }

    /// Cells where more than one course meets.
    pub fn conflicts(&self) -> Vec<&ScheduleCell<'a>> {
        self.cells.iter().filter(|cell| cell.is_conflict()).collect()
    }

    /// Courses that landed in no cell (unknown days, unparsable or off-grid times).
    pub fn unplaced(&self) -> &[&'a CourseRecord] {
        &self.unplaced
    }

    /// Every (day, slot label) a course occupies, in grid order.
    pub fn placements_of(&self, course_id: &str) -> Vec<(Weekday, &str)> {
        self.cells
            .iter()
            .filter(|cell| cell.courses.iter().any(|c| c.id == course_id))
            .map(|cell| (cell.day, self.grid.slots()[cell.slot_index].label()))
            .collect()
    }
}

fn occupies_slot(policy: MatchPolicy, time: &str, parsed: Option<TimeRange>, slot: &TimeSlot) -> bool {
    match policy {
        MatchPolicy::ExactSlot => time.trim() == slot.label(),
        MatchPolicy::Overlap => parsed.is_some_and(|range| range.overlaps(&slot.range())),
    }
}

/// Places each course in every cell whose day it meets on and whose slot its
/// time matches under `policy`. Never fails: malformed days or times just
/// leave the course out of the affected cells.
pub fn project_schedule<'a, I>(
    courses: I,
    grid: &WeeklyGrid,
    policy: MatchPolicy,
) -> ScheduleProjection<'a>
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    let slot_count = grid.slots().len();
    let mut cells: Vec<ScheduleCell<'a>> = grid
        .days()
        .iter()
        .flat_map(|day| {
            (0..slot_count).map(move |slot_index| ScheduleCell {
                day: *day,
                slot_index,
                courses: Vec::new(),
            })
        })
        .collect();
    let mut unplaced = Vec::new();

    for course in courses {
        let days = parse_days(&course.days);
        let parsed = match policy {
            MatchPolicy::Overlap => TimeRange::parse(&course.time),
            MatchPolicy::ExactSlot => None,
        };

        let mut placed = false;
        for (day_pos, day) in grid.days().iter().enumerate() {
            if !days.contains(day) {
                continue;
            }
            for (slot_index, slot) in grid.slots().iter().enumerate() {
                if occupies_slot(policy, &course.time, parsed, slot) {
                    cells[day_pos * slot_count + slot_index].courses.push(course);
                    placed = true;
                }
            }
        }
        if !placed {
            unplaced.push(course);
        }
    }

    ScheduleProjection {
        grid: grid.clone(),
        policy,
        cells,
        unplaced,
    }
}
