use crate::chart::{CatalogSummary, ChartPoint, chart_points};
use crate::course::CourseRecord;
use crate::favorites::FavoriteSet;
use crate::filter::{self, SearchCriteria};
use crate::schedule::{MatchPolicy, ScheduleProjection, WeeklyGrid, project_schedule};
use crate::semester::SemesterBoard;
use std::sync::Arc;

/// Host-side state: the loaded records and the active search. Records are an
/// immutable snapshot replaced whole on reload; everything else is derived.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Arc<Vec<CourseRecord>>,
    criteria: SearchCriteria,
    grid: WeeklyGrid,
}

impl Catalog {
    pub fn new(records: Vec<CourseRecord>) -> Self {
        Self {
            records: Arc::new(records),
            ..Self::default()
        }
    }

    pub fn with_grid(mut self, grid: WeeklyGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Swaps in a freshly loaded list. The last load to finish wins.
    pub fn replace_records(&mut self, records: Vec<CourseRecord>) {
        self.records = Arc::new(records);
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn snapshot(&self) -> Arc<Vec<CourseRecord>> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
    }

    pub fn reset_criteria(&mut self) {
        self.criteria = SearchCriteria::default();
    }

    pub fn grid(&self) -> &WeeklyGrid {
        &self.grid
    }

    pub fn set_grid(&mut self, grid: WeeklyGrid) {
        self.grid = grid;
    }

    pub fn find(&self, id: &str) -> Option<&CourseRecord> {
        self.records.iter().find(|course| course.id == id)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&CourseRecord> {
        filter::filter_courses(&self.records, criteria)
    }

    /// Records matching the active criteria.
    pub fn filtered(&self) -> Vec<&CourseRecord> {
        self.search(&self.criteria)
    }

    pub fn departments(&self) -> Vec<String> {
        filter::departments(&self.records)
    }

    pub fn terms(&self) -> Vec<String> {
        filter::terms(&self.records)
    }

    pub fn semesters(&self) -> Vec<String> {
        filter::semesters(&self.records)
    }

    pub fn favorites_of(&self, favorites: &FavoriteSet) -> Vec<&CourseRecord> {
        filter::favorite_courses(&self.records, favorites)
    }

    pub fn semester_board(&self, favorites: &FavoriteSet) -> SemesterBoard<'_> {
        SemesterBoard::build(self.favorites_of(favorites))
    }

    pub fn schedule_for(
        &self,
        favorites: &FavoriteSet,
        policy: MatchPolicy,
    ) -> ScheduleProjection<'_> {
        project_schedule(self.favorites_of(favorites), &self.grid, policy)
    }

    /// Chart data for the active search.
    pub fn chart(&self) -> Vec<ChartPoint> {
        chart_points(self.filtered())
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary::from_courses(self.filtered())
    }
}
