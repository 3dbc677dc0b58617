pub mod catalog;
pub mod chart;
pub mod config;
pub mod course;
pub mod favorites;
pub mod filter;
pub mod loader;
pub mod persistence;
pub mod schedule;
pub mod semester;
pub mod view;

pub use catalog::Catalog;
pub use chart::{CatalogSummary, ChartPoint, ChartScale, Quadrant, chart_points, hit_test};
pub use config::{CatalogConfig, ConfigError};
pub use course::CourseRecord;
pub use favorites::{FAVORITES_KEY, FavoriteSet, FavoritesStore, SubscriptionId};
pub use filter::{ALL_SENTINEL, SearchCriteria, favorite_courses, filter_courses};
#[cfg(feature = "remote")]
pub use loader::fetch_courses;
pub use loader::{
    CourseSource, LoadError, LoadResult, load_courses_from_csv, load_courses_from_json,
    parse_courses, parse_courses_from_str, save_courses_to_json,
};
#[cfg(feature = "sqlite")]
pub use persistence::SqliteBlobStore;
pub use persistence::{
    BlobStore, FileBlobStore, MemoryBlobStore, PersistenceError, PersistenceResult,
};
pub use schedule::{
    GridConfig, GridConfigError, MatchPolicy, ScheduleCell, ScheduleProjection, TimeRange,
    TimeSlot, WeeklyGrid, project_schedule,
};
pub use semester::{SemesterBoard, SemesterTab, TermPart};
