use chrono::Weekday;
use course_catalog::view::{DayLabels, render_course_table, render_weekly_grid};
use course_catalog::{
    Catalog, FavoriteSet, FavoritesStore, MatchPolicy, MemoryBlobStore, SearchCriteria,
    load_courses_from_csv,
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.csv");

fn fixture_catalog() -> Catalog {
    Catalog::new(load_courses_from_csv(FIXTURE).expect("load fixture"))
}

#[test]
fn catalog_filters_with_active_criteria() {
    let mut catalog = fixture_catalog();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.filtered().len(), 5);

    catalog.set_criteria(SearchCriteria::new().with_department("Economics"));
    let ids: Vec<&str> = catalog.filtered().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["C1", "C4"]);

    catalog.reset_criteria();
    assert!(catalog.criteria().is_identity());
    assert_eq!(catalog.filtered().len(), 5);
}

#[test]
fn facets_come_from_loaded_records() {
    let catalog = fixture_catalog();
    assert_eq!(
        catalog.departments(),
        ["Arts", "Computer Science", "Economics", "History"]
    );
    assert_eq!(catalog.semesters(), ["Fall", "January", "Spring"]);
}

#[test]
fn reload_replaces_the_snapshot() {
    let mut catalog = fixture_catalog();
    let before = catalog.snapshot();
    catalog.replace_records(Vec::new());
    assert!(catalog.is_empty());
    // Earlier readers keep the list they had.
    assert_eq!(before.len(), 5);
}

#[test]
fn favorites_drive_board_and_schedule() {
    let catalog = fixture_catalog();
    let store = FavoritesStore::open(MemoryBlobStore::new()).unwrap();
    for id in ["C1", "C2", "C3", "C4"] {
        store.toggle(id).unwrap();
    }
    let favorites = store.list();

    let board = catalog.semester_board(&favorites);
    let spring = board.tab("Spring").unwrap();
    assert_eq!(spring.part("Spring 1").unwrap().courses.len(), 2);
    assert_eq!(spring.part("Spring 2").unwrap().courses.len(), 2);
    assert_eq!(board.tab("Fall").unwrap().course_count(), 1);
    assert_eq!(board.tab("January").unwrap().course_count(), 0);

    let projection = catalog.schedule_for(&favorites, MatchPolicy::Overlap);
    assert_eq!(
        projection.placements_of("C3"),
        vec![(Weekday::Mon, "13:00-14:30"), (Weekday::Thu, "13:00-14:30")]
    );
    // C4 meets at TBD.
    let unplaced: Vec<&str> = projection.unplaced().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(unplaced, ["C4"]);

    let exact = catalog.schedule_for(&favorites, MatchPolicy::ExactSlot);
    assert!(exact.placements_of("C2").is_empty());
}

#[test]
fn chart_follows_the_search() {
    let mut catalog = fixture_catalog();
    // C3 has no rating.
    assert_eq!(catalog.chart().len(), 4);
    assert_eq!(catalog.summary().count, 5);

    catalog.set_criteria(SearchCriteria::new().with_query("tanaka"));
    let ids: Vec<String> = catalog.chart().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, ["C1", "C4"]);
}

#[test]
fn course_table_marks_favorites() {
    let catalog = fixture_catalog();
    let favorites = FavoriteSet::from_ids(["C2"]);
    let table = render_course_table(&catalog.filtered(), |id| favorites.contains(id));
    assert!(table.contains("Modern History"));
    let history_row = table.lines().find(|line| line.contains("C2")).unwrap();
    assert!(history_row.starts_with("| *"));
    let intro_row = table.lines().find(|line| line.contains("C1")).unwrap();
    assert!(!intro_row.starts_with("| *"));
}

#[test]
fn weekly_grid_lists_conflicts_and_unplaced() {
    let catalog = fixture_catalog();
    let favorites = FavoriteSet::from_ids(["C1", "C4", "C5"]);
    let projection = catalog.schedule_for(&favorites, MatchPolicy::Overlap);
    let text = render_weekly_grid(&projection, DayLabels::English);
    assert!(text.contains("Intro Economics"));
    assert!(text.contains("Japanese Calligra"));
    assert!(text.contains("Not on grid: C4"));
    assert!(!text.contains("Conflict"));
}

#[test]
fn weekly_grid_can_use_japanese_day_headers() {
    let catalog = fixture_catalog();
    let favorites = FavoriteSet::from_ids(["C1"]);
    let projection = catalog.schedule_for(&favorites, MatchPolicy::Overlap);

    let english = render_weekly_grid(&projection, DayLabels::English);
    let header = english.lines().nth(1).unwrap();
    assert!(header.contains("Mon") && header.contains("Sun"));

    let japanese = render_weekly_grid(&projection, DayLabels::Japanese);
    let header = japanese.lines().nth(1).unwrap();
    for label in ["月", "火", "水", "木", "金", "土", "日"] {
        assert!(header.contains(label), "missing {label} in {header}");
    }
    assert!(!header.contains("Mon"));
}
