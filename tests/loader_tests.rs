use course_catalog::{
    CourseSource, LoadError, load_courses_from_csv, load_courses_from_json, parse_courses_from_str,
    save_courses_to_json,
};
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.csv");

#[test]
fn loads_fixture_catalog_in_sheet_order() {
    let courses = load_courses_from_csv(FIXTURE).expect("load fixture");
    let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["C1", "C2", "C3", "C4", "C5"]);

    let intro = &courses[0];
    assert_eq!(intro.course_id, "ECON101");
    assert_eq!(intro.days, "Mon,Wed");
    assert_eq!(intro.rating, Some(4.5));
    assert_eq!(intro.instructor_rating, Some(4.8));
    assert_eq!(intro.japanese_comments.as_deref(), Some("とても良い授業"));

    // Blank rating stays absent rather than zero.
    assert_eq!(courses[2].rating, None);
    assert_eq!(courses[2].workload, Some(3.0));
    assert_eq!(courses[1].japanese_comments, None);
}

#[test]
fn rows_without_id_and_repeated_ids_are_dropped() {
    let text = "id,name\nA,First\n,No id\n  ,Blank id\nA,Second A\nB,Bee\n";
    let courses = parse_courses_from_str(text).expect("parse");
    let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Bee"]);
}

#[test]
fn missing_columns_default_to_empty() {
    let courses = parse_courses_from_str("id,name\nX1,Only a name\n").expect("parse");
    assert_eq!(courses.len(), 1);
    let course = &courses[0];
    assert_eq!(course.instructor, "");
    assert_eq!(course.term, "");
    assert_eq!(course.rating, None);
    assert_eq!(course.workload, None);
    assert_eq!(course.japanese_comments, None);
    assert!(!course.is_plottable());
}

#[test]
fn short_rows_and_junk_numbers_are_tolerated() {
    let text = "id,name,rating,workload\nA,Alpha,n/a,3\nB,Beta\n";
    let courses = parse_courses_from_str(text).expect("parse");
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].rating, None);
    assert_eq!(courses[0].workload, Some(3.0));
    assert_eq!(courses[1].rating, None);
    assert_eq!(courses[1].workload, None);
}

#[test]
fn values_and_headers_are_trimmed() {
    let text = "\u{feff}id , name ,department\n  A1 ,  Padded  , Economics \n";
    let courses = parse_courses_from_str(text).expect("parse");
    assert_eq!(courses[0].id, "A1");
    assert_eq!(courses[0].name, "Padded");
    assert_eq!(courses[0].department, "Economics");
}

#[test]
fn document_without_id_column_is_rejected() {
    let err = parse_courses_from_str("name,term\nAlpha,Spring 1\n").unwrap_err();
    assert!(matches!(err, LoadError::MissingIdColumn));
}

#[test]
fn header_only_document_is_empty_catalog() {
    let courses = parse_courses_from_str("id,name,rating\n").expect("parse");
    assert!(courses.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_courses_from_csv("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn json_export_round_trips_through_source() {
    let courses = load_courses_from_csv(FIXTURE).expect("load fixture");
    let tmp = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    save_courses_to_json(&courses, tmp.path()).expect("save json");

    let reloaded = CourseSource::parse(&tmp.path().to_string_lossy())
        .load_local()
        .expect("load json");
    assert_eq!(reloaded, courses);
}

#[test]
fn json_import_applies_id_rules() {
    let mut tmp = NamedTempFile::new().expect("temp file");
    write!(
        tmp,
        r#"[{{"id":" A ","name":"One"}},{{"id":"","name":"Blank"}},{{"id":"A","name":"Again"}}]"#
    )
    .expect("write json");
    let courses = load_courses_from_json(tmp.path()).expect("load json");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, "A");
    assert_eq!(courses[0].name, "One");
}

#[test]
fn url_sources_need_the_async_loader() {
    let source = CourseSource::parse("https://example.com/pub?output=csv");
    assert!(matches!(source.load_local(), Err(LoadError::RemoteDisabled(_))));
}
