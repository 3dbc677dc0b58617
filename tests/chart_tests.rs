use course_catalog::{
    CatalogSummary, ChartPoint, ChartScale, CourseRecord, Quadrant, chart_points, hit_test,
};

fn rated(id: &str, rating: Option<f64>, workload: Option<f64>) -> CourseRecord {
    CourseRecord::new(id, format!("Course {id}"))
        .with_instructor("Staff")
        .with_scores(rating, workload)
}

#[test]
fn only_courses_with_both_scores_are_plotted() {
    let courses = [
        rated("A", Some(4.0), Some(2.0)),
        rated("B", None, Some(3.0)),
        rated("C", Some(3.5), None),
        rated("D", Some(2.0), Some(4.5)),
    ];
    let points = chart_points(&courses);
    let ids: Vec<&str> = points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["A", "D"]);
    assert_eq!(points[0].x, 2.0);
    assert_eq!(points[0].y, 4.0);
}

#[test]
fn scale_switches_to_hundred_points() {
    let small = chart_points(&[rated("A", Some(4.0), Some(2.0))]);
    assert_eq!(ChartScale::detect(&small), ChartScale::FIVE_POINT);

    let large = chart_points(&[rated("A", Some(85.0), Some(40.0))]);
    assert_eq!(ChartScale::detect(&large), ChartScale::HUNDRED_POINT);
}

#[test]
fn quadrants_split_on_the_midpoint() {
    let scale = ChartScale::FIVE_POINT;
    let point = |x: f64, y: f64| ChartPoint {
        id: "P".into(),
        name: "P".into(),
        instructor: String::new(),
        x,
        y,
    };
    assert_eq!(Quadrant::classify(&point(2.0, 4.0), &scale), Quadrant::HighRatingLowWorkload);
    assert_eq!(Quadrant::classify(&point(4.0, 4.0), &scale), Quadrant::HighRatingHighWorkload);
    assert_eq!(Quadrant::classify(&point(2.0, 2.0), &scale), Quadrant::LowRatingLowWorkload);
    assert_eq!(Quadrant::classify(&point(4.0, 2.0), &scale), Quadrant::LowRatingHighWorkload);
    assert_eq!(Quadrant::classify(&point(3.0, 3.0), &scale), Quadrant::HighRatingHighWorkload);
}

#[test]
fn hit_test_picks_the_nearest_point_in_range() {
    let courses = [
        rated("A", Some(4.0), Some(2.0)),
        rated("B", Some(4.1), Some(2.1)),
        rated("C", Some(1.5), Some(4.5)),
    ];
    let points = chart_points(&courses);

    assert_eq!(hit_test(&points, 2.09, 4.08, 0.25).map(|p| p.id.as_str()), Some("B"));
    assert_eq!(hit_test(&points, 4.4, 1.6, 0.25).map(|p| p.id.as_str()), Some("C"));
    assert!(hit_test(&points, 3.0, 3.0, 0.25).is_none());
    assert!(hit_test(&[], 1.0, 1.0, 10.0).is_none());
}

#[test]
fn hit_test_tie_keeps_the_first_point() {
    let courses = [
        rated("A", Some(3.0), Some(2.0)),
        rated("B", Some(3.0), Some(4.0)),
    ];
    let points = chart_points(&courses);
    assert_eq!(hit_test(&points, 3.0, 3.0, 1.0).map(|p| p.id.as_str()), Some("A"));
}

#[test]
fn summary_averages_present_values() {
    let courses = [
        rated("A", Some(4.0), Some(2.0)),
        rated("B", None, Some(4.0)),
        rated("C", Some(3.0), None),
    ];
    let summary = CatalogSummary::from_courses(&courses);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.rated, 2);
    assert_eq!(summary.mean_rating, Some(3.5));
    assert_eq!(summary.mean_workload, Some(3.0));

    let empty = CatalogSummary::from_courses(Vec::<&CourseRecord>::new());
    assert_eq!(empty.count, 0);
    assert_eq!(empty.mean_rating, None);
}
