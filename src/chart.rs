//! Rating-vs-workload scatter data. Rendering is left to the host; this module
//! decides which courses are plotted, where, and which one a click selects.

use crate::course::CourseRecord;
use serde::{Deserialize, Serialize};

/// One plotted course: workload on x, rating on y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub id: String,
    pub name: String,
    pub instructor: String,
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub fn from_course(course: &CourseRecord) -> Option<Self> {
        Some(Self {
            id: course.id.clone(),
            name: course.name.clone(),
            instructor: course.instructor.clone(),
            x: course.workload?,
            y: course.rating?,
        })
    }
}

/// Courses missing either score are not plotted.
pub fn chart_points<'a, I>(courses: I) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    courses.into_iter().filter_map(ChartPoint::from_course).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScale {
    pub min: f64,
    pub max: f64,
    pub midpoint: f64,
}

impl ChartScale {
    pub const FIVE_POINT: ChartScale = ChartScale {
        min: 1.0,
        max: 5.0,
        midpoint: 3.0,
    };

    pub const HUNDRED_POINT: ChartScale = ChartScale {
        min: 1.0,
        max: 100.0,
        midpoint: 50.0,
    };

    /// Sheets use either 1-5 or 1-100 scores; anything above 5 means the latter.
    pub fn detect(points: &[ChartPoint]) -> Self {
        if points.iter().any(|p| p.x > 5.0 || p.y > 5.0) {
            Self::HUNDRED_POINT
        } else {
            Self::FIVE_POINT
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    HighRatingHighWorkload,
    HighRatingLowWorkload,
    LowRatingHighWorkload,
    LowRatingLowWorkload,
}

impl Quadrant {
    /// Values on the midpoint count as high.
    pub fn classify(point: &ChartPoint, scale: &ChartScale) -> Self {
        let high_rating = point.y >= scale.midpoint;
        let high_workload = point.x >= scale.midpoint;
        match (high_rating, high_workload) {
            (true, true) => Quadrant::HighRatingHighWorkload,
            (true, false) => Quadrant::HighRatingLowWorkload,
            (false, true) => Quadrant::LowRatingHighWorkload,
            (false, false) => Quadrant::LowRatingLowWorkload,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::HighRatingHighWorkload => "high rating, high workload",
            Quadrant::HighRatingLowWorkload => "high rating, low workload",
            Quadrant::LowRatingHighWorkload => "low rating, high workload",
            Quadrant::LowRatingLowWorkload => "low rating, low workload",
        }
    }
}

/// The point nearest to `(x, y)` within `radius` (chart units), if any.
/// Ties keep the earlier point.
pub fn hit_test(points: &[ChartPoint], x: f64, y: f64, radius: f64) -> Option<&ChartPoint> {
    let mut best: Option<(&ChartPoint, f64)> = None;
    for point in points {
        let distance = (point.x - x).hypot(point.y - y);
        if distance > radius {
            continue;
        }
        if best.is_none_or(|(_, current)| distance < current) {
            best = Some((point, distance));
        }
    }
    best.map(|(point, _)| point)
}

/// Averages over present values only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub count: usize,
    pub rated: usize,
    pub mean_rating: Option<f64>,
    pub mean_workload: Option<f64>,
}

impl CatalogSummary {
    pub fn from_courses<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a CourseRecord>,
    {
        let mut count = 0;
        let (mut rating_sum, mut rating_n) = (0.0, 0usize);
        let (mut workload_sum, mut workload_n) = (0.0, 0usize);
        for course in courses {
            count += 1;
            if let Some(rating) = course.rating {
                rating_sum += rating;
                rating_n += 1;
            }
            if let Some(workload) = course.workload {
                workload_sum += workload;
                workload_n += 1;
            }
        }
        Self {
            count,
            rated: rating_n,
            mean_rating: (rating_n > 0).then(|| rating_sum / rating_n as f64),
            mean_workload: (workload_n > 0).then(|| workload_sum / workload_n as f64),
        }
    }
}
