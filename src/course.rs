use serde::{Deserialize, Serialize};

/// One course listing as loaded from the catalog sheet.
///
/// Field names serialize with the sheet's column headers so a JSON export can
/// be read back by anything that understands the CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub department: String,
    /// Either a 1-5 or a 1-100 score depending on the sheet.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub workload: Option<f64>,
    /// Free text such as `Mon, Wed` or `月水`.
    #[serde(default)]
    pub days: String,
    /// Free text such as `10:30-12:00` or `1:30 pm - 2:45 pm`.
    #[serde(default)]
    pub time: String,
    #[serde(
        default,
        rename = "japaneseComments",
        skip_serializing_if = "Option::is_none"
    )]
    pub japanese_comments: Option<String>,
    #[serde(
        default,
        rename = "instructorRating",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructor_rating: Option<f64>,
    #[serde(
        default,
        rename = "coursePedagogyImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub course_pedagogy_image: Option<String>,
    #[serde(
        default,
        rename = "instructorRatingImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructor_rating_image: Option<String>,
}

impl CourseRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            course_id: String::new(),
            name: name.into(),
            instructor: String::new(),
            term: String::new(),
            semester: String::new(),
            department: String::new(),
            rating: None,
            workload: None,
            days: String::new(),
            time: String::new(),
            japanese_comments: None,
            instructor_rating: None,
            course_pedagogy_image: None,
            instructor_rating_image: None,
        }
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_term(mut self, semester: impl Into<String>, term: impl Into<String>) -> Self {
        self.semester = semester.into();
        self.term = term.into();
        self
    }

    pub fn with_scores(mut self, rating: Option<f64>, workload: Option<f64>) -> Self {
        self.rating = rating;
        self.workload = workload;
        self
    }

    pub fn with_meeting(mut self, days: impl Into<String>, time: impl Into<String>) -> Self {
        self.days = days.into();
        self.time = time.into();
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        let comments = comments.into();
        self.japanese_comments = if comments.trim().is_empty() {
            None
        } else {
            Some(comments)
        };
        self
    }

    pub fn comments(&self) -> &str {
        self.japanese_comments.as_deref().unwrap_or("")
    }

    /// Both scores present, i.e. the course can be placed on the chart.
    pub fn is_plottable(&self) -> bool {
        self.rating.is_some() && self.workload.is_some()
    }

    pub fn display_rating(&self) -> String {
        format_score(self.rating)
    }

    pub fn display_workload(&self) -> String {
        format_score(self.workload)
    }
}

fn format_score(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}
