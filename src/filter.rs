use crate::course::CourseRecord;
use crate::favorites::FavoriteSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category value meaning "do not filter on this field".
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// True when every record passes.
    pub fn is_identity(&self) -> bool {
        self.active_query().is_none()
            && category(&self.department).is_none()
            && category(&self.term).is_none()
    }

    fn active_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, course: &CourseRecord) -> bool {
        self.matcher().matches(course)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            query: self.active_query(),
            department: category(&self.department),
            term: category(&self.term),
        }
    }
}

fn category(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}

/// Criteria with the query lowercased once per filter pass.
struct Matcher<'a> {
    query: Option<String>,
    department: Option<&'a str>,
    term: Option<&'a str>,
}

impl Matcher<'_> {
    fn matches(&self, course: &CourseRecord) -> bool {
        if let Some(query) = &self.query {
            let hit = course.name.to_lowercase().contains(query)
                || course.instructor.to_lowercase().contains(query)
                || course.comments().to_lowercase().contains(query);
            if !hit {
                return false;
            }
        }
        if let Some(department) = self.department {
            if course.department != department {
                return false;
            }
        }
        if let Some(term) = self.term {
            if course.term != term {
                return false;
            }
        }
        true
    }
}

/// Stable filter: matching records come back in input order.
pub fn filter_courses<'a>(
    courses: &'a [CourseRecord],
    criteria: &SearchCriteria,
) -> Vec<&'a CourseRecord> {
    let matcher = criteria.matcher();
    courses.iter().filter(|course| matcher.matches(course)).collect()
}

/// Courses whose id is in `favorites`, in catalog order.
pub fn favorite_courses<'a>(
    courses: &'a [CourseRecord],
    favorites: &FavoriteSet,
) -> Vec<&'a CourseRecord> {
    courses
        .iter()
        .filter(|course| favorites.contains(&course.id))
        .collect()
}

fn distinct<'a, F>(courses: &'a [CourseRecord], field: F) -> Vec<String>
where
    F: Fn(&'a CourseRecord) -> &'a str,
{
    courses
        .iter()
        .map(field)
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted, distinct, non-blank departments.
pub fn departments(courses: &[CourseRecord]) -> Vec<String> {
    distinct(courses, |course| course.department.as_str())
}

pub fn terms(courses: &[CourseRecord]) -> Vec<String> {
    distinct(courses, |course| course.term.as_str())
}

pub fn semesters(courses: &[CourseRecord]) -> Vec<String> {
    distinct(courses, |course| course.semester.as_str())
}
