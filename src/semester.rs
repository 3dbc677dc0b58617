//! Favorites split the way the favorites page shows them: one tab per
//! semester, Spring and Fall further split into their two modules.

use crate::course::CourseRecord;
use std::collections::BTreeMap;

/// Tabs shown even when they hold no favorites.
pub const BOARD_SEMESTERS: [&str; 3] = ["Spring", "Fall", "January"];

/// Group label for courses with a blank semester.
pub const OTHER_SEMESTER: &str = "Other";

pub const FULL_TERM: &str = "Full Term";

/// One list within a semester tab, e.g. `Spring 1`.
#[derive(Debug, Clone)]
pub struct TermPart<'a> {
    pub label: String,
    pub courses: Vec<&'a CourseRecord>,
}

#[derive(Debug, Clone)]
pub struct SemesterTab<'a> {
    pub semester: String,
    pub parts: Vec<TermPart<'a>>,
}

impl<'a> SemesterTab<'a> {
    pub fn part(&self, label: &str) -> Option<&TermPart<'a>> {
        self.parts
            .iter()
            .find(|part| part.label.eq_ignore_ascii_case(label))
    }

    pub fn course_count(&self) -> usize {
        self.parts.iter().map(|part| part.courses.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct SemesterBoard<'a> {
    tabs: Vec<SemesterTab<'a>>,
    groups: BTreeMap<String, Vec<&'a CourseRecord>>,
}

/// Group key for a semester label: board semesters match case-insensitively
/// and take their canonical spelling, blank labels become [`OTHER_SEMESTER`].
fn semester_key(semester: &str) -> &str {
    let semester = semester.trim();
    if semester.is_empty() {
        return OTHER_SEMESTER;
    }
    BOARD_SEMESTERS
        .iter()
        .copied()
        .find(|board| board.eq_ignore_ascii_case(semester))
        .unwrap_or(semester)
}

/// Courses grouped by semester label.
pub fn group_by_semester<'a, I>(courses: I) -> BTreeMap<String, Vec<&'a CourseRecord>>
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    let mut groups: BTreeMap<String, Vec<&'a CourseRecord>> = BTreeMap::new();
    for course in courses {
        groups
            .entry(semester_key(&course.semester).to_string())
            .or_default()
            .push(course);
    }
    groups
}

fn in_module(course: &CourseRecord, module: &str) -> bool {
    let term = course.term.trim();
    term.eq_ignore_ascii_case(module) || term.eq_ignore_ascii_case(FULL_TERM)
}

/// Splits a semester group into its first and second module. Full-term
/// courses appear in both.
pub fn split_modules<'a>(
    courses: &[&'a CourseRecord],
    first: &str,
    second: &str,
) -> (Vec<&'a CourseRecord>, Vec<&'a CourseRecord>) {
    let pick = |module: &str| {
        courses
            .iter()
            .copied()
            .filter(|course| in_module(course, module))
            .collect::<Vec<_>>()
    };
    (pick(first), pick(second))
}

impl<'a> SemesterBoard<'a> {
    pub fn build<I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a CourseRecord>,
    {
        let groups = group_by_semester(courses);
        let empty = Vec::new();
        let tabs = BOARD_SEMESTERS
            .iter()
            .map(|semester| {
                let group = groups.get(*semester).unwrap_or(&empty);
                let parts = match *semester {
                    "Spring" => {
                        let (one, two) = split_modules(group, "Spring 1", "Spring 2");
                        vec![part("Spring 1", one), part("Spring 2", two)]
                    }
                    "Fall" => {
                        let (one, two) = split_modules(group, "Fall 1", "Fall 2");
                        vec![part("Fall 1", one), part("Fall 2", two)]
                    }
                    other => vec![part(other, group.clone())],
                };
                SemesterTab {
                    semester: semester.to_string(),
                    parts,
                }
            })
            .collect();
        Self { tabs, groups }
    }

    pub fn tabs(&self) -> &[SemesterTab<'a>] {
        &self.tabs
    }

    pub fn tab(&self, semester: &str) -> Option<&SemesterTab<'a>> {
        self.tabs
            .iter()
            .find(|tab| tab.semester.eq_ignore_ascii_case(semester))
    }

    /// Raw semester groups, including ones without a tab (e.g. `Other`).
    pub fn groups(&self) -> &BTreeMap<String, Vec<&'a CourseRecord>> {
        &self.groups
    }
}

fn part<'a>(label: &str, courses: Vec<&'a CourseRecord>) -> TermPart<'a> {
    TermPart {
        label: label.to_string(),
        courses,
    }
}
