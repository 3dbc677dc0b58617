//! Plain-text renderings for the interactive shell.

use crate::chart::{CatalogSummary, ChartPoint, ChartScale, Quadrant};
use crate::course::CourseRecord;
use crate::schedule::ScheduleProjection;
use crate::schedule::day::japanese_label;
use crate::semester::SemesterTab;
use chrono::Weekday;

/// Display width, counting East Asian wide characters as two columns.
fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    let wide = matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6);
    if wide { 2 } else { 1 }
}

fn truncate(s: &str, max: usize) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = char_width(c);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

fn format_row(widths: &[usize], cells: &[&str]) -> String {
    let mut out = String::from("|");
    for (ci, w) in widths.iter().enumerate() {
        let cell = cells.get(ci).copied().unwrap_or("");
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(w.saturating_sub(display_width(cell))));
        out.push_str(" |");
    }
    out
}

/// Boxed table with `+---+` separators.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate().take(widths.len()) {
            widths[ci] = widths[ci].max(display_width(cell));
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format_row(&widths, headers));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_row(&widths, &cells));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

/// The course list: one row per course, with a favorite marker.
pub fn render_course_table<F>(courses: &[&CourseRecord], is_favorite: F) -> String
where
    F: Fn(&str) -> bool,
{
    if courses.is_empty() {
        return "No matching courses.\n".to_string();
    }
    let rows: Vec<Vec<String>> = courses
        .iter()
        .map(|course| {
            vec![
                if is_favorite(&course.id) { "*" } else { "" }.to_string(),
                course.id.clone(),
                truncate(&course.name, 40),
                truncate(&course.instructor, 24),
                course.department.clone(),
                course.term.clone(),
                course.display_rating(),
                course.display_workload(),
            ]
        })
        .collect();
    render_table(
        &["fav", "id", "name", "instructor", "department", "term", "rating", "workload"],
        &rows,
    )
}

/// Everything the detail dialog shows for one course.
pub fn render_course_detail(course: &CourseRecord, favorite: bool) -> String {
    let mut out = String::new();
    let heart = if favorite { " [favorite]" } else { "" };
    out.push_str(&format!("{}{}\n", course.name, heart));
    out.push_str(&format!("{} - {}\n", course.id, course.department));
    if !course.course_id.is_empty() {
        out.push_str(&format!("Course code        : {}\n", course.course_id));
    }
    out.push_str(&format!("Instructor         : {}\n", course.instructor));
    out.push_str(&format!("Semester / term    : {} / {}\n", course.semester, course.term));
    out.push_str(&format!("Meets              : {} {}\n", course.days, course.time));
    out.push_str(&format!("Rating             : {}\n", course.display_rating()));
    out.push_str(&format!("Workload           : {}\n", course.display_workload()));
    if let Some(score) = course.instructor_rating {
        out.push_str(&format!("Instructor rating  : {score:.1}\n"));
    }
    if let Some(url) = &course.course_pedagogy_image {
        out.push_str(&format!("Pedagogy chart     : {url}\n"));
    }
    if let Some(url) = &course.instructor_rating_image {
        out.push_str(&format!("Instructor chart   : {url}\n"));
    }
    if let Some(comments) = &course.japanese_comments {
        out.push_str(&format!("Comments           : {comments}\n"));
    }
    out
}

/// How the weekly grid names its day columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayLabels {
    /// `Mon`, `Tue`, ...
    #[default]
    English,
    /// `月`, `火`, ...
    Japanese,
}

impl DayLabels {
    fn label(self, day: Weekday) -> String {
        match self {
            DayLabels::English => day.to_string(),
            DayLabels::Japanese => japanese_label(day).to_string(),
        }
    }
}

/// Weekly grid: slots down the side, days across, course names in cells.
pub fn render_weekly_grid(projection: &ScheduleProjection<'_>, labels: DayLabels) -> String {
    let grid = projection.grid();
    let mut headers = vec!["time".to_string()];
    headers.extend(grid.days().iter().map(|day| labels.label(*day)));

    let rows: Vec<Vec<String>> = grid
        .slots()
        .iter()
        .enumerate()
        .map(|(slot_index, slot)| {
            let mut row = vec![slot.label().to_string()];
            for day in grid.days() {
                let names = projection
                    .cell(*day, slot_index)
                    .map(|cell| {
                        cell.courses
                            .iter()
                            .map(|course| truncate(&course.name, 18))
                            .collect::<Vec<_>>()
                            .join(" / ")
                    })
                    .unwrap_or_default();
                row.push(names);
            }
            row
        })
        .collect();

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let mut out = render_table(&header_refs, &rows);
    for cell in projection.conflicts() {
        let ids = cell
            .courses
            .iter()
            .map(|course| course.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "Conflict {} {}: {}\n",
            labels.label(cell.day),
            grid.slots()[cell.slot_index].label(),
            ids
        ));
    }
    if !projection.unplaced().is_empty() {
        let ids = projection
            .unplaced()
            .iter()
            .map(|course| course.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Not on grid: {ids}\n"));
    }
    out
}

pub fn render_semester_tab<F>(tab: &SemesterTab<'_>, is_favorite: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut out = format!("== {} ==\n", tab.semester);
    for part in &tab.parts {
        if tab.parts.len() > 1 {
            out.push_str(&format!("-- {} --\n", part.label));
        }
        if part.courses.is_empty() {
            out.push_str("No favorites yet.\n");
        } else {
            out.push_str(&render_course_table(&part.courses, &is_favorite));
        }
    }
    out
}

pub fn render_chart_summary(points: &[ChartPoint], summary: &CatalogSummary) -> String {
    let scale = ChartScale::detect(points);
    let mut out = format!(
        "Courses: {} (plotted {}), scale {}-{}\n",
        summary.count, points.len(), scale.min, scale.max
    );
    let mean = |value: Option<f64>| value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".into());
    out.push_str(&format!(
        "Mean rating: {}  Mean workload: {}\n",
        mean(summary.mean_rating),
        mean(summary.mean_workload)
    ));
    for quadrant in [
        Quadrant::HighRatingLowWorkload,
        Quadrant::HighRatingHighWorkload,
        Quadrant::LowRatingLowWorkload,
        Quadrant::LowRatingHighWorkload,
    ] {
        let ids: Vec<&str> = points
            .iter()
            .filter(|point| Quadrant::classify(point, &scale) == quadrant)
            .map(|point| point.id.as_str())
            .collect();
        out.push_str(&format!("{:<28}: {}\n", quadrant.label(), ids.join(", ")));
    }
    out
}
