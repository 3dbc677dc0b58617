use crate::course::CourseRecord;
use csv::StringRecord;
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(feature = "remote")]
pub mod remote;

#[cfg(feature = "remote")]
pub use remote::fetch_courses;

/// Whole-document load failure. Bad individual rows never produce one of these.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Csv(csv::Error),
    Serialization(SerdeJsonError),
    #[cfg(feature = "remote")]
    Http(reqwest::Error),
    Status { url: String, status: u16 },
    MissingIdColumn,
    RemoteDisabled(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "io error: {err}"),
            LoadError::Csv(err) => write!(f, "csv error: {err}"),
            LoadError::Serialization(err) => write!(f, "serialization error: {err}"),
            #[cfg(feature = "remote")]
            LoadError::Http(err) => write!(f, "http error: {err}"),
            LoadError::Status { url, status } => {
                write!(f, "request to {url} failed with status {status}")
            }
            LoadError::MissingIdColumn => write!(f, "header row has no 'id' column"),
            LoadError::RemoteDisabled(url) => write!(
                f,
                "cannot fetch {url}: built without the 'remote' feature"
            ),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for LoadError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<SerdeJsonError> for LoadError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for LoadError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseSource {
    File(PathBuf),
    Url(String),
}

impl CourseSource {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CourseSource::Url(trimmed.to_string())
        } else {
            CourseSource::File(PathBuf::from(trimmed))
        }
    }

    /// Loads a file source. `.json` files are read as exported records,
    /// anything else as CSV. URL sources need [`CourseSource::load`].
    pub fn load_local(&self) -> LoadResult<Vec<CourseRecord>> {
        match self {
            CourseSource::File(path) => {
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    load_courses_from_json(path)
                } else {
                    load_courses_from_csv(path)
                }
            }
            CourseSource::Url(url) => Err(LoadError::RemoteDisabled(url.clone())),
        }
    }

    #[cfg(feature = "remote")]
    pub async fn load(&self) -> LoadResult<Vec<CourseRecord>> {
        match self {
            CourseSource::Url(url) => fetch_courses(url).await,
            CourseSource::File(_) => self.load_local(),
        }
    }
}

impl fmt::Display for CourseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseSource::File(path) => write!(f, "{}", path.display()),
            CourseSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Column positions for the recognized headers; `None` when the sheet lacks one.
#[derive(Debug, Default)]
struct ColumnIndex {
    id: Option<usize>,
    course_id: Option<usize>,
    name: Option<usize>,
    instructor: Option<usize>,
    term: Option<usize>,
    semester: Option<usize>,
    department: Option<usize>,
    rating: Option<usize>,
    workload: Option<usize>,
    days: Option<usize>,
    time: Option<usize>,
    japanese_comments: Option<usize>,
    instructor_rating: Option<usize>,
    course_pedagogy_image: Option<usize>,
    instructor_rating_image: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut index = ColumnIndex::default();
        for (pos, raw) in headers.iter().enumerate() {
            let slot = match raw.trim_start_matches('\u{feff}').trim() {
                "id" => &mut index.id,
                "course_id" => &mut index.course_id,
                "name" => &mut index.name,
                "instructor" => &mut index.instructor,
                "term" => &mut index.term,
                "semester" => &mut index.semester,
                "department" => &mut index.department,
                "rating" => &mut index.rating,
                "workload" => &mut index.workload,
                "days" => &mut index.days,
                "time" => &mut index.time,
                "japaneseComments" => &mut index.japanese_comments,
                "instructorRating" => &mut index.instructor_rating,
                "coursePedagogyImage" => &mut index.course_pedagogy_image,
                "instructorRatingImage" => &mut index.instructor_rating_image,
                _ => continue,
            };
            // First occurrence of a duplicated header wins.
            if slot.is_none() {
                *slot = Some(pos);
            }
        }
        index
    }

    fn text(&self, row: &StringRecord, column: Option<usize>) -> String {
        column
            .and_then(|pos| row.get(pos))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn optional_text(&self, row: &StringRecord, column: Option<usize>) -> Option<String> {
        let value = self.text(row, column);
        if value.is_empty() { None } else { Some(value) }
    }

    fn number(&self, row: &StringRecord, column: Option<usize>) -> Option<f64> {
        parse_number(&self.text(row, column))
    }

    fn course(&self, row: &StringRecord) -> Option<CourseRecord> {
        let id = self.text(row, self.id);
        if id.is_empty() {
            return None;
        }
        Some(CourseRecord {
            id,
            course_id: self.text(row, self.course_id),
            name: self.text(row, self.name),
            instructor: self.text(row, self.instructor),
            term: self.text(row, self.term),
            semester: self.text(row, self.semester),
            department: self.text(row, self.department),
            rating: self.number(row, self.rating),
            workload: self.number(row, self.workload),
            days: self.text(row, self.days),
            time: self.text(row, self.time),
            japanese_comments: self.optional_text(row, self.japanese_comments),
            instructor_rating: self.number(row, self.instructor_rating),
            course_pedagogy_image: self.optional_text(row, self.course_pedagogy_image),
            instructor_rating_image: self.optional_text(row, self.instructor_rating_image),
        })
    }
}

/// Best-effort numeric coercion: blanks, junk and non-finite values become `None`.
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a catalog sheet. Rows without an id, rows repeating an earlier id
/// and rows that fail to decode are dropped; only document-level problems fail.
pub fn parse_courses<R: Read>(reader: R) -> LoadResult<Vec<CourseRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers);
    if columns.id.is_none() {
        return Err(LoadError::MissingIdColumn);
    }

    let mut courses = Vec::new();
    let mut seen = HashSet::new();
    let mut dropped = 0usize;
    for (line, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!(row = line + 1, error = %err, "skipping undecodable catalog row");
                dropped += 1;
                continue;
            }
        };
        let Some(course) = columns.course(&row) else {
            dropped += 1;
            continue;
        };
        if !seen.insert(course.id.clone()) {
            debug!(id = %course.id, "skipping duplicate course id");
            dropped += 1;
            continue;
        }
        courses.push(course);
    }

    debug!(loaded = courses.len(), dropped, "parsed course catalog");
    Ok(courses)
}

pub fn parse_courses_from_str(text: &str) -> LoadResult<Vec<CourseRecord>> {
    parse_courses(text.as_bytes())
}

pub fn load_courses_from_csv<P: AsRef<Path>>(path: P) -> LoadResult<Vec<CourseRecord>> {
    let file = File::open(path)?;
    parse_courses(file)
}

pub fn save_courses_to_json<P: AsRef<Path>>(courses: &[CourseRecord], path: P) -> LoadResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, courses)?;
    Ok(())
}

/// Reads records written by [`save_courses_to_json`], applying the same id rules
/// as the CSV path.
pub fn load_courses_from_json<P: AsRef<Path>>(path: P) -> LoadResult<Vec<CourseRecord>> {
    let file = File::open(path)?;
    let records: Vec<CourseRecord> = serde_json::from_reader(file)?;
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let courses: Vec<CourseRecord> = records
        .into_iter()
        .filter_map(|mut course| {
            course.id = course.id.trim().to_string();
            if course.id.is_empty() || !seen.insert(course.id.clone()) {
                None
            } else {
                Some(course)
            }
        })
        .collect();
    if courses.len() < total {
        warn!(
            dropped = total - courses.len(),
            "dropped exported courses with missing or duplicate ids"
        );
    }
    Ok(courses)
}
