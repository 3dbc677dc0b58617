use super::{LoadError, LoadResult, parse_courses_from_str};
use crate::course::CourseRecord;
use tracing::debug;

/// Fetches a published sheet once and parses it. No retry, no timeout beyond
/// what the transport imposes.
pub async fn fetch_courses(url: &str) -> LoadResult<Vec<CourseRecord>> {
    debug!(%url, "fetching course catalog");
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    parse_courses_from_str(&body)
}
