use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(\d{1,2}):(\d{2})\s*([ap])?(?:\.?\s*m\.?)?\s*[-–—~〜]\s*(\d{1,2}):(\d{2})\s*([ap])?(?:\.?\s*m\.?)?\s*$",
    )
    .expect("time range pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_letter(letter: &str) -> Self {
        if letter.eq_ignore_ascii_case("p") {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }
}

/// Half-open `[start, end)` span in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    /// `None` unless `start < end` and both fall within one day.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start < end && end <= 24 * 60).then_some(Self { start, end })
    }

    /// Tolerant parse of `H:MM-H:MM`, `H:MM am - H:MM pm` and friends.
    ///
    /// `pm` adds twelve hours unless the hour is already 12 and `am` turns 12
    /// into 0. A side without a marker takes the other side's marker when that
    /// keeps the range forward (`1:00-2:30 pm` is an afternoon class).
    pub fn parse(input: &str) -> Option<Self> {
        let caps = RANGE_PATTERN.captures(input)?;
        let number = |idx: usize| caps.get(idx)?.as_str().parse::<u32>().ok();
        let marker = |idx: usize| caps.get(idx).map(|m| Meridiem::from_letter(m.as_str()));

        let (start_h, start_m, start_marker) = (number(1)?, number(2)?, marker(3));
        let (end_h, end_m, end_marker) = (number(4)?, number(5)?, marker(6));

        let mut start = clock_minutes(start_h, start_m, start_marker);
        let mut end = clock_minutes(end_h, end_m, end_marker);

        if start_marker.is_none() && end_marker.is_some() {
            if let (Some(inherited), Some(end)) = (clock_minutes(start_h, start_m, end_marker), end)
            {
                if inherited < end {
                    start = Some(inherited);
                }
            }
        }
        if end_marker.is_none() && start_marker.is_some() {
            if let (Some(inherited), Some(start)) = (clock_minutes(end_h, end_m, start_marker), start)
            {
                if inherited > start {
                    end = Some(inherited);
                }
            }
        }

        Self::new(start?, end?)
    }

    /// Standard half-open interval intersection.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// `HH:MM-HH:MM`, the format of the display grid labels.
    pub fn label(&self) -> String {
        format!(
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn clock_minutes(hour: u32, minute: u32, marker: Option<Meridiem>) -> Option<u32> {
    let hour = match marker {
        None => hour,
        Some(_) if !(1..=12).contains(&hour) => return None,
        Some(Meridiem::Am) => hour % 12,
        Some(Meridiem::Pm) => hour % 12 + 12,
    };
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(time.num_seconds_from_midnight() / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(input: &str) -> Option<(u32, u32)> {
        TimeRange::parse(input).map(|r| (r.start, r.end))
    }

    #[test]
    fn parses_twenty_four_hour_ranges() {
        assert_eq!(range("10:00-11:30"), Some((600, 690)));
        assert_eq!(range(" 9:00 – 10:30 "), Some((540, 630)));
        assert_eq!(range("10:30〜12:00"), Some((630, 720)));
    }

    #[test]
    fn normalizes_meridiem_markers() {
        assert_eq!(range("1:30 pm - 2:45 pm"), Some((810, 885)));
        assert_eq!(range("12:00 pm - 1:15 pm"), Some((720, 795)));
        assert_eq!(range("11:45 AM - 1:00 PM"), Some((705, 780)));
        assert_eq!(range("12:15 am - 1:00 am"), Some((15, 60)));
        assert_eq!(range("10:00 a.m. - 11:15 a.m."), Some((600, 675)));
    }

    #[test]
    fn bare_side_inherits_marker_when_it_keeps_order() {
        assert_eq!(range("1:00-2:30 pm"), Some((780, 870)));
        assert_eq!(range("11:00-12:30 pm"), Some((660, 750)));
        assert_eq!(range("1:00 pm - 2:30"), Some((780, 870)));
    }

    #[test]
    fn rejects_garbage_and_backwards_ranges() {
        assert_eq!(range("TBD"), None);
        assert_eq!(range(""), None);
        assert_eq!(range("10:00"), None);
        assert_eq!(range("11:30-10:00"), None);
        assert_eq!(range("25:00-26:00"), None);
        assert_eq!(range("10:75-11:00"), None);
        assert_eq!(range("13:00 pm-14:00 pm"), None);
    }

    #[test]
    fn overlap_is_half_open() {
        let slot = TimeRange::new(630, 720).unwrap();
        assert!(TimeRange::new(600, 690).unwrap().overlaps(&slot));
        assert!(TimeRange::new(540, 780).unwrap().overlaps(&slot));
        assert!(TimeRange::new(640, 700).unwrap().overlaps(&slot));
        assert!(!TimeRange::new(540, 630).unwrap().overlaps(&slot));
        assert!(!TimeRange::new(720, 810).unwrap().overlaps(&slot));
    }

    #[test]
    fn label_is_zero_padded() {
        assert_eq!(TimeRange::parse("8:30-10:00").unwrap().label(), "08:30-10:00");
    }
}
