use chrono::Weekday;

/// Monday-first canonical week.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const SEPARATORS: [char; 3] = [',', '，', '、'];

fn japanese_day(c: char) -> Option<Weekday> {
    match c {
        '月' => Some(Weekday::Mon),
        '火' => Some(Weekday::Tue),
        '水' => Some(Weekday::Wed),
        '木' => Some(Weekday::Thu),
        '金' => Some(Weekday::Fri),
        '土' => Some(Weekday::Sat),
        '日' => Some(Weekday::Sun),
        _ => None,
    }
}

/// Short label used for grid headers.
pub fn japanese_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

fn english_day(token: &str) -> Option<Weekday> {
    let lower = token.trim_end_matches('.').to_lowercase();
    let day = match lower.as_str() {
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tues" | "tuesday" => Weekday::Tue,
        "wed" | "weds" | "wednesday" => Weekday::Wed,
        "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// Resolves one token. `月`, `月曜` and `月曜日` are single days; a run of bare
/// day characters such as `月水金` yields each of them.
pub fn parse_day_token(token: &str) -> Vec<Weekday> {
    let token = token.trim();
    if token.is_empty() {
        return Vec::new();
    }
    if let Some(day) = english_day(token) {
        return vec![day];
    }

    let stem = token
        .strip_suffix("曜日")
        .or_else(|| token.strip_suffix('曜'))
        .unwrap_or(token);
    let mut chars = stem.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return japanese_day(first).into_iter().collect();
    }

    let run: Option<Vec<Weekday>> = token.chars().map(japanese_day).collect();
    run.unwrap_or_default()
}

/// Every canonical day a free-text day list names, Monday-first and without
/// duplicates. Unknown tokens contribute nothing.
pub fn parse_days(input: &str) -> Vec<Weekday> {
    let mut hit = [false; 7];
    for token in input.split(SEPARATORS.as_slice()) {
        for day in parse_day_token(token) {
            hit[day.num_days_from_monday() as usize] = true;
        }
    }
    WEEK.iter()
        .copied()
        .filter(|day| hit[day.num_days_from_monday() as usize])
        .collect()
}

/// Accepts the same spellings as course data; used for grid configuration.
pub fn parse_single_day(input: &str) -> Option<Weekday> {
    match parse_day_token(input).as_slice() {
        [day] => Some(*day),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_tokens_are_case_insensitive() {
        assert_eq!(parse_days("mon, WED"), vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(parse_days("Thurs., Fri"), vec![Weekday::Thu, Weekday::Fri]);
    }

    #[test]
    fn japanese_runs_expand() {
        assert_eq!(
            parse_days("月水金"),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert_eq!(parse_days("火曜日、木曜"), vec![Weekday::Tue, Weekday::Thu]);
        assert_eq!(parse_days("月，水"), vec![Weekday::Mon, Weekday::Wed]);
    }

    #[test]
    fn unknown_tokens_are_inert() {
        assert_eq!(parse_days("TBA, Mon"), vec![Weekday::Mon]);
        assert!(parse_days("Monday Wednesday").is_empty());
        assert!(parse_days("").is_empty());
    }

    #[test]
    fn duplicates_collapse_in_week_order() {
        assert_eq!(parse_days("Fri, Mon, fri"), vec![Weekday::Mon, Weekday::Fri]);
    }
}
