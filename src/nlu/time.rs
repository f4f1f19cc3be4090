//! Shared time-reference extraction
//!
//! Recognizes day words (today, tomorrow, weekday names, next week), clock
//! times ("3pm", "3:30 pm", "15:30") and urgency flags. All date resolution
//! goes through the injected [`Clock`] so "tomorrow" is reproducible.
//!
//! Expects lower-cased input; matchers lower-case before calling.

use crate::core::clock::Clock;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

/// Extracted scheduling information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeReference {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub urgent: bool,
}

impl TimeReference {
    pub fn has_reference(&self) -> bool {
        self.date.is_some() || self.time.is_some() || self.urgent
    }
}

const URGENT_PHRASES: [&str; 4] = ["urgent", "asap", "immediately", "right away"];

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Scan the input for day words, clock times and urgency flags
pub fn extract_time_reference(input: &str, clock: &dyn Clock) -> TimeReference {
    let today = clock.today();
    let mut reference = TimeReference {
        urgent: URGENT_PHRASES.iter().any(|p| input.contains(p)),
        ..TimeReference::default()
    };

    let tokens: Vec<&str> = input.split_whitespace().collect();
    for (i, raw_token) in tokens.iter().enumerate() {
        let token = raw_token.trim_matches(|c| c == ',' || c == '.');

        if token == "today" || token == "tonight" {
            reference.date.get_or_insert(today);
        } else if token == "tomorrow" {
            reference.date.get_or_insert(today + Duration::days(1));
        } else if token == "week"
            && i > 0
            && tokens[i - 1].trim_matches(|c| c == ',' || c == '.') == "next"
        {
            reference.date.get_or_insert(today + Duration::days(7));
        } else if let Some(&(_, weekday)) = WEEKDAYS.iter().find(|(name, _)| *name == token) {
            reference.date.get_or_insert(next_weekday(today, weekday));
        } else if let Some(time) = parse_clock_time(token, tokens.get(i + 1).copied()) {
            reference.time.get_or_insert(time);
        }
    }

    reference
}

/// Parse one token (plus an optional following "am"/"pm" token) as a clock time
///
/// Accepts "3pm", "3:30pm", "3:30 pm", "15:30". Bare hours without a meridiem
/// are not accepted here; the appointment matcher has its own policy for those.
pub fn parse_clock_time(token: &str, next: Option<&str>) -> Option<NaiveTime> {
    let token = token.trim_matches(|c| c == ',' || c == '.');

    // "3pm" / "3:30pm"
    for (suffix, pm) in [("am", false), ("pm", true)] {
        if let Some(stem) = token.strip_suffix(suffix) {
            return hour_minute(stem).and_then(|(h, m)| twelve_hour(h, m, pm));
        }
    }

    // "3 pm" / "3:30 pm"
    if let Some(next) = next.map(|n| n.trim_matches(|c| c == ',' || c == '.')) {
        if next == "am" || next == "pm" {
            return hour_minute(token).and_then(|(h, m)| twelve_hour(h, m, next == "pm"));
        }
    }

    // 24-hour "15:30"
    if token.contains(':') {
        if let Some((h, m)) = hour_minute(token) {
            return NaiveTime::from_hms_opt(h, m, 0);
        }
    }

    None
}

/// Split "3" or "3:30" into (hour, minute)
fn hour_minute(stem: &str) -> Option<(u32, u32)> {
    if stem.is_empty() {
        return None;
    }
    match stem.split_once(':') {
        Some((h, m)) => Some((h.parse().ok()?, m.parse().ok()?)),
        None => Some((stem.parse().ok()?, 0)),
    }
}

fn twelve_hour(hour: u32, minute: u32, pm: bool) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// Next occurrence of `weekday` strictly after `today`
pub fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    today + Duration::days(ahead as i64)
}

/// Remove schedule words from a title fragment
///
/// Drops day words, "next week"/"this week", clock-time tokens, standalone
/// meridiems, urgency words, and an "at"/"on"/"by" left dangling before a
/// removed time or day.
pub fn strip_time_words(input: &str) -> String {
    const DAY_WORDS: [&str; 10] = [
        "today",
        "tonight",
        "tomorrow",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    const LONE_WORDS: [&str; 5] = ["am", "pm", "urgent", "asap", "immediately"];

    let tokens: Vec<&str> = input.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].trim_matches(|c| c == ',' || c == '.');
        let next = tokens.get(i + 1).copied();

        let next_is_dropped = |t: Option<&str>| {
            t.map(|t| {
                let t = t.trim_matches(|c| c == ',' || c == '.');
                DAY_WORDS.contains(&t)
                    || parse_clock_time(t, None).is_some()
                    || t.chars().all(|c| c.is_ascii_digit())
            })
            .unwrap_or(false)
        };

        if DAY_WORDS.contains(&token) || LONE_WORDS.contains(&token) {
            i += 1;
            continue;
        }
        if (token == "next" || token == "this")
            && next.map(|n| n.trim_matches(',') == "week").unwrap_or(false)
        {
            i += 2;
            continue;
        }
        if (token == "at" || token == "on" || token == "by") && next_is_dropped(next) {
            i += 1;
            continue;
        }
        if parse_clock_time(token, next).is_some() {
            // consume a following standalone meridiem as well
            if next
                .map(|n| {
                    let n = n.trim_matches(|c| c == ',' || c == '.');
                    n == "am" || n == "pm"
                })
                .unwrap_or(false)
            {
                i += 1;
            }
            i += 1;
            continue;
        }
        if token.chars().all(|c| c.is_ascii_digit()) && !token.is_empty() {
            // bare trailing number from "at 3"
            i += 1;
            continue;
        }

        kept.push(tokens[i]);
        i += 1;
    }

    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;

    fn clock() -> FixedClock {
        // a Friday
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_tomorrow_resolves_against_clock() {
        let r = extract_time_reference("clean the bathroom tomorrow", &clock());
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(r.time, None);
        assert!(!r.urgent);
    }

    #[test]
    fn test_weekday_resolves_to_next_occurrence() {
        let r = extract_time_reference("dentist monday", &clock());
        // 2024-03-01 is a Friday; next Monday is the 4th
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[test]
    fn test_same_weekday_jumps_a_full_week() {
        let r = extract_time_reference("laundry friday", &clock());
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 8));
    }

    #[test]
    fn test_next_week() {
        let r = extract_time_reference("plan meals next week", &clock());
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 8));
    }

    #[test]
    fn test_clock_times() {
        assert_eq!(
            parse_clock_time("3pm", None),
            NaiveTime::from_hms_opt(15, 0, 0)
        );
        assert_eq!(
            parse_clock_time("3:30pm", None),
            NaiveTime::from_hms_opt(15, 30, 0)
        );
        assert_eq!(
            parse_clock_time("3:30", Some("pm")),
            NaiveTime::from_hms_opt(15, 30, 0)
        );
        assert_eq!(
            parse_clock_time("15:30", None),
            NaiveTime::from_hms_opt(15, 30, 0)
        );
        assert_eq!(
            parse_clock_time("12am", None),
            NaiveTime::from_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_clock_time("3", None), None);
        assert_eq!(parse_clock_time("13pm", None), None);
    }

    #[test]
    fn test_urgency_flag() {
        let r = extract_time_reference("fix the leak asap", &clock());
        assert!(r.urgent);
        assert!(r.has_reference());
    }

    #[test]
    fn test_strip_time_words() {
        assert_eq!(strip_time_words("call the plumber tomorrow"), "call the plumber");
        assert_eq!(strip_time_words("dentist at 3:30 pm"), "dentist");
        assert_eq!(strip_time_words("soccer practice on monday"), "soccer practice");
        assert_eq!(strip_time_words("pay rent by friday"), "pay rent");
    }
}
