//! Reply text for completed requests.
//!
//! Everything here is pure: records in, text out. Ordering is whatever the
//! catalog returned; nothing is re-sorted.

use chrono::NaiveTime;
use lecture_bot_core::{Lecture, Resource};

/// Rule printed around each lecture and week heading.
const RULE: &str = "==================================================";

/// Renders a 24-hour `HH:MM:SS` time as `HH:MM AM/PM`.
///
/// Anything that does not parse is returned unchanged.
#[must_use]
pub fn format_time(raw: &str) -> String {
    match NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        Ok(time) => time.format("%I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Formats a day's lectures, or the free-day message when there are none.
#[must_use]
pub fn lectures(lectures: &[Lecture], day_name: &str) -> String {
    let day = capitalize(day_name);
    if lectures.is_empty() {
        return format!(
            "You don't have any lectures scheduled for {day}. 📅\n\nEnjoy your free day! 🎉"
        );
    }

    let mut out = format!("Here are your lectures for {day}:\n\n");
    for (idx, lecture) in lectures.iter().enumerate() {
        out.push_str(&format!(
            "{RULE}\nLECTURE {}: {} ({})\nTime: {} - {}\nVenue: {}\nTopic: {}\n{RULE}\n\n",
            idx + 1,
            lecture.title,
            lecture.course_code,
            format_time(&lecture.start_time),
            format_time(&lecture.end_time),
            lecture.venue.as_deref().unwrap_or_default(),
            lecture.topic.as_deref().unwrap_or_default(),
        ));
    }
    out.trim().to_string()
}

/// Formats course resources, starting a new week heading whenever the week
/// number differs from the previous row.
#[must_use]
pub fn resources(resources: &[Resource], course_name: &str, week_number: Option<i32>) -> String {
    if resources.is_empty() {
        return match week_number {
            Some(week) => format!(
                "Sorry, I couldn't find any resources for {course_name} - Week {week}. 📚"
            ),
            None => format!("Sorry, I couldn't find any resources for {course_name}. 📚"),
        };
    }

    let mut out = match week_number {
        Some(week) => format!("Here are the resources for {course_name} - Week {week}:\n\n"),
        None => format!("Here are all the resources for {course_name}:\n\n"),
    };
    let mut current_week = None;
    for resource in resources {
        if current_week != Some(resource.week_number) {
            current_week = Some(resource.week_number);
            out.push_str(&format!("\n{RULE}\nWEEK {}\n{RULE}\n", resource.week_number));
        }
        out.push_str(&format!(
            "{}\n{}\n\n",
            resource.display_title(),
            resource.resource_url
        ));
    }
    out.trim().to_string()
}
