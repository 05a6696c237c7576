use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::classify::{ByeEvent, CalendarEvent, MatchEvent};

const PRODID: &str = "-//squadcal//Fixture Calendar//EN";
const PUBLISH_TTL: &str = "PT12H";

/// Renders one team's calendar document. Events appear in the order they
/// were classified; the output carries no generation timestamp, so the
/// same inputs always produce a byte-identical document.
pub fn render_calendar(team_name: &str, tz: Tz, events: &[CalendarEvent]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("BEGIN:VCALENDAR".to_string());
    lines.push("VERSION:2.0".to_string());
    lines.push(format!("PRODID:{PRODID}"));
    lines.push("CALSCALE:GREGORIAN".to_string());
    lines.push("METHOD:PUBLISH".to_string());
    lines.push(format!(
        "X-WR-CALNAME:{}",
        escape_text(&format!("{team_name} Fixtures"))
    ));
    lines.push(format!("X-WR-TIMEZONE:{}", tz.name()));
    lines.push(format!("X-PUBLISHED-TTL:{PUBLISH_TTL}"));

    for event in events {
        match event {
            CalendarEvent::Match(m) => push_match_event(&mut lines, tz, m),
            CalendarEvent::Bye(b) => push_bye_event(&mut lines, b),
        }
    }

    lines.push("END:VCALENDAR".to_string());
    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

fn push_match_event(lines: &mut Vec<String>, tz: Tz, event: &MatchEvent) {
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}", event.uid));
    lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
    // No VTIMEZONE component is emitted; the targeted mobile clients
    // resolve Olson TZIDs on their own.
    lines.push(format!("DTSTART;TZID={}:{}", tz.name(), local_stamp(event.start)));
    lines.push(format!("DTEND;TZID={}:{}", tz.name(), local_stamp(event.end)));
    lines.push(format!("LOCATION:{}", escape_text(&event.location)));
    lines.push(format!("DESCRIPTION:{}", escape_text(&description(event))));

    push_alarm(
        lines,
        event.prep_trigger_minutes,
        &format!("Get ready for {}", event.title),
    );
    push_alarm(
        lines,
        event.arrival_trigger_minutes,
        &format!("Leave for {}", event.title),
    );

    lines.push("END:VEVENT".to_string());
}

fn push_bye_event(lines: &mut Vec<String>, event: &ByeEvent) {
    let summary = match event.round_label.as_deref() {
        Some(label) => format!("BYE ({label})"),
        None => "BYE".to_string(),
    };
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}", event.uid));
    lines.push(format!("SUMMARY:{}", escape_text(&summary)));
    lines.push(format!("DTSTART;VALUE=DATE:{}", date_stamp(event.date)));
    // All-day: exclusive end on the following calendar day.
    lines.push(format!(
        "DTEND;VALUE=DATE:{}",
        date_stamp(event.date + Duration::days(1))
    ));
    lines.push("END:VEVENT".to_string());
}

fn push_alarm(lines: &mut Vec<String>, trigger_minutes: i64, message: &str) {
    lines.push("BEGIN:VALARM".to_string());
    lines.push("ACTION:DISPLAY".to_string());
    lines.push(format!("DESCRIPTION:{}", escape_text(message)));
    lines.push(format!("TRIGGER:-PT{trigger_minutes}M"));
    lines.push("END:VALARM".to_string());
}

fn description(event: &MatchEvent) -> String {
    let arrive = format!("Arrive by {}", event.arrival_time.format("%H:%M"));
    match event.round_label.as_deref() {
        Some(label) => format!("{label}\n{arrive}"),
        None => arrive,
    }
}

fn local_stamp(dt: DateTime<Tz>) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// RFC 5545 text escaping. Line breaks become the literal `\n` sequence
/// so free-form upstream text cannot break block boundaries.
fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_structural_characters() {
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
    }

    #[test]
    fn line_breaks_become_literal_sequences() {
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
    }

    #[test]
    fn bye_block_spans_exactly_one_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).expect("valid date");
        let bye = ByeEvent {
            uid: "bye-9@squadcal".to_string(),
            date,
            round_label: Some("Round 7".to_string()),
        };
        let mut lines = Vec::new();
        push_bye_event(&mut lines, &bye);
        assert!(lines.contains(&"DTSTART;VALUE=DATE:20240504".to_string()));
        assert!(lines.contains(&"DTEND;VALUE=DATE:20240505".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("BEGIN:VALARM")));
    }
}
