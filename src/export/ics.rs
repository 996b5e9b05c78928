//! iCalendar (RFC 5545) rendering of assigned sessions.
//!
//! Times are written as local wall-clock times with `TZID=Europe/Berlin`;
//! the document embeds a static VTIMEZONE with the EU daylight-saving
//! rules so that the local times are unambiguous for calendar clients.

use crate::models::Session;
use chrono::{DateTime, NaiveDateTime, Utc};

pub const TIMEZONE: &str = "Europe/Berlin";
pub const CONTENT_TYPE: &str = "text/calendar";
pub const PRODID: &str = "-//Training Planner//DE";
pub const UNKNOWN_TRAINER: &str = "Unknown";

const UID_DOMAIN: &str = "training-planner";
const MAX_LINE_OCTETS: usize = 75;

const VTIMEZONE: &[&str] = &[
    "BEGIN:VTIMEZONE",
    "TZID:Europe/Berlin",
    "BEGIN:DAYLIGHT",
    "TZOFFSETFROM:+0100",
    "TZOFFSETTO:+0200",
    "TZNAME:CEST",
    "DTSTART:19700329T020000",
    "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU",
    "END:DAYLIGHT",
    "BEGIN:STANDARD",
    "TZOFFSETFROM:+0200",
    "TZOFFSETTO:+0100",
    "TZNAME:CET",
    "DTSTART:19701025T030000",
    "RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU",
    "END:STANDARD",
    "END:VTIMEZONE",
];

/// Suggested download name, e.g. `training_plan_2024_4.ics`.
pub fn file_name(year: i32, month: u32) -> String {
    format!("training_plan_{year}_{month}.ics")
}

/// Escape a TEXT value: backslash, comma and semicolon get a leading
/// backslash, newlines become the two characters `\n`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push_str("\\n");
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Fold a content line into chunks of at most 75 octets; continuation
/// lines start with a single space. Never splits a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;
    for c in line.chars() {
        let w = c.len_utf8();
        // continuation lines lose one octet to the leading space
        if used + w > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            used = 1;
        }
        out.push(c);
        used += w;
    }
    out
}

fn local_stamp(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Render a full VCALENDAR document for `sessions`. Unassigned sessions are
/// skipped. `names` resolves trainer ids to display names.
pub fn render_calendar<F>(
    sessions: &[Session],
    names: F,
    calendar_name: Option<&str>,
    dtstamp: DateTime<Utc>,
) -> String
where
    F: Fn(i64) -> Option<String>,
{
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".into(),
        "VERSION:2.0".into(),
        format!("PRODID:{PRODID}"),
        "METHOD:PUBLISH".into(),
        "CALSCALE:GREGORIAN".into(),
    ];
    if let Some(name) = calendar_name.filter(|n| !n.is_empty()) {
        lines.push(format!("X-WR-CALNAME:{}", escape_text(name)));
        lines.push(format!("X-WR-TIMEZONE:{TIMEZONE}"));
    }
    lines.extend(VTIMEZONE.iter().map(|l| l.to_string()));

    let stamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();

    for s in sessions {
        let Some(trainer_id) = s.assigned_trainer_id else {
            continue;
        };
        let trainer = names(trainer_id).unwrap_or_else(|| UNKNOWN_TRAINER.to_string());

        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}-{}@{UID_DOMAIN}", s.id, s.date_str()));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("DTSTART;TZID={TIMEZONE}:{}", local_stamp(s.start())));
        lines.push(format!("DTEND;TZID={TIMEZONE}:{}", local_stamp(s.end())));
        lines.push(format!("SUMMARY:{}", escape_text(&format!("Training: {trainer}"))));
        lines.push(format!("DESCRIPTION:{}", escape_text(&format!("Thema: {}", s.topic))));
        lines.push(format!("LOCATION:{}", escape_text(&s.location)));
        lines.push("STATUS:CONFIRMED".into());
        lines.push("END:VEVENT".into());
    }

    lines.push("END:VCALENDAR".into());

    let mut doc = lines
        .iter()
        .map(|l| fold_line(l))
        .collect::<Vec<_>>()
        .join("\r\n");
    doc.push_str("\r\n");
    doc
}
