use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::config::{GlobalConfig, SmartAlertRule, TeamConfig};

/// Minutes before kickoff at which the prep reminder fires.
///
/// Matches kicking off before the morning cutoff get their prep moment
/// pinned to `night_before_hour:00` local on the previous calendar day,
/// so the stored offset is the elapsed wall-clock gap rather than the
/// configured one. Fractional minutes truncate toward zero.
pub fn prep_trigger_minutes(kickoff: DateTime<Tz>, rule: &SmartAlertRule) -> i64 {
    if kickoff.hour() >= rule.morning_cutoff_hour {
        return i64::from(rule.prep_offset_minutes);
    }
    let Some(prev_day) = kickoff.date_naive().pred_opt() else {
        return i64::from(rule.prep_offset_minutes);
    };
    let Some(night_before) = prev_day.and_hms_opt(rule.night_before_hour, 0, 0) else {
        return i64::from(rule.prep_offset_minutes);
    };
    let prep = resolve_local(kickoff.timezone(), night_before);
    (kickoff - prep).num_minutes().max(0)
}

/// Kickoff plus playing time, halftime, and the post-match buffer.
pub fn match_end(kickoff: DateTime<Tz>, team: &TeamConfig, global: &GlobalConfig) -> DateTime<Tz> {
    kickoff
        + Duration::minutes(i64::from(
            team.duration_minutes + global.halftime_minutes + global.post_match_buffer_minutes,
        ))
}

pub fn arrival_time(kickoff: DateTime<Tz>, team: &TeamConfig) -> DateTime<Tz> {
    kickoff - Duration::minutes(i64::from(team.arrival_offset_minutes))
}

/// `"{ground} - {field}"`, or `"TBA"` when either side is missing or
/// collapses to nothing once stray separators are trimmed.
pub fn location_label(ground: Option<&str>, field: Option<&str>) -> String {
    fn clean(s: Option<&str>) -> Option<&str> {
        s.map(|v| v.trim_matches(|c: char| c.is_whitespace() || c == '-' || c == ','))
            .filter(|v| !v.is_empty())
    }
    match (clean(ground), clean(field)) {
        (Some(ground), Some(field)) => format!("{ground} - {field}"),
        _ => "TBA".to_string(),
    }
}

fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        // Spring-forward gap: this wall-clock moment does not exist, the
        // instant one hour later always does.
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => tz.from_utc_datetime(&naive),
        },
    }
}
