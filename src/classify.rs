use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::config::{GlobalConfig, TeamConfig};
use crate::emblems::EmblemTally;
use crate::normalize::NormalizedFixture;
use crate::schedule;

const UID_DOMAIN: &str = "squadcal";

/// All-day marker for a round with no opponent.
#[derive(Debug, Clone)]
pub struct ByeEvent {
    pub uid: String,
    pub date: NaiveDate,
    pub round_label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MatchEvent {
    pub uid: String,
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub location: String,
    pub arrival_time: DateTime<Tz>,
    pub prep_trigger_minutes: i64,
    pub arrival_trigger_minutes: i64,
    pub round_label: Option<String>,
}

/// Exactly one variant per fixture.
#[derive(Debug, Clone)]
pub enum CalendarEvent {
    Bye(ByeEvent),
    Match(MatchEvent),
}

/// Turns a normalized fixture into its calendar event. Emblem URLs are
/// recorded before the bye/match branch so bye rounds count too; the bye
/// check runs before any optional match field is touched, since byes
/// routinely omit venue and duration data.
pub fn classify_fixture(
    fixture: &NormalizedFixture,
    team: &TeamConfig,
    global: &GlobalConfig,
    tally: &mut EmblemTally,
) -> CalendarEvent {
    for url in [&fixture.raw.home_logo_url, &fixture.raw.away_logo_url]
        .into_iter()
        .flatten()
    {
        tally.record(url);
    }

    if fixture.raw.bye {
        return CalendarEvent::Bye(ByeEvent {
            // Distinguishing prefix keeps the uid from colliding with a
            // timed event that shares the fixture id.
            uid: format!("bye-{}@{UID_DOMAIN}", fixture.raw.id),
            date: fixture.kickoff_local.date_naive(),
            round_label: fixture.raw.round_label.clone(),
        });
    }

    let kickoff = fixture.kickoff_local;
    let title = fixture
        .raw
        .match_name
        .clone()
        .unwrap_or_else(|| format!("{} fixture", team.name));

    CalendarEvent::Match(MatchEvent {
        uid: format!("{}@{UID_DOMAIN}", fixture.raw.id),
        title,
        start: kickoff,
        end: schedule::match_end(kickoff, team, global),
        location: schedule::location_label(
            fixture.raw.ground_name.as_deref(),
            fixture.raw.field_name.as_deref(),
        ),
        arrival_time: schedule::arrival_time(kickoff, team),
        prep_trigger_minutes: schedule::prep_trigger_minutes(kickoff, &global.smart_alert),
        arrival_trigger_minutes: i64::from(team.arrival_offset_minutes),
        round_label: fixture.raw.round_label.clone(),
    })
}
