use chrono_tz::Tz;

use crate::classify::{CalendarEvent, classify_fixture};
use crate::config::{GlobalConfig, TeamConfig};
use crate::emblems::EmblemTally;
use crate::error::PipelineError;
use crate::fixture_fetch::RawFixture;
use crate::normalize::normalize_fixture;

/// Runs the fetch-and-convert step for every configured team in order.
/// A failed fetch skips that team with one warning line and the run
/// moves on; successfully fetched teams come back as (name, events)
/// pairs ready for rendering. The fetch is injected so the skip path
/// stays testable without a network.
pub fn run_teams<F>(
    teams: &[TeamConfig],
    global: &GlobalConfig,
    tz: Tz,
    mut fetch: F,
    tally: &mut EmblemTally,
) -> Vec<(String, Vec<CalendarEvent>)>
where
    F: FnMut(&str) -> Result<Vec<RawFixture>, PipelineError>,
{
    let mut out = Vec::new();
    for team in teams {
        let fixtures = match fetch(&team.league_id) {
            Ok(fixtures) => fixtures,
            Err(err) => {
                eprintln!("[WARN] {}: {err}, team skipped", team.name);
                continue;
            }
        };
        let events = team_events(team, global, tz, fixtures, tally);
        out.push((team.name.clone(), events));
    }
    out
}

/// Converts one team's fetched fixtures into ordered calendar events.
/// A malformed kickoff drops only that fixture; the warning line names
/// the team and the condition so partial output stays diagnosable.
pub fn team_events(
    team: &TeamConfig,
    global: &GlobalConfig,
    tz: Tz,
    fixtures: Vec<RawFixture>,
    tally: &mut EmblemTally,
) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(fixtures.len());
    for raw in fixtures {
        let fixture = match normalize_fixture(raw, tz) {
            Ok(fixture) => fixture,
            Err(err) => {
                eprintln!("[WARN] {}: {err}, fixture skipped", team.name);
                continue;
            }
        };
        events.push(classify_fixture(&fixture, team, global, tally));
    }
    events
}

/// Deterministic output filename for one team's calendar.
pub fn calendar_filename(team_name: &str) -> String {
    format!("{}.ics", team_name.trim().to_lowercase().replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmartAlertRule;

    fn team(name: &str, league_id: &str) -> TeamConfig {
        TeamConfig {
            name: name.to_string(),
            league_id: league_id.to_string(),
            duration_minutes: 60,
            arrival_offset_minutes: 30,
        }
    }

    fn global() -> GlobalConfig {
        GlobalConfig {
            timezone: "Australia/Melbourne".to_string(),
            halftime_minutes: 5,
            post_match_buffer_minutes: 10,
            smart_alert: SmartAlertRule {
                morning_cutoff_hour: 9,
                night_before_hour: 20,
                prep_offset_minutes: 240,
            },
            output_dir: "site".to_string(),
            template_path: "templates/index.html".to_string(),
        }
    }

    fn fixture(id: &str) -> RawFixture {
        RawFixture {
            id: id.to_string(),
            kickoff_utc: "2024-05-03T23:30:00Z".to_string(),
            bye: false,
            round_label: None,
            ground_name: None,
            field_name: None,
            match_name: None,
            home_logo_url: None,
            away_logo_url: None,
        }
    }

    #[test]
    fn filenames_are_lowercase_with_underscores() {
        assert_eq!(calendar_filename("Northern Hawks"), "northern_hawks.ics");
        assert_eq!(calendar_filename("  Eagles "), "eagles.ics");
    }

    #[test]
    fn failed_fetch_skips_only_that_team() {
        let tz = "Australia/Melbourne".parse().expect("known zone");
        let teams = vec![team("Northern Hawks", "L100"), team("Coastal Eagles", "L200")];
        let mut tally = EmblemTally::default();

        let processed = run_teams(
            &teams,
            &global(),
            tz,
            |league_id| {
                if league_id == "L100" {
                    Err(PipelineError::FetchUnavailable {
                        league_id: league_id.to_string(),
                        source: anyhow::anyhow!("connection refused"),
                    })
                } else {
                    Ok(vec![fixture("42")])
                }
            },
            &mut tally,
        );

        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].0, "Coastal Eagles");
        assert_eq!(processed[0].1.len(), 1);
    }

    #[test]
    fn teams_come_back_in_configured_order() {
        let tz = "Australia/Melbourne".parse().expect("known zone");
        let teams = vec![team("Northern Hawks", "L100"), team("Coastal Eagles", "L200")];
        let mut tally = EmblemTally::default();

        let processed = run_teams(&teams, &global(), tz, |_| Ok(vec![fixture("7")]), &mut tally);

        assert_eq!(processed.len(), 2);
        assert_eq!(processed[0].0, "Northern Hawks");
        assert_eq!(processed[1].0, "Coastal Eagles");
    }
}
