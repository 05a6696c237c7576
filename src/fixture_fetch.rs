use std::collections::HashSet;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::PipelineError;
use crate::http_client::http_client;

const FIXTURES_URL_BASE: &str = "https://api.squadi.com/livescores/matches?competitionId=";

/// One schedule entry as delivered by the upstream provider. Everything
/// except `id` and the kickoff string is optional; bye rounds in
/// particular ship with most fields absent.
#[derive(Debug, Clone)]
pub struct RawFixture {
    pub id: String,
    pub kickoff_utc: String,
    pub bye: bool,
    pub round_label: Option<String>,
    pub ground_name: Option<String>,
    pub field_name: Option<String>,
    pub match_name: Option<String>,
    pub home_logo_url: Option<String>,
    pub away_logo_url: Option<String>,
}

/// Fetches the fixture list for one league. Any transport or decode
/// failure collapses into `FetchUnavailable`; the caller logs it and
/// moves on to the next team.
pub fn fetch_league_fixtures(league_id: &str) -> Result<Vec<RawFixture>, PipelineError> {
    fetch_league_fixtures_inner(league_id).map_err(|source| PipelineError::FetchUnavailable {
        league_id: league_id.to_string(),
        source,
    })
}

fn fetch_league_fixtures_inner(league_id: &str) -> Result<Vec<RawFixture>> {
    let client = http_client()?;
    let base = std::env::var("SQUADCAL_FIXTURES_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| FIXTURES_URL_BASE.to_string());
    let url = format!("{base}{league_id}");
    let resp = client.get(&url).send().context("fixtures request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading fixtures body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_fixtures_json(&body)
}

/// Decodes a provider response body. Tolerates `null` and both observed
/// envelope shapes (`{"matches": [...]}` and a bare array).
pub fn parse_fixtures_json(raw: &str) -> Result<Vec<RawFixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;

    let items = v
        .get("matches")
        .and_then(|x| x.as_array())
        .or_else(|| v.as_array());

    // Dedup by fixture id, keeping first occurrence so document order
    // still follows the upstream feed.
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    if let Some(arr) = items {
        for item in arr {
            if let Some(fixture) = parse_raw_fixture(item)
                && seen.insert(fixture.id.clone())
            {
                out.push(fixture);
            }
        }
    }
    Ok(out)
}

fn parse_raw_fixture(v: &Value) -> Option<RawFixture> {
    let id = pick_string(v, &["id", "matchId"])?;
    let kickoff_utc = pick_string(v, &["startTime", "utcStartTime"]).unwrap_or_default();

    let bye = v
        .get("isBye")
        .or_else(|| v.get("bye"))
        .and_then(|x| x.as_bool())
        .unwrap_or(false);

    let round_label = v
        .get("round")
        .and_then(|r| pick_string(r, &["name"]))
        .or_else(|| pick_string(v, &["roundName"]));

    let ground_name = v
        .get("venueCourt")
        .and_then(|c| c.get("venue"))
        .and_then(|g| pick_string(g, &["name"]))
        .or_else(|| pick_string(v, &["venueName"]));
    let field_name = v
        .get("venueCourt")
        .and_then(|c| pick_string(c, &["name", "courtName"]));

    let match_name = pick_string(v, &["name", "title"]);

    let home_logo_url = team_logo(v.get("team1").or_else(|| v.get("homeTeam")));
    let away_logo_url = team_logo(v.get("team2").or_else(|| v.get("awayTeam")));

    Some(RawFixture {
        id,
        kickoff_utc,
        bye,
        round_label,
        ground_name,
        field_name,
        match_name,
        home_logo_url,
        away_logo_url,
    })
}

fn team_logo(team: Option<&Value>) -> Option<String> {
    let team = team?;
    pick_string(team, &["logoUrl", "crestUrl", "logo"])
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key)
            && let Some(s) = as_string(v)
        {
            return Some(s);
        }
    }
    None
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
