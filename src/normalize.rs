use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::PipelineError;
use crate::fixture_fetch::RawFixture;

// Candidate upstream kickoff formats, tried in order. The provider emits
// fractional seconds on most endpoints and whole seconds on older ones.
const KICKOFF_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%SZ"];

/// A fixture whose kickoff has been resolved to an instant in the run's
/// configured zone. Built once per raw fixture, never mutated.
#[derive(Debug, Clone)]
pub struct NormalizedFixture {
    pub raw: RawFixture,
    pub kickoff_local: DateTime<Tz>,
}

/// Parses the kickoff string as UTC and projects it into `tz`. The
/// fixture is rejected (not the team) when no candidate format matches.
pub fn normalize_fixture(raw: RawFixture, tz: Tz) -> Result<NormalizedFixture, PipelineError> {
    let Some(utc) = parse_kickoff_utc(&raw.kickoff_utc) else {
        return Err(PipelineError::MalformedTimestamp {
            fixture_id: raw.id.clone(),
            raw: raw.kickoff_utc.clone(),
        });
    };
    let kickoff_local = utc.with_timezone(&tz);
    Ok(NormalizedFixture { raw, kickoff_local })
}

fn parse_kickoff_utc(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in KICKOFF_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}
