use std::path::PathBuf;

use thiserror::Error;

/// Recoverable conditions raised inside the conversion pipeline. None of
/// these abort the run; each is logged at the boundary it crosses and the
/// run continues with whatever remains.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Kickoff string matched none of the accepted upstream formats.
    /// Skips the fixture, never the team.
    #[error("malformed kickoff timestamp {raw:?} on fixture {fixture_id}")]
    MalformedTimestamp { fixture_id: String, raw: String },

    /// Upstream fetch or decode failed for one league. Skips the team.
    #[error("fixtures unavailable for league {league_id}")]
    FetchUnavailable {
        league_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Landing-page template file is absent. Skips the landing page.
    #[error("landing page template missing at {}", path.display())]
    MissingTemplate { path: PathBuf },

    /// No emblem URL was observed during the whole run. Skips the logo.
    #[error("no emblem urls observed this run")]
    EmptyAssetTally,
}
