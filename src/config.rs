use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use serde::Deserialize;

/// Governs the "prep" reminder. Matches kicking off before
/// `morning_cutoff_hour` get their prep moment pinned to
/// `night_before_hour:00` on the previous calendar day instead of a
/// same-morning offset.
#[derive(Debug, Clone, Deserialize)]
pub struct SmartAlertRule {
    pub morning_cutoff_hour: u32,
    pub night_before_hour: u32,
    pub prep_offset_minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub league_id: String,
    pub duration_minutes: u32,
    pub arrival_offset_minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub halftime_minutes: u32,
    pub post_match_buffer_minutes: u32,
    pub smart_alert: SmartAlertRule,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_template_path")]
    pub template_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub global: GlobalConfig,
    pub teams: Vec<TeamConfig>,
}

fn default_timezone() -> String {
    "Australia/Melbourne".to_string()
}

fn default_output_dir() -> String {
    "site".to_string()
}

fn default_template_path() -> String {
    "templates/index.html".to_string()
}

impl GlobalConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| anyhow!("unknown timezone {:?}", self.timezone))
    }
}

/// Loads and decodes the run configuration. Any failure here is
/// startup-fatal; the pipeline never sees a partially valid config.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<AppConfig> {
    let config: AppConfig = serde_json::from_str(raw).context("malformed config json")?;
    if config.teams.is_empty() {
        return Err(anyhow!("config lists no teams"));
    }
    config.global.tz()?;
    let rule = &config.global.smart_alert;
    if rule.morning_cutoff_hour > 23 {
        return Err(anyhow!(
            "morning_cutoff_hour {} out of range 0-23",
            rule.morning_cutoff_hour
        ));
    }
    if rule.night_before_hour > 23 {
        return Err(anyhow!(
            "night_before_hour {} out of range 0-23",
            rule.night_before_hour
        ));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config_json() -> &'static str {
        r#"{
            "global": {
                "halftime_minutes": 5,
                "post_match_buffer_minutes": 10,
                "smart_alert": {
                    "morning_cutoff_hour": 9,
                    "night_before_hour": 20,
                    "prep_offset_minutes": 240
                }
            },
            "teams": [
                {
                    "name": "Northern Hawks",
                    "league_id": "L100",
                    "duration_minutes": 60,
                    "arrival_offset_minutes": 30
                }
            ]
        }"#
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config: AppConfig = serde_json::from_str(minimal_config_json()).expect("valid config");
        assert_eq!(config.global.timezone, "Australia/Melbourne");
        assert_eq!(config.global.output_dir, "site");
        assert_eq!(config.global.template_path, "templates/index.html");
        assert!(config.global.tz().is_ok());
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let mut config: AppConfig =
            serde_json::from_str(minimal_config_json()).expect("valid config");
        config.global.timezone = "Mars/Olympus_Mons".to_string();
        assert!(config.global.tz().is_err());
    }

    #[test]
    fn minimal_config_passes_validation() {
        assert!(parse_config(minimal_config_json()).is_ok());
    }

    #[test]
    fn out_of_range_alert_hours_are_startup_fatal() {
        let cutoff_99 = minimal_config_json().replace(
            "\"morning_cutoff_hour\": 9",
            "\"morning_cutoff_hour\": 99",
        );
        assert!(parse_config(&cutoff_99).is_err());

        let night_77 = minimal_config_json().replace(
            "\"night_before_hour\": 20",
            "\"night_before_hour\": 77",
        );
        assert!(parse_config(&night_77).is_err());
    }
}
