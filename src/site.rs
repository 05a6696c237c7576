use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::PipelineError;
use crate::http_client::http_client;

const CALENDARS_PLACEHOLDER: &str = "{{CALENDARS}}";
const LOGO_PLACEHOLDER: &str = "{{LOGO}}";
const DEFAULT_EMBLEM_FILE: &str = "logo.png";

/// Reads the landing-page template; absence is the recoverable
/// `MissingTemplate` condition, not an abort.
pub fn load_template(path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|_| PipelineError::MissingTemplate {
        path: path.to_path_buf(),
    })
}

/// Substitutes the calendar list and logo placeholders. Pure text work,
/// kept separate from the file I/O so it stays testable.
pub fn render_index(template: &str, pages: &[(String, String)], logo_file: Option<&str>) -> String {
    let mut list = String::new();
    for (team, filename) in pages {
        list.push_str(&format!("<li><a href=\"{filename}\">{team}</a></li>\n"));
    }
    template
        .replace(CALENDARS_PLACEHOLDER, list.trim_end())
        .replace(LOGO_PLACEHOLDER, logo_file.unwrap_or(""))
}

/// Downloads the dominant emblem next to the calendar files and returns
/// the filename it was saved under.
pub fn download_emblem(url: &str, output_dir: &Path) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("emblem request failed")?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {status} fetching emblem"));
    }
    let bytes = resp.bytes().context("failed reading emblem body")?;
    let filename = emblem_filename(url);
    fs::write(output_dir.join(&filename), &bytes).context("failed writing emblem file")?;
    Ok(filename)
}

fn emblem_filename(url: &str) -> String {
    url.rsplit('/')
        .next()
        .map(|s| s.split('?').next().unwrap_or(s))
        .filter(|s| !s.is_empty() && s.contains('.'))
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_EMBLEM_FILE.to_string())
}
