use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use squadcal::calendar::render_calendar;
use squadcal::config::load_config;
use squadcal::emblems::EmblemTally;
use squadcal::fixture_fetch::fetch_league_fixtures;
use squadcal::pipeline::{calendar_filename, run_teams};
use squadcal::site;

fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path =
        std::env::var("SQUADCAL_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config = load_config(Path::new(&config_path))?;
    let tz = config.global.tz()?;

    let output_dir = Path::new(&config.global.output_dir);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;

    let mut tally = EmblemTally::default();
    let mut pages: Vec<(String, String)> = Vec::new();

    let processed = run_teams(
        &config.teams,
        &config.global,
        tz,
        fetch_league_fixtures,
        &mut tally,
    );

    for (team_name, events) in processed {
        let document = render_calendar(&team_name, tz, &events);
        let filename = calendar_filename(&team_name);
        let path = output_dir.join(&filename);
        if let Err(err) = fs::write(&path, document) {
            eprintln!("[WARN] {team_name}: failed writing {}: {err}", path.display());
            continue;
        }
        println!(
            "[INFO] {team_name}: wrote {} ({} events)",
            path.display(),
            events.len()
        );
        pages.push((team_name, filename));
    }

    let logo_file = match tally.dominant() {
        Some(url) => match site::download_emblem(url, output_dir) {
            Ok(filename) => {
                println!("[INFO] saved dominant emblem {filename}");
                Some(filename)
            }
            Err(err) => {
                eprintln!("[WARN] emblem download failed: {err:#}, logo skipped");
                None
            }
        },
        None => {
            println!("[INFO] no emblem urls observed this run, logo skipped");
            None
        }
    };

    match site::load_template(Path::new(&config.global.template_path)) {
        Ok(template) => {
            let html = site::render_index(&template, &pages, logo_file.as_deref());
            let index_path = output_dir.join("index.html");
            fs::write(&index_path, html)
                .with_context(|| format!("failed writing {}", index_path.display()))?;
            println!("[INFO] wrote {}", index_path.display());
        }
        Err(err) => eprintln!("[WARN] {err}, landing page skipped"),
    }

    Ok(())
}
