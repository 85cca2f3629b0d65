use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ReplayConfig;
use crate::model::LapRecord;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no session file found for {season} {event} ({session}); looked for {file_name}")]
    NotFound {
        season: u32,
        event: String,
        session: String,
        file_name: String,
    },
}

/// Complete lap record set for one session, loaded once and never mutated.
#[derive(Debug)]
pub struct SessionData {
    pub laps: Vec<LapRecord>,
}

impl SessionData {
    /// Load the session named by the config from its materialized JSON file.
    ///
    /// Fetching from a live timing service is out of scope here; the file
    /// must already exist under the data directory.
    pub fn load(cfg: &ReplayConfig) -> Result<Self> {
        let file_name = session_file_name(cfg.season, &cfg.event, &cfg.session);
        let path = resolve_session_path(&cfg.data_dir, &file_name).ok_or_else(|| {
            SessionError::NotFound {
                season: cfg.season,
                event: cfg.event.clone(),
                session: cfg.session.clone(),
                file_name: file_name.clone(),
            }
        })?;

        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read session file {}", path.display()))?;
        let laps: Vec<LapRecord> = serde_json::from_str(&data)
            .with_context(|| format!("invalid session JSON in {}", path.display()))?;

        tracing::info!(
            "loaded {} lap records from {}",
            laps.len(),
            path.display()
        );
        Ok(Self { laps })
    }
}

/// `2024_bahrain_grand_prix_R.json` for (2024, "Bahrain Grand Prix", "R").
fn session_file_name(season: u32, event: &str, session: &str) -> String {
    let slug: String = event
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}_{}.json", season, slug, session)
}

/// Try the data dir relative to the CWD first, then next to the executable.
fn resolve_session_path(data_dir: &str, file_name: &str) -> Option<PathBuf> {
    let mut candidates = vec![
        PathBuf::from(data_dir).join(file_name),
        PathBuf::from(".").join(data_dir).join(file_name),
    ];
    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop(); // exe dir
        candidates.push(exe.join(data_dir).join(file_name));
    }

    candidates.into_iter().find(|c| c.exists())
}
