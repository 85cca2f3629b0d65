use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

fn default_season() -> u32 {
    2024
}
fn default_event() -> String {
    "Bahrain Grand Prix".to_string()
}
fn default_session() -> String {
    "R".to_string()
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_lap_interval_s() -> f64 {
    1.5
}

#[derive(Deserialize, Debug, Clone)]
pub struct ReplayConfig {
    #[serde(default = "default_season")]
    pub season: u32,
    #[serde(default = "default_event")]
    pub event: String,
    /// Session identifier, e.g. "R" for the race.
    #[serde(default = "default_session")]
    pub session: String,
    /// Directory holding materialized session files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Pause between lap snapshots during playback.
    #[serde(default = "default_lap_interval_s")]
    pub lap_interval_s: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            season: default_season(),
            event: default_event(),
            session: default_session(),
            data_dir: default_data_dir(),
            lap_interval_s: default_lap_interval_s(),
        }
    }
}

impl ReplayConfig {
    pub fn load(path: &str) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("failed to read config at {}", path))?;
        serde_json::from_str(&data).with_context(|| format!("invalid config JSON at {}", path))
    }

    /// Config from `CONFIG_PATH` if set and readable, defaults otherwise.
    /// Per-field env overrides follow for the knobs worth flipping on the
    /// command line.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::load(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(season) = std::env::var("SEASON") {
            cfg.season = season
                .parse()
                .with_context(|| format!("SEASON is not a year: {}", season))?;
        }
        if let Ok(event) = std::env::var("EVENT") {
            cfg.event = event;
        }
        if let Ok(session) = std::env::var("SESSION") {
            cfg.session = session;
        }
        if let Some(interval) = std::env::var("LAP_INTERVAL_S")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            cfg.lap_interval_s = interval;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ReplayConfig::default();
        assert_eq!(cfg.season, 2024);
        assert_eq!(cfg.event, "Bahrain Grand Prix");
        assert_eq!(cfg.session, "R");
        assert_eq!(cfg.lap_interval_s, 1.5);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: ReplayConfig = serde_json::from_str(r#"{ "season": 2023 }"#).unwrap();
        assert_eq!(cfg.season, 2023);
        assert_eq!(cfg.session, "R");
    }
}
