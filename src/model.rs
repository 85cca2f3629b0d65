use serde::{Deserialize, Serialize};

/// One driver's timing entry for one lap, as loaded from the session file.
///
/// `lap_time_s` and `time_s` may be missing in the raw data (lap not
/// completed, or the feed dropped the sample); they stay `None` rather than
/// zero so that "unknown" never collides with a real value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapRecord {
    pub driver: String,
    pub lap: u32,
    /// Rank at the end of this lap, 1 = leading. Unique within a lap.
    pub position: u32,
    /// Tyre compound label, e.g. "SOFT", "MEDIUM", "HARD".
    pub compound: String,
    /// Lap time in seconds, if the lap was completed.
    pub lap_time_s: Option<f64>,
    /// Elapsed session time in seconds at lap completion, if known.
    pub time_s: Option<f64>,
    /// True if this lap started right after leaving the pit lane.
    #[serde(default)]
    pub pit_out: bool,
}

/// One row of the derived per-lap leaderboard, sent to the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub driver: String,
    pub lap: u32,
    pub position: u32,
    pub tyre: String,
    /// Lap time in seconds, rounded to 3 decimals; `None` if unknown.
    pub lap_time_s: Option<f64>,
    /// Gap to the car one position ahead, in seconds. Exactly 0.000 for the
    /// leader; `None` when either timestamp is missing or no car holds the
    /// position ahead.
    pub gap_front_s: Option<f64>,
    /// Pit stops counted over the whole session for this driver.
    pub pit_stops: u32,
    /// Provisional championship points for this position.
    pub points: u32,
}
