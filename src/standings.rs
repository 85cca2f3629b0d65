use crate::model::{LapRecord, LeaderboardRow};

/// Provisional championship points for a finishing position.
///
/// Standard table: positions 1-10 score, everything else is 0.
pub fn points_for(position: u32) -> u32 {
    match position {
        1 => 25,
        2 => 18,
        3 => 15,
        4 => 12,
        5 => 10,
        6 => 8,
        7 => 6,
        8 => 4,
        9 => 2,
        10 => 1,
        _ => 0,
    }
}

/// Highest lap number present in the record set, 0 when empty.
pub fn max_lap(all_laps: &[LapRecord]) -> u32 {
    all_laps.iter().map(|l| l.lap).max().unwrap_or(0)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Derive the ordered leaderboard for one lap of the session.
///
/// `all_laps` is the full, immutable record set for the session; only records
/// whose lap number matches are turned into rows, so a lap with no records
/// (past the end of the race, or before it) yields an empty vector.
///
/// Per row:
/// - the gap to the car ahead is 0.000 for the leader and otherwise the
///   difference of completion timestamps against the record holding
///   `position - 1`; if that record does not exist or either timestamp is
///   missing, the gap is `None`;
/// - the pit-stop count scans the driver's pit-out flags across the whole
///   session, so it does not vary with the requested lap.
///
/// Rows come back sorted ascending by position. Pure function, no I/O.
pub fn derive_leaderboard(all_laps: &[LapRecord], lap_number: u32) -> Vec<LeaderboardRow> {
    let current_lap: Vec<&LapRecord> =
        all_laps.iter().filter(|l| l.lap == lap_number).collect();

    let mut rows: Vec<LeaderboardRow> = current_lap
        .iter()
        .map(|rec| {
            let gap_front_s = if rec.position == 1 {
                Some(0.000)
            } else {
                let ahead = current_lap.iter().find(|a| a.position + 1 == rec.position);
                match (ahead.and_then(|a| a.time_s), rec.time_s) {
                    (Some(ahead_t), Some(t)) => Some(round3(t - ahead_t)),
                    _ => None,
                }
            };

            let pit_stops = all_laps
                .iter()
                .filter(|l| l.driver == rec.driver && l.pit_out)
                .count() as u32;

            LeaderboardRow {
                driver: rec.driver.clone(),
                lap: lap_number,
                position: rec.position,
                tyre: rec.compound.clone(),
                lap_time_s: rec.lap_time_s.map(round3),
                gap_front_s,
                pit_stops,
                points: points_for(rec.position),
            }
        })
        .collect();

    rows.sort_by_key(|r| r.position);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lap(driver: &str, lap: u32, position: u32, time_s: Option<f64>, pit_out: bool) -> LapRecord {
        LapRecord {
            driver: driver.to_string(),
            lap,
            position,
            compound: "SOFT".to_string(),
            lap_time_s: Some(95.0),
            time_s,
            pit_out,
        }
    }

    #[test]
    fn test_leader_gap_is_zero() {
        let laps = vec![lap("VER", 1, 1, None, false)];
        let rows = derive_leaderboard(&laps, 1);
        assert_eq!(rows.len(), 1);
        // Exactly 0.000 even though the leader's timestamp is missing.
        assert_eq!(rows[0].gap_front_s, Some(0.0));
    }

    #[test]
    fn test_gap_from_timestamps() {
        let laps = vec![
            lap("A", 5, 1, Some(100.000), false),
            lap("B", 5, 2, Some(101.234), false),
        ];
        let rows = derive_leaderboard(&laps, 5);
        assert_eq!(rows[1].driver, "B");
        assert_eq!(rows[1].gap_front_s, Some(1.234));
    }

    #[test]
    fn test_gap_absent_when_time_missing() {
        let laps = vec![
            lap("A", 5, 1, Some(100.0), false),
            lap("B", 5, 2, None, false),
        ];
        let rows = derive_leaderboard(&laps, 5);
        assert_eq!(rows[1].gap_front_s, None);
    }

    #[test]
    fn test_gap_absent_when_position_ahead_missing() {
        // Position 2 retired; position 3 has nobody at position 2 to gap to.
        let laps = vec![
            lap("A", 10, 1, Some(100.0), false),
            lap("C", 10, 3, Some(104.5), false),
        ];
        let rows = derive_leaderboard(&laps, 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].position, 3);
        assert_eq!(rows[1].gap_front_s, None);
    }

    #[test]
    fn test_points_table() {
        let expected = [
            (1, 25),
            (2, 18),
            (3, 15),
            (4, 12),
            (5, 10),
            (6, 8),
            (7, 6),
            (8, 4),
            (9, 2),
            (10, 1),
            (11, 0),
            (20, 0),
        ];
        for (pos, pts) in expected {
            assert_eq!(points_for(pos), pts, "position {}", pos);
        }
    }

    #[test]
    fn test_pit_stops_count_whole_session() {
        // VER pits on laps 12 and 30. The count scans the full session, so
        // it reads 2 on every lap, including laps before the first stop.
        let laps = vec![
            lap("VER", 1, 1, Some(95.0), false),
            lap("VER", 12, 1, Some(96.0), true),
            lap("VER", 30, 1, Some(97.0), true),
        ];
        for lap_number in [1, 12, 30] {
            let rows = derive_leaderboard(&laps, lap_number);
            assert_eq!(rows[0].pit_stops, 2, "lap {}", lap_number);
        }
    }

    #[test]
    fn test_rows_sorted_by_position() {
        let laps = vec![
            lap("C", 3, 3, Some(103.0), false),
            lap("A", 3, 1, Some(100.0), false),
            lap("B", 3, 2, Some(101.0), false),
        ];
        let rows = derive_leaderboard(&laps, 3);
        let positions: Vec<u32> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_lap_is_empty() {
        let laps = vec![lap("A", 1, 1, Some(100.0), false)];
        assert!(derive_leaderboard(&laps, 999).is_empty());
        assert!(derive_leaderboard(&[], 1).is_empty());
    }

    #[test]
    fn test_lap_time_rounded() {
        let mut rec = lap("A", 1, 1, Some(100.0), false);
        rec.lap_time_s = Some(95.12345);
        let rows = derive_leaderboard(&[rec], 1);
        assert_eq!(rows[0].lap_time_s, Some(95.123));
    }

    #[test]
    fn test_max_lap() {
        let laps = vec![
            lap("A", 1, 1, None, false),
            lap("A", 57, 1, None, false),
            lap("B", 40, 2, None, false),
        ];
        assert_eq!(max_lap(&laps), 57);
        assert_eq!(max_lap(&[]), 0);
    }
}
