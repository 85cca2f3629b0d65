use crate::model::LeaderboardRow;

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.3}", x),
        None => "-".to_string(),
    }
}

/// Render one leaderboard snapshot as a fixed-width text table.
pub fn format_table(lap_number: u32, rows: &[LeaderboardRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Lap {}\n", lap_number));
    out.push_str(&format!(
        "{:>3}  {:<8} {:<8} {:>10} {:>9} {:>6} {:>4}\n",
        "POS", "DRIVER", "TYRE", "LAP TIME", "GAP", "STOPS", "PTS"
    ));

    if rows.is_empty() {
        out.push_str("  (no records for this lap)\n");
        return out;
    }

    for row in rows {
        out.push_str(&format!(
            "{:>3}  {:<8} {:<8} {:>10} {:>9} {:>6} {:>4}\n",
            row.position,
            row.driver,
            row.tyre,
            fmt_opt(row.lap_time_s),
            fmt_opt(row.gap_front_s),
            row.pit_stops,
            row.points
        ));
    }
    out
}
