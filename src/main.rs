use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::SinkExt;
use serde::Serialize;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::Message};

use race_replay::config::ReplayConfig;
use race_replay::model::{self, LapRecord};
use race_replay::session::SessionData;
use race_replay::{display, standings};

/// One playback frame sent to WebSocket viewers.
#[derive(Serialize)]
struct LapFrame<'a> {
    lap: u32,
    max_lap: u32,
    rows: &'a [model::LeaderboardRow],
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = ReplayConfig::from_env()?;
    tracing::info!(
        "replaying {} {} session {} at {:.1}s per lap",
        cfg.season,
        cfg.event,
        cfg.session,
        cfg.lap_interval_s
    );

    let session = SessionData::load(&cfg)?;
    let laps = Arc::new(session.laps);

    // With BIND_ADDR set, stream replays to WebSocket viewers; otherwise
    // play the race back once on stdout.
    match std::env::var("BIND_ADDR") {
        Ok(bind_addr) => serve(laps, cfg, &bind_addr).await,
        Err(_) => replay_stdout(&laps, &cfg).await,
    }
}

async fn replay_stdout(laps: &[LapRecord], cfg: &ReplayConfig) -> Result<()> {
    let max_lap = standings::max_lap(laps);
    let interval = Duration::from_secs_f64(cfg.lap_interval_s);

    for lap_number in 1..=max_lap {
        let rows = standings::derive_leaderboard(laps, lap_number);
        println!("{}", display::format_table(lap_number, &rows));
        if lap_number < max_lap {
            tokio::time::sleep(interval).await;
        }
    }

    tracing::info!("replay complete after {} laps", max_lap);
    Ok(())
}

async fn serve(laps: Arc<Vec<LapRecord>>, cfg: ReplayConfig, bind_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("streaming replays on ws://{}", bind_addr);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::info!("viewer connected from {}", peer);
                tokio::spawn(handle_viewer(stream, Arc::clone(&laps), cfg.clone()));
            }
            Err(e) => {
                tracing::warn!("accept error: {}", e);
                // small delay to avoid a tight loop on persistent errors
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
        }
    }
}

/// Replay the whole race to one viewer, one JSON frame per lap.
async fn handle_viewer(stream: TcpStream, laps: Arc<Vec<LapRecord>>, cfg: ReplayConfig) {
    let mut ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!("websocket handshake failed: {}", e);
            return;
        }
    };

    let max_lap = standings::max_lap(&laps);
    let interval = Duration::from_secs_f64(cfg.lap_interval_s);

    for lap_number in 1..=max_lap {
        let rows = standings::derive_leaderboard(&laps, lap_number);
        let frame = LapFrame {
            lap: lap_number,
            max_lap,
            rows: &rows,
        };
        let payload = match serde_json::to_string(&frame) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("frame serialization failed: {}", e);
                return;
            }
        };
        if let Err(e) = ws_stream.send(Message::Text(payload)).await {
            tracing::info!("viewer dropped at lap {}: {}", lap_number, e);
            return;
        }
        tokio::time::sleep(interval).await;
    }

    let _ = ws_stream.send(Message::Close(None)).await;
    tracing::info!("replay finished for viewer");
}
