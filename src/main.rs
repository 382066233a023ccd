//! Neon Invaders headless driver
//!
//! Runs a session with a scripted autopilot and logs the HUD. Usage:
//!
//! ```text
//! neon-invaders [tuning.json] [seed]
//! ```

use anyhow::{Context, Result};

use neon_invaders::platform::{Clock, Key, ManualClock};
use neon_invaders::sim::{GameEvent, Renderer, Snapshot};
use neon_invaders::{Session, Tuning};

/// Fixed frame time (about 60 Hz)
const FRAME_MS: u64 = 16;
/// Hard stop so a stalemate cannot run forever
const MAX_FRAMES: u64 = 60 * 60 * 5;
const DEFAULT_SEED: u64 = 0x5eed;

/// Logs a one-line HUD every second of game time
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        self.frames += 1;
        if self.frames % 60 != 0 && snapshot.overlay.is_none() {
            return;
        }
        log::info!(
            "frame {:>5} | score {:>5} | lives {} | enemies {:>2} | barriers {:>2} | bullets {}/{}",
            self.frames,
            snapshot.score,
            snapshot.lives,
            snapshot.enemies.len(),
            snapshot.barriers.len(),
            snapshot.player_projectiles.len(),
            snapshot.enemy_projectiles.len(),
        );
        if let Some(overlay) = snapshot.overlay {
            log::info!("{} - {}", overlay.title, overlay.subtitle);
        }
    }
}

/// Sweep under the lowest enemy while holding fire
fn steer(session: &mut Session<ManualClock>) {
    let state = session.state();
    let player_x = state.player.pos.x + state.player.size.x / 2.0;
    let target_x = state
        .enemies
        .iter()
        .filter(|e| !e.marked)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map_or(player_x, |e| e.pos.x + e.size.x / 2.0);

    let (left, right) = (Key::Left.identifier(), Key::Right.identifier());
    if target_x < player_x - 2.0 {
        session.key_up(right);
        session.key_down(left);
    } else if target_x > player_x + 2.0 {
        session.key_up(left);
        session.key_down(right);
    } else {
        session.key_up(left);
        session.key_up(right);
    }
    session.key_down(Key::Fire.identifier());
}

fn load_tuning(path: Option<&str>) -> Result<Tuning> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read tuning file {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("bad tuning in {path}"))
        }
        None => Ok(Tuning::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Invaders (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = load_tuning(args.first().map(String::as_str))?;
    let seed = match args.get(1) {
        Some(s) => s.parse().with_context(|| format!("seed must be an integer, got {s:?}"))?,
        None => DEFAULT_SEED,
    };

    let mut session = Session::manual(seed, tuning);
    let mut renderer = LogRenderer { frames: 0 };

    for _ in 0..MAX_FRAMES {
        steer(&mut session);
        session.run_frame(FRAME_MS as f32, &mut renderer);
        session.clock_mut().advance(FRAME_MS);

        for event in session.events() {
            if let GameEvent::PlayerHit { lives_left } = event {
                log::warn!("Ship hit! {} lives left", lives_left);
            }
        }
        if session.state().is_terminal() {
            break;
        }
    }

    log::info!(
        "Finished after {} ms of game time ({:?})",
        session.clock().now_ms(),
        session.phase()
    );
    let summary = serde_json::json!({
        "phase": session.phase(),
        "score": session.state().score(),
        "lives": session.state().lives(),
        "frames": session.state().frame,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
