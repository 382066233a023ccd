//! Data-driven game balance
//!
//! Every gameplay constant lives here so a session can be built from a JSON
//! override. Values are fixed once a session is constructed.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    pub player_speed: f32,
    pub bullet_cooldown_ms: u64,
    /// Holding fire repeats (subject to cooldown); otherwise one shot per press
    pub auto_fire: bool,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,

    // === Formation ===
    pub enemy_rows: u32,
    pub enemy_cols: u32,
    pub enemy_size: f32,
    pub enemy_origin_x: f32,
    pub enemy_origin_y: f32,
    pub enemy_spacing: f32,
    pub rear_rank_rows: u32,
    pub enemy_speed: f32,
    pub enemy_descent: f32,
    pub enemy_animation_ms: u64,
    pub enemy_fire_interval_ms: f32,
    pub defense_line_margin: f32,

    // === Barriers ===
    pub barrier_clusters: u32,
    pub barrier_rows: u32,
    pub barrier_cols: u32,
    pub barrier_cell_size: f32,
    pub barrier_health: i32,
    pub barrier_top_offset: f32,

    // === Scoring ===
    pub enemy_reward: u64,
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_speed: PLAYER_SPEED,
            bullet_cooldown_ms: BULLET_COOLDOWN_MS,
            auto_fire: AUTO_FIRE_ENABLED,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,

            enemy_rows: ENEMY_ROWS,
            enemy_cols: ENEMY_COLS,
            enemy_size: ENEMY_SIZE,
            enemy_origin_x: ENEMY_ORIGIN_X,
            enemy_origin_y: ENEMY_ORIGIN_Y,
            enemy_spacing: ENEMY_SPACING,
            rear_rank_rows: REAR_RANK_ROWS,
            enemy_speed: ENEMY_SPEED,
            enemy_descent: ENEMY_DESCENT,
            enemy_animation_ms: ENEMY_ANIMATION_MS,
            enemy_fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,
            defense_line_margin: DEFENSE_LINE_MARGIN,

            barrier_clusters: BARRIER_CLUSTERS,
            barrier_rows: BARRIER_ROWS,
            barrier_cols: BARRIER_COLS,
            barrier_cell_size: BARRIER_CELL_SIZE,
            barrier_health: BARRIER_HEALTH,
            barrier_top_offset: BARRIER_TOP_OFFSET,

            enemy_reward: ENEMY_REWARD,
            starting_lives: STARTING_LIVES,
        }
    }
}

/// Upper bound on enemies or barrier cells a layout may spawn
pub const MAX_GRID_CELLS: u32 = 10_000;
/// Upper bound on points per destroyed enemy
pub const MAX_ENEMY_REWARD: u64 = 1_000_000;

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let dimensions = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("enemy_size", self.enemy_size),
            ("barrier_cell_size", self.barrier_cell_size),
        ];
        for (name, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                bail!("{name} must be a positive number, got {value}");
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("player_bullet_speed", self.player_bullet_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("enemy_descent", self.enemy_descent),
            ("enemy_fire_interval_ms", self.enemy_fire_interval_ms),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a non-negative number, got {value}");
            }
        }

        if self.enemy_rows == 0 || self.enemy_cols == 0 {
            bail!(
                "enemy grid must not be empty ({}x{})",
                self.enemy_rows,
                self.enemy_cols
            );
        }
        match self.enemy_rows.checked_mul(self.enemy_cols) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => bail!(
                "enemy grid {}x{} exceeds {MAX_GRID_CELLS} enemies",
                self.enemy_rows,
                self.enemy_cols
            ),
        }
        let barrier_cells = self
            .barrier_clusters
            .checked_mul(self.barrier_rows)
            .and_then(|n| n.checked_mul(self.barrier_cols));
        match barrier_cells {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => bail!(
                "barrier layout {}x{}x{} exceeds {MAX_GRID_CELLS} cells",
                self.barrier_clusters,
                self.barrier_rows,
                self.barrier_cols
            ),
        }
        if self.enemy_reward > MAX_ENEMY_REWARD {
            bail!(
                "enemy_reward must be at most {MAX_ENEMY_REWARD}, got {}",
                self.enemy_reward
            );
        }
        if self.barrier_health <= 0 {
            bail!("barrier_health must be at least 1, got {}", self.barrier_health);
        }
        if self.starting_lives == 0 {
            bail!("starting_lives must be at least 1");
        }
        if self.player_width > self.screen_width {
            bail!("player is wider than the screen");
        }
        Ok(())
    }

    /// Left edge of the ship at spawn (horizontally centred)
    pub fn player_spawn_x(&self) -> f32 {
        (self.screen_width - self.player_width) / 2.0
    }

    /// Top edge of the ship at spawn
    pub fn player_spawn_y(&self) -> f32 {
        self.screen_height - self.player_height - self.player_bottom_margin
    }

    /// Y coordinate an enemy's bottom edge must reach to end the game
    pub fn defense_line(&self) -> f32 {
        self.screen_height - self.defense_line_margin
    }

    /// Saturates for layouts `validate` would reject
    pub fn enemy_count(&self) -> usize {
        self.enemy_rows.saturating_mul(self.enemy_cols) as usize
    }

    pub fn barrier_cell_count(&self) -> usize {
        self.barrier_clusters
            .saturating_mul(self.barrier_rows)
            .saturating_mul(self.barrier_cols) as usize
    }
}
