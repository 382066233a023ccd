//! Neon Invaders - a fixed-grid arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, collisions, game state)
//! - `platform`: Clock and input collaborators
//! - `session`: Owned session the driver holds (state + input + clock)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Gap between the ship and the bottom of the screen
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    /// Horizontal movement per frame
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Minimum milliseconds between two player shots
    pub const BULLET_COOLDOWN_MS: u64 = 100;

    /// Projectiles (speeds are per frame)
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    pub const PLAYER_BULLET_SPEED: f32 = 15.0;
    pub const ENEMY_BULLET_SPEED: f32 = 7.0;

    /// Enemy formation
    pub const ENEMY_ROWS: u32 = 5;
    pub const ENEMY_COLS: u32 = 10;
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_ORIGIN_X: f32 = 100.0;
    pub const ENEMY_ORIGIN_Y: f32 = 50.0;
    pub const ENEMY_SPACING: f32 = 50.0;
    /// Rows above this index use the rear-rank sprite
    pub const REAR_RANK_ROWS: u32 = 2;
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const ENEMY_DESCENT: f32 = 10.0;
    pub const ENEMY_ANIMATION_MS: u64 = 500;
    /// Accumulated frame time between enemy shots
    pub const ENEMY_FIRE_INTERVAL_MS: f32 = 1000.0;
    /// Distance above the bottom edge that ends the game when reached
    pub const DEFENSE_LINE_MARGIN: f32 = 50.0;

    /// Barriers: 4 clusters of 3x5 cells
    pub const BARRIER_CLUSTERS: u32 = 4;
    pub const BARRIER_ROWS: u32 = 3;
    pub const BARRIER_COLS: u32 = 5;
    pub const BARRIER_CELL_SIZE: f32 = 10.0;
    pub const BARRIER_HEALTH: i32 = 5;
    /// Distance of the first barrier row from the bottom edge
    pub const BARRIER_TOP_OFFSET: f32 = 150.0;

    /// Scoring and lives
    pub const ENEMY_REWARD: u64 = 100;
    pub const STARTING_LIVES: u8 = 3;

    pub const AUTO_FIRE_ENABLED: bool = true;

    /// Palette (0xRRGGBB)
    pub const NEON_GREEN: u32 = 0x39ff14;
    pub const NEON_PINK: u32 = 0xff1493;
    pub const NEON_BLUE: u32 = 0x00ffff;
    pub const WHITE: u32 = 0xffffff;
}
