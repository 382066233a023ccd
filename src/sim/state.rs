//! Game state and core simulation types
//!
//! Entities are plain data with a small per-frame update. Removal is
//! mark-then-sweep: collisions set `marked`, the next tick filters.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::formation::Formation;
use super::rect::{Bounded, Rect, Sweepable};
use super::tick::TickInput;
use crate::consts::{NEON_BLUE, NEON_GREEN, NEON_PINK};
use crate::tuning::Tuning;

/// Derived lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives or the formation reached the defense line
    GameOver,
    /// Every enemy destroyed
    GameWon,
}

/// Something that happened during the last tick (for sound/HUD hooks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired { x: f32, y: f32 },
    EnemyDestroyed { x: f32, y: f32, kind: EnemyKind },
    PlayerHit { lives_left: u8 },
    BarrierDestroyed { x: f32, y: f32 },
    FormationReversed,
    GameOver,
    GameWon,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal movement per frame
    pub speed: f32,
    /// Clock time of the last accepted shot (None = never fired)
    pub last_shot: Option<u64>,
    pub cooldown_ms: u64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_spawn_x(), tuning.player_spawn_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            last_shot: None,
            cooldown_ms: tuning.bullet_cooldown_ms,
        }
    }

    /// Move by `speed` for each held direction, stopping at the screen edges
    pub fn update(&mut self, input: &TickInput, screen_width: f32) {
        let max_x = screen_width - self.size.x;
        if input.left && self.pos.x > 0.0 {
            self.pos.x = (self.pos.x - self.speed).max(0.0);
        }
        if input.right && self.pos.x < max_x {
            self.pos.x = (self.pos.x + self.speed).min(max_x);
        }
    }

    /// Fire if the cooldown has elapsed. Calls inside the window are dropped.
    pub fn shoot(&mut self, now_ms: u64, tuning: &Tuning) -> Option<Projectile> {
        if let Some(last) = self.last_shot {
            if now_ms.saturating_sub(last) <= self.cooldown_ms {
                return None;
            }
        }
        self.last_shot = Some(now_ms);
        Some(Projectile::new(
            self.pos.x + self.size.x / 2.0,
            self.pos.y,
            -tuning.player_bullet_speed,
            Owner::Player,
            tuning,
        ))
    }
}

impl Bounded for Player {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

impl Owner {
    pub fn color(&self) -> u32 {
        match self {
            Owner::Player => NEON_BLUE,
            Owner::Enemy => NEON_PINK,
        }
    }
}

/// A bullet travelling straight up (player) or down (enemy)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical movement per frame; negative is upward
    pub vel_y: f32,
    pub owner: Owner,
    pub marked: bool,
}

impl Projectile {
    /// Spawn horizontally centred on `center_x` with its top edge at `top_y`
    pub fn new(center_x: f32, top_y: f32, vel_y: f32, owner: Owner, tuning: &Tuning) -> Self {
        let width = tuning.projectile_width;
        Self {
            pos: Vec2::new(center_x - width / 2.0, top_y),
            size: Vec2::new(width, tuning.projectile_height),
            vel_y,
            owner,
            marked: false,
        }
    }

    /// Advance one frame; leaving the screen vertically marks it
    pub fn update(&mut self, screen_height: f32) {
        self.pos.y += self.vel_y;
        if self.pos.y < 0.0 || self.pos.y > screen_height {
            self.marked = true;
        }
    }
}

impl Bounded for Projectile {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

impl Sweepable for Projectile {
    fn is_marked(&self) -> bool {
        self.marked
    }
}

/// Enemy sprite variants. Combat stats are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Top rows, square sprite
    RearRank,
    /// Rows nearer the player, triangle sprite
    FrontRank,
}

impl EnemyKind {
    pub fn color(&self) -> u32 {
        match self {
            EnemyKind::RearRank => NEON_GREEN,
            EnemyKind::FrontRank => NEON_PINK,
        }
    }
}

/// One member of the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    /// Two-frame animation phase (0 or 1), render only
    pub frame: u8,
    /// Clock reading of the last frame toggle; `None` until the first update
    pub last_animation: Option<u64>,
    pub marked: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, size: f32, kind: EnemyKind) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            kind,
            frame: 0,
            last_animation: None,
            marked: false,
        }
    }

    /// Toggle the animation frame once `interval_ms` of clock time has passed.
    /// The first update always toggles.
    pub fn update(&mut self, now_ms: u64, interval_ms: u64) {
        let due = match self.last_animation {
            Some(last) => now_ms.saturating_sub(last) > interval_ms,
            None => true,
        };
        if due {
            self.last_animation = Some(now_ms);
            self.frame = 1 - self.frame;
        }
    }
}

impl Bounded for Enemy {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

impl Sweepable for Enemy {
    fn is_marked(&self) -> bool {
        self.marked
    }
}

/// One destructible block of a barrier cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrierCell {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub marked: bool,
}

impl BarrierCell {
    pub fn new(pos: Vec2, size: f32, health: i32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            health,
            max_health: health,
            marked: false,
        }
    }

    /// Take one projectile hit. Returns true if this hit destroyed the cell.
    pub fn hit(&mut self) -> bool {
        self.health -= 1;
        if self.health <= 0 && !self.marked {
            self.marked = true;
            return true;
        }
        false
    }

    /// Remove outright (enemy contact). Returns true if it was still standing.
    pub fn destroy(&mut self) -> bool {
        let was_standing = !self.marked;
        self.marked = true;
        was_standing
    }

    /// Remaining health as 0..=1, used for fading
    pub fn opacity(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health.max(1) as f32).min(1.0)
    }
}

impl Bounded for BarrierCell {
    fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

impl Sweepable for BarrierCell {
    fn is_marked(&self) -> bool {
        self.marked
    }
}

/// Build the barrier clusters, cluster by cluster, row-major within each
pub fn spawn_barriers(tuning: &Tuning) -> Vec<BarrierCell> {
    let mut cells = Vec::with_capacity(tuning.barrier_cell_count());
    let clusters = tuning.barrier_clusters.max(1) as f32;
    let cell = tuning.barrier_cell_size;
    for i in 0..tuning.barrier_clusters {
        let cluster_x = (tuning.screen_width / clusters) * i as f32
            + tuning.screen_width / (clusters * 2.0);
        for row in 0..tuning.barrier_rows {
            for col in 0..tuning.barrier_cols {
                let pos = Vec2::new(
                    cluster_x + col as f32 * cell,
                    tuning.screen_height - tuning.barrier_top_offset + row as f32 * cell,
                );
                cells.push(BarrierCell::new(pos, cell, tuning.barrier_health));
            }
        }
    }
    cells
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    /// Creation order is row-major grid order
    pub enemies: Vec<Enemy>,
    pub barriers: Vec<BarrierCell>,
    pub formation: Formation,
    /// Accumulated frame time toward the next enemy shot (ms)
    pub enemy_fire_timer: f32,
    /// Simulated frames since (re)start
    pub frame: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) score: u64,
    pub(crate) lives: u8,
    pub(crate) game_over: bool,
    pub(crate) game_won: bool,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            enemies: Vec::new(),
            barriers: Vec::new(),
            formation: Formation::new(),
            enemy_fire_timer: 0.0,
            frame: 0,
            events: Vec::new(),
            score: 0,
            lives: tuning.starting_lives,
            game_over: false,
            game_won: false,
            tuning,
        };
        state.populate();
        state
    }

    fn populate(&mut self) {
        self.enemies = Formation::spawn_grid(&self.tuning);
        self.barriers = spawn_barriers(&self.tuning);
    }

    /// Full reset: entities, player, score, lives, flags and timers.
    /// The next run is seeded from the current RNG.
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        *self = Self::with_tuning(seed, self.tuning.clone());
        log::info!(
            "Session restarted (seed {}, {} enemies, {} barrier cells)",
            seed,
            self.enemies.len(),
            self.barriers.len()
        );
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn game_won(&self) -> bool {
        self.game_won
    }

    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_won
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.game_won {
            GamePhase::GameWon
        } else {
            GamePhase::Playing
        }
    }

    /// Latch game over. Ignored once the game is won.
    pub(crate) fn set_game_over(&mut self) {
        if self.game_over || self.game_won {
            return;
        }
        self.game_over = true;
        self.events.push(GameEvent::GameOver);
        log::info!("Game over (score {}, lives {})", self.score, self.lives);
    }

    /// Latch game won. Ignored once the game is lost.
    pub(crate) fn set_game_won(&mut self) {
        if self.game_over || self.game_won {
            return;
        }
        self.game_won = true;
        self.events.push(GameEvent::GameWon);
        log::info!("Game won (score {}, lives {})", self.score, self.lives);
    }

    /// Remove everything marked during the previous frame
    pub fn sweep(&mut self) {
        use super::rect::sweep;

        let removed = sweep(&mut self.player_projectiles)
            + sweep(&mut self.enemy_projectiles)
            + sweep(&mut self.enemies)
            + sweep(&mut self.barriers);
        if removed > 0 {
            log::trace!("Swept {} entities", removed);
        }
    }
}
