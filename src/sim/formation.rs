//! Enemy formation controller
//!
//! The whole grid shares one horizontal direction and speed. When any
//! member touches the edge it is heading for, the formation reverses and
//! drops one step in the same frame, then still moves sideways.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, EnemyKind};
use crate::tuning::Tuning;

/// Shared horizontal heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What a formation step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormationStep {
    /// Direction flipped and the grid descended this frame
    pub reversed: bool,
    /// Some enemy's bottom edge reached the defense line
    pub breached: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Formation {
    pub direction: Direction,
}

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out the grid row by row. The first `rear_rank_rows` rows use the
    /// rear-rank sprite.
    pub fn spawn_grid(tuning: &Tuning) -> Vec<Enemy> {
        let mut enemies = Vec::with_capacity(tuning.enemy_count());
        for row in 0..tuning.enemy_rows {
            let kind = if row < tuning.rear_rank_rows {
                EnemyKind::RearRank
            } else {
                EnemyKind::FrontRank
            };
            for col in 0..tuning.enemy_cols {
                let pos = Vec2::new(
                    tuning.enemy_origin_x + col as f32 * tuning.enemy_spacing,
                    tuning.enemy_origin_y + row as f32 * tuning.enemy_spacing,
                );
                enemies.push(Enemy::new(pos, tuning.enemy_size, kind));
            }
        }
        enemies
    }

    /// Does any enemy sit at or past the edge it is moving toward?
    pub fn at_edge(&self, enemies: &[Enemy], screen_width: f32) -> bool {
        enemies.iter().any(|enemy| match self.direction {
            Direction::Left => enemy.pos.x <= 0.0,
            Direction::Right => enemy.pos.x + enemy.size.x >= screen_width,
        })
    }

    /// Advance the formation one frame
    pub fn step(&mut self, enemies: &mut [Enemy], tuning: &Tuning) -> FormationStep {
        let mut result = FormationStep::default();

        if self.at_edge(enemies, tuning.screen_width) {
            self.direction = self.direction.flipped();
            for enemy in enemies.iter_mut() {
                enemy.pos.y += tuning.enemy_descent;
            }
            result.reversed = true;
        }

        let dx = self.direction.sign() * tuning.enemy_speed;
        let defense_line = tuning.defense_line();
        for enemy in enemies.iter_mut() {
            enemy.pos.x += dx;
            if enemy.pos.y + enemy.size.y >= defense_line {
                result.breached = true;
            }
        }

        result
    }
}
