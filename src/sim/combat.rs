//! Combat resolver: projectile spawning and collision resolution
//!
//! Resolution runs once per frame after movement. Each category is checked
//! independently and only sets flags; nothing is removed until the next
//! sweep, so an entity can take part in several interactions per frame.

use rand::Rng;

use super::rect::{Bounded, overlaps};
use super::state::{GameEvent, GameState, Owner, Projectile};

/// Try to fire the player's gun (respects the cooldown)
pub fn player_fire(state: &mut GameState, now_ms: u64) -> bool {
    match state.player.shoot(now_ms, &state.tuning) {
        Some(bullet) => {
            state.player_projectiles.push(bullet);
            state.events.push(GameEvent::PlayerFired);
            true
        }
        None => false,
    }
}

/// Accumulate frame time and, once the interval is exceeded, fire from one
/// randomly chosen enemy. At most one shot per call.
pub fn enemy_fire(state: &mut GameState, dt: f32) -> bool {
    state.enemy_fire_timer += dt;
    if state.enemy_fire_timer <= state.tuning.enemy_fire_interval_ms || state.enemies.is_empty() {
        return false;
    }
    state.enemy_fire_timer = 0.0;

    let index = state.rng.random_range(0..state.enemies.len());
    let shooter = state.enemies[index].rect();
    let bullet = Projectile::new(
        shooter.center().x,
        shooter.bottom(),
        state.tuning.enemy_bullet_speed,
        Owner::Enemy,
        &state.tuning,
    );
    state.events.push(GameEvent::EnemyFired {
        x: bullet.pos.x,
        y: bullet.pos.y,
    });
    state.enemy_projectiles.push(bullet);
    true
}

/// Resolve every collision category in order
pub fn resolve_collisions(state: &mut GameState) {
    player_projectiles_vs_enemies(state);
    enemy_projectiles_vs_player(state);
    projectiles_vs_barriers(state);
    enemies_vs_barriers(state);
}

/// A bullet keeps going through every enemy it overlaps this frame, so one
/// bullet can take out (and score) several enemies. An enemy already marked
/// this frame is not scored twice.
fn player_projectiles_vs_enemies(state: &mut GameState) {
    let mut kills = 0u64;
    for bullet in &mut state.player_projectiles {
        let bullet_rect = bullet.rect();
        for enemy in &mut state.enemies {
            if enemy.marked || !overlaps(&bullet_rect, &enemy.rect()) {
                continue;
            }
            enemy.marked = true;
            bullet.marked = true;
            kills += 1;
            state.events.push(GameEvent::EnemyDestroyed {
                x: enemy.pos.x,
                y: enemy.pos.y,
                kind: enemy.kind,
            });
        }
    }
    if kills > 0 {
        let points = kills.saturating_mul(state.tuning.enemy_reward);
        state.score = state.score.saturating_add(points);
        log::debug!("{} enemies destroyed, score {}", kills, state.score);
    }
}

fn enemy_projectiles_vs_player(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut hits = 0u32;
    for bullet in &mut state.enemy_projectiles {
        if overlaps(&bullet.rect(), &player_rect) {
            bullet.marked = true;
            hits += 1;
        }
    }

    for _ in 0..hits {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::PlayerHit {
            lives_left: state.lives,
        });
        log::debug!("Player hit, {} lives left", state.lives);
        if state.lives == 0 {
            state.set_game_over();
        }
    }
}

/// Both owners chip barrier cells, one health point per overlapping pair
fn projectiles_vs_barriers(state: &mut GameState) {
    let projectiles = state
        .player_projectiles
        .iter_mut()
        .chain(state.enemy_projectiles.iter_mut());
    for bullet in projectiles {
        let bullet_rect = bullet.rect();
        for cell in &mut state.barriers {
            if !overlaps(&bullet_rect, &cell.rect()) {
                continue;
            }
            bullet.marked = true;
            if cell.hit() {
                state.events.push(GameEvent::BarrierDestroyed {
                    x: cell.pos.x,
                    y: cell.pos.y,
                });
            }
        }
    }
}

/// Enemies crush any barrier cell they touch, regardless of health
fn enemies_vs_barriers(state: &mut GameState) {
    for enemy in &state.enemies {
        let enemy_rect = enemy.rect();
        for cell in &mut state.barriers {
            if overlaps(&enemy_rect, &cell.rect()) && cell.destroy() {
                state.events.push(GameEvent::BarrierDestroyed {
                    x: cell.pos.x,
                    y: cell.pos.y,
                });
            }
        }
    }
}
