//! Per-frame simulation step
//!
//! The order inside [`tick`] is observable and fixed:
//! player move, fire, projectiles, enemy animation, sweep, formation,
//! enemy fire, collisions, win check.

use super::combat::{enemy_fire, player_fire, resolve_collisions};
use super::state::{GameEvent, GameState};
use crate::platform::{InputState, Key};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire is held (auto-fire mode)
    pub fire: bool,
    /// A fire press happened since the last tick (single-shot mode)
    pub fire_pressed: bool,
}

impl TickInput {
    /// Sample the held keys; `fire_pressed` is left to the caller
    pub fn from_keys(keys: &InputState) -> Self {
        Self {
            left: keys.is_down(Key::Left),
            right: keys.is_down(Key::Right),
            fire: keys.is_down(Key::Fire),
            fire_pressed: false,
        }
    }
}

/// Advance the game by one frame. `dt` is elapsed milliseconds (negative or
/// non-finite values count as zero); `now_ms` is the clock reading used for
/// shot cooldowns and animation.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now_ms: u64) {
    // Events describe this frame only, including frozen ones
    state.events.clear();
    if state.is_terminal() {
        return;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    state.frame += 1;

    // Player
    state.player.update(input, state.tuning.screen_width);
    let wants_fire = if state.tuning.auto_fire {
        input.fire
    } else {
        input.fire_pressed
    };
    if wants_fire {
        player_fire(state, now_ms);
    }

    // Self-updates
    let screen_height = state.tuning.screen_height;
    for bullet in state
        .player_projectiles
        .iter_mut()
        .chain(state.enemy_projectiles.iter_mut())
    {
        bullet.update(screen_height);
    }
    let animation_ms = state.tuning.enemy_animation_ms;
    for enemy in &mut state.enemies {
        enemy.update(now_ms, animation_ms);
    }

    // Anything marked last frame (or just now, off-screen) goes
    state.sweep();

    // Formation
    let step = state.formation.step(&mut state.enemies, &state.tuning);
    if step.reversed {
        state.events.push(GameEvent::FormationReversed);
        log::trace!("Formation reversed at frame {}", state.frame);
    }
    if step.breached {
        state.set_game_over();
    }

    enemy_fire(state, dt);
    resolve_collisions(state);

    if state.enemies.is_empty() {
        state.set_game_won();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::formation::Direction;
    use crate::sim::state::{GamePhase, Owner, Projectile};
    use crate::tuning::Tuning;

    const DT: f32 = 16.0;

    #[test]
    fn test_idle_frame_moves_formation() {
        let mut state = GameState::new(12345);
        let x0 = state.enemies[0].pos.x;
        tick(&mut state, &TickInput::default(), DT, 16);
        assert_eq!(state.enemies[0].pos.x, x0 + 1.0);
        assert_eq!(state.frame, 1);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_auto_fire_respects_cooldown() {
        let mut state = GameState::new(1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        // Ten frames of 16ms while holding fire: shots at t=0, 112 (first past 100)
        for i in 0..10u64 {
            tick(&mut state, &input, DT, i * 16);
        }
        assert_eq!(state.player_projectiles.len(), 2);
    }

    #[test]
    fn test_single_shot_mode_needs_press() {
        let tuning = Tuning {
            auto_fire: false,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        let held = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &held, DT, 1000);
        assert!(state.player_projectiles.is_empty());

        let pressed = TickInput {
            fire_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &pressed, DT, 2000);
        assert_eq!(state.player_projectiles.len(), 1);
    }

    #[test]
    fn test_offscreen_projectile_swept_before_collision() {
        let mut state = GameState::new(1);
        state.enemies.clear();
        state.enemies.push(crate::sim::state::Enemy::new(
            glam::Vec2::new(400.0, 0.0),
            30.0,
            crate::sim::state::EnemyKind::RearRank,
        ));
        // Bullet that leaves the top this frame while overlapping the enemy
        let tuning = state.tuning.clone();
        let bullet = Projectile::new(415.0, 10.0, -15.0, Owner::Player, &tuning);
        state.player_projectiles.push(bullet);

        tick(&mut state, &TickInput::default(), DT, 16);
        assert!(state.player_projectiles.is_empty());
        assert!(!state.enemies[0].marked);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_marked_entities_visible_until_next_tick() {
        let mut state = GameState::new(1);
        let target = state.enemies[45].pos;
        let tuning = state.tuning.clone();
        // Placed so that after moving up 15 it overlaps the enemy (which moves +1 in x)
        let bullet = Projectile::new(target.x + 16.0, target.y + 20.0, -15.0, Owner::Player, &tuning);
        state.player_projectiles.push(bullet);

        tick(&mut state, &TickInput::default(), DT, 16);
        assert_eq!(state.enemies.len(), 50);
        assert!(state.enemies[45].marked);
        assert_eq!(state.score(), 100);

        tick(&mut state, &TickInput::default(), DT, 32);
        assert_eq!(state.enemies.len(), 49);
    }

    #[test]
    fn test_terminal_state_freezes_simulation() {
        let mut state = GameState::new(1);
        state.set_game_over();
        let before = state.enemies[0].pos;
        tick(&mut state, &TickInput::default(), DT, 16);
        assert_eq!(state.enemies[0].pos, before);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_frozen_frames_report_no_events() {
        let mut state = GameState::new(1);
        state.lives = 1;
        let tuning = state.tuning.clone();
        let player = state.player.pos;
        // Lands on the ship after its 7px descent this frame
        let bullet = Projectile::new(player.x + 25.0, player.y - 10.0, 7.0, Owner::Enemy, &tuning);
        state.enemy_projectiles.push(bullet);

        tick(&mut state, &TickInput::default(), DT, 16);
        assert!(state.game_over());
        assert!(state.events.contains(&GameEvent::PlayerHit { lives_left: 0 }));
        assert!(state.events.contains(&GameEvent::GameOver));

        tick(&mut state, &TickInput::default(), DT, 32);
        assert!(state.events.is_empty());
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_win_when_formation_empty() {
        let mut state = GameState::new(1);
        for enemy in &mut state.enemies {
            enemy.marked = true;
        }
        tick(&mut state, &TickInput::default(), DT, 16);
        assert!(state.game_won());
        assert!(!state.game_over());
        assert!(state.events.contains(&GameEvent::GameWon));
    }

    #[test]
    fn test_breach_ends_game() {
        let mut state = GameState::new(1);
        for enemy in &mut state.enemies {
            enemy.pos.y += 300.0;
        }
        tick(&mut state, &TickInput::default(), DT, 16);
        assert!(state.game_over());
        assert!(!state.game_won());
    }

    #[test]
    fn test_negative_dt_is_zero() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), -500.0, 16);
        assert_eq!(state.enemy_fire_timer, 0.0);
        tick(&mut state, &TickInput::default(), f32::NAN, 32);
        assert_eq!(state.enemy_fire_timer, 0.0);
    }

    #[test]
    fn test_formation_reverses_eventually() {
        let mut state = GameState::new(1);
        let y0 = state.enemies[0].pos.y;
        let mut reversed = false;
        for i in 0..300u64 {
            // No enemy fire to keep the run quiet
            state.enemy_fire_timer = 0.0;
            tick(&mut state, &TickInput::default(), 0.0, i * 16);
            if state.events.contains(&GameEvent::FormationReversed) {
                reversed = true;
                break;
            }
        }
        assert!(reversed);
        assert_eq!(state.formation.direction, Direction::Left);
        assert_eq!(state.enemies[0].pos.y, y0 + 10.0);
        assert_eq!(state.enemies.len(), 50);
    }
}
