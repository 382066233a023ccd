//! Read-only view of the game for renderers
//!
//! The simulation never draws. After each update the driver hands a
//! [`Snapshot`] to whatever [`Renderer`] it owns.

use serde::Serialize;

use super::rect::{Bounded, Rect};
use super::state::{BarrierCell, Enemy, GamePhase, GameState, Player, Projectile};
use crate::consts::{NEON_PINK, WHITE};

/// Centered message shown while the game is over or won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub title_color: u32,
    pub subtitle_color: u32,
}

const RESTART_HINT: &str = "Press R to Restart";

impl Overlay {
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(Self::message("GAME OVER")),
            GamePhase::GameWon => Some(Self::message("YOU WIN!")),
        }
    }

    fn message(title: &'static str) -> Self {
        Self {
            title,
            subtitle: RESTART_HINT,
            title_color: NEON_PINK,
            subtitle_color: WHITE,
        }
    }
}

/// One thing to draw
#[derive(Debug, Clone, Copy)]
pub enum Drawable<'a> {
    Player(&'a Player),
    Projectile(&'a Projectile),
    Enemy(&'a Enemy),
    BarrierCell(&'a BarrierCell),
}

impl Drawable<'_> {
    pub fn rect(&self) -> Rect {
        match self {
            Drawable::Player(p) => p.rect(),
            Drawable::Projectile(p) => p.rect(),
            Drawable::Enemy(e) => e.rect(),
            Drawable::BarrierCell(c) => c.rect(),
        }
    }
}

/// Borrowed, fully updated frame state
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub player_projectiles: &'a [Projectile],
    pub enemy_projectiles: &'a [Projectile],
    pub enemies: &'a [Enemy],
    pub barriers: &'a [BarrierCell],
    pub score: u64,
    pub lives: u8,
    pub game_over: bool,
    pub game_won: bool,
    pub overlay: Option<Overlay>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            player: &state.player,
            player_projectiles: &state.player_projectiles,
            enemy_projectiles: &state.enemy_projectiles,
            enemies: &state.enemies,
            barriers: &state.barriers,
            score: state.score(),
            lives: state.lives(),
            game_over: state.game_over(),
            game_won: state.game_won(),
            overlay: Overlay::for_phase(state.phase()),
        }
    }

    /// Draw order: player, projectiles, enemies, barriers
    pub fn drawables(&self) -> impl Iterator<Item = Drawable<'a>> + '_ {
        std::iter::once(Drawable::Player(self.player))
            .chain(
                self.player_projectiles
                    .iter()
                    .chain(self.enemy_projectiles.iter())
                    .map(Drawable::Projectile),
            )
            .chain(self.enemies.iter().map(Drawable::Enemy))
            .chain(self.barriers.iter().map(Drawable::BarrierCell))
    }
}

/// Presentation layer fed once per frame
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_only_in_terminal_phase() {
        let mut state = GameState::new(1);
        assert!(Snapshot::capture(&state).overlay.is_none());

        state.set_game_over();
        let overlay = Snapshot::capture(&state).overlay.unwrap();
        assert_eq!(overlay.title, "GAME OVER");
        assert_eq!(overlay.subtitle, "Press R to Restart");

        state.restart();
        state.set_game_won();
        assert_eq!(Snapshot::capture(&state).overlay.unwrap().title, "YOU WIN!");
    }

    #[test]
    fn test_drawables_cover_every_entity() {
        let state = GameState::new(1);
        let snapshot = Snapshot::capture(&state);
        // 1 player + 50 enemies + 60 barrier cells
        assert_eq!(snapshot.drawables().count(), 111);
        assert!(matches!(snapshot.drawables().next(), Some(Drawable::Player(_))));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_value(Snapshot::capture(&state)).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["lives"], 3);
        assert_eq!(json["enemies"].as_array().unwrap().len(), 50);
        assert!(json["overlay"].is_null());
    }
}
