//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only arrives as arguments (frame delta, clock reading)
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies beyond reading input

pub mod combat;
pub mod formation;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use combat::{enemy_fire, player_fire, resolve_collisions};
pub use formation::{Direction, Formation, FormationStep};
pub use rect::{Bounded, Rect, Sweepable, overlaps};
pub use snapshot::{Drawable, Overlay, Renderer, Snapshot};
pub use state::{
    BarrierCell, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Owner, Player, Projectile,
    spawn_barriers,
};
pub use tick::{TickInput, tick};
