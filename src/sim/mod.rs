//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected draws only (seeded RNG in the game, scripted in tests)
//! - Stable iteration order (brick index)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bonus;
pub mod brick;
pub mod entity;
pub mod geometry;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use bonus::{Bonus, BonusKind};
pub use brick::{Brick, BrickEvent, BrickShape};
pub use entity::Movable;
pub use geometry::{Rect, Span, intersects, point_in_polygon, polygon_spans};
pub use paddle::{Paddle, PaddleInput};
pub use state::{DrawSource, GameEvent, RoundPhase, RoundState, ScriptedDraws, seeded_draws};
pub use tick::{TickInput, tick};
