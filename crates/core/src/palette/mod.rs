//! Deterministic colour assignment for shareholders and rounds.

mod palette_assignment;
mod palette_model;

pub use palette_assignment::{badge_color, round_color, shareholder_color};
pub use palette_model::*;
