//! Deterministic scoreboard simulation
//!
//! All ranking and animation logic lives here. This module must stay pure:
//! - Elapsed time is passed in, never read from a clock
//! - Athletes are correlated across sorts by name, never by index
//! - No rendering or platform dependencies

pub mod athlete;
pub mod layout;
pub mod phase;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use athlete::{Athlete, project_score, rank_order, sort_standings};
pub use layout::{BarScale, RowLayout, available_bar_pixels, proportional_width};
pub use phase::{Phase, handle_advance};
pub use snapshot::{Snapshot, Standing, Transition, compute};
pub use state::ScoreboardState;
pub use tick::{TickEvents, tick};
