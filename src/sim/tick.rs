//! Animation tick
//!
//! Advances the running phase by wall-clock time. Interpolation moves from 0
//! to 1 over `SECONDS_PER_FULL_TRANSITION`, independent of frame rate; a long
//! stall snaps straight to the after-state.

use super::phase::{Phase, enter_phase};
use super::state::ScoreboardState;
use crate::consts::SECONDS_PER_FULL_TRANSITION;
use crate::lerp;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Athlete eliminated on this tick
    pub eliminated: Option<String>,
    /// Phase that finished animating on this tick
    pub completed: Option<Phase>,
}

/// Which interpolated value a phase drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Score,
    Position,
}

/// Advance the scoreboard by `dt` seconds of wall-clock time
pub fn tick(state: &mut ScoreboardState, dt: f32) -> TickEvents {
    let mut events = TickEvents::default();

    // Negative or NaN elapsed time never moves the animation backwards
    let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
    let step = dt / SECONDS_PER_FULL_TRANSITION;

    match state.phase {
        Phase::Idle | Phase::Done => {}
        Phase::ScoreReveal => animate(state, Channel::Score, step, &mut events),
        Phase::PositionReveal => animate(state, Channel::Position, step, &mut events),
        Phase::EliminationReveal => {
            if !state.elimination_elected {
                state.elimination_elected = true;
                events.eliminated = elect_elimination(state);
            }

            state.interpolation += step;

            if state.interpolation >= 1.0 {
                state.interpolation = 1.0;
                state.newly_eliminated = None;
                events.completed = Some(Phase::EliminationReveal);
                enter_phase(state, Phase::Done);
            }
        }
    }

    events
}

/// Interpolate one channel, then advance. Clamps to the exact after-state on overshoot.
fn animate(state: &mut ScoreboardState, channel: Channel, step: f32, events: &mut TickEvents) {
    if state.ready_to_advance {
        return;
    }

    apply(state, channel, state.interpolation);
    state.interpolation += step;

    if state.interpolation >= 1.0 {
        state.interpolation = 1.0;
        apply(state, channel, 1.0);
        state.ready_to_advance = true;
        events.completed = Some(state.phase);
    }
}

fn apply(state: &mut ScoreboardState, channel: Channel, t: f32) {
    for athlete in &mut state.athletes {
        match channel {
            Channel::Score => {
                athlete.current_score = lerp(
                    athlete.original_score as f32,
                    athlete.projected_score as f32,
                    t,
                );
            }
            Channel::Position => {
                athlete.current_position = lerp(
                    athlete.original_position as f32,
                    athlete.projected_position as f32,
                    t,
                );
            }
        }
    }
}

/// Eliminate the lowest-ranked athlete not yet eliminated.
///
/// Walks the standings from the bottom up; athletes already out are skipped,
/// so at most one athlete is eliminated per call.
fn elect_elimination(state: &mut ScoreboardState) -> Option<String> {
    let name = state
        .standings()
        .into_iter()
        .rev()
        .find(|a| !a.is_eliminated)
        .map(|a| a.name.clone())?;

    if let Some(athlete) = state.athlete_mut(&name) {
        athlete.is_eliminated = true;
    }
    state.newly_eliminated = Some(name.clone());
    log::info!("{name} eliminated");

    Some(name)
}
