//! Reveal phase sequencing
//!
//! Phases advance in a fixed order, one step per accepted advance signal.
//! A signal is only accepted once the running phase has finished animating.

use serde::{Deserialize, Serialize};

use super::state::ScoreboardState;

/// Current phase of the reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Showing the standings as loaded, waiting for the first advance
    #[default]
    Idle,
    /// Bars grow from original to projected score, rows stay put
    ScoreReveal,
    /// Rows slide from original to projected rank
    PositionReveal,
    /// The lowest-ranked athlete still in is eliminated, label fades in
    EliminationReveal,
    /// Round over, no further input accepted
    Done,
}

impl Phase {
    /// Phase entered by the next accepted advance
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Idle => Some(Phase::ScoreReveal),
            Phase::ScoreReveal => Some(Phase::PositionReveal),
            Phase::PositionReveal => Some(Phase::EliminationReveal),
            Phase::EliminationReveal => Some(Phase::Done),
            Phase::Done => None,
        }
    }

    /// True for phases that the advance signal can move forward from
    pub fn accepts_advance(self) -> bool {
        matches!(
            self,
            Phase::Idle | Phase::ScoreReveal | Phase::PositionReveal
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::ScoreReveal => "ScoreReveal",
            Phase::PositionReveal => "PositionReveal",
            Phase::EliminationReveal => "EliminationReveal",
            Phase::Done => "Done",
        }
    }
}

/// Handle one advance signal. Returns true if the phase changed.
///
/// Ignored while the current phase is still animating, during the
/// elimination reveal (which finishes on its own) and once done.
pub fn handle_advance(state: &mut ScoreboardState) -> bool {
    if !state.ready_to_advance || !state.phase.accepts_advance() {
        return false;
    }

    let Some(next) = state.phase.next() else {
        return false;
    };

    enter_phase(state, next);
    true
}

/// Switch to `phase` and restart interpolation
pub(crate) fn enter_phase(state: &mut ScoreboardState, phase: Phase) {
    log::info!("Phase {} -> {}", state.phase.as_str(), phase.as_str());

    state.phase = phase;
    state.interpolation = 0.0;
    state.elimination_elected = false;
    state.newly_eliminated = None;
    state.ready_to_advance = phase == Phase::Done;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::tests::sample_state;

    #[test]
    fn test_sequence_order() {
        let mut phase = Phase::Idle;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            phase = next;
            seen.push(phase);
        }
        assert_eq!(
            seen,
            [
                Phase::Idle,
                Phase::ScoreReveal,
                Phase::PositionReveal,
                Phase::EliminationReveal,
                Phase::Done
            ]
        );
    }

    #[test]
    fn test_idle_is_immediately_ready() {
        let mut state = sample_state();
        assert!(state.ready_to_advance);
        assert!(handle_advance(&mut state));
        assert_eq!(state.phase, Phase::ScoreReveal);
        assert_eq!(state.interpolation, 0.0);
        assert!(!state.ready_to_advance);
    }

    #[test]
    fn test_advance_ignored_mid_animation() {
        let mut state = sample_state();
        handle_advance(&mut state);
        state.interpolation = 0.5;
        assert!(!handle_advance(&mut state));
        assert_eq!(state.phase, Phase::ScoreReveal);
        assert_eq!(state.interpolation, 0.5);
    }

    #[test]
    fn test_advance_accepted_once_ready() {
        let mut state = sample_state();
        handle_advance(&mut state);
        state.interpolation = 1.0;
        state.ready_to_advance = true;

        assert!(handle_advance(&mut state));
        assert_eq!(state.phase, Phase::PositionReveal);
        // Second signal before the new phase finishes is a no-op
        assert!(!handle_advance(&mut state));
        assert_eq!(state.phase, Phase::PositionReveal);
    }

    #[test]
    fn test_done_accepts_nothing() {
        let mut state = sample_state();
        enter_phase(&mut state, Phase::Done);
        assert!(state.ready_to_advance);
        assert!(!handle_advance(&mut state));
        assert_eq!(state.phase, Phase::Done);
    }

    #[test]
    fn test_elimination_reveal_ignores_signal() {
        let mut state = sample_state();
        enter_phase(&mut state, Phase::EliminationReveal);
        state.ready_to_advance = true;
        assert!(!handle_advance(&mut state));
        assert_eq!(state.phase, Phase::EliminationReveal);
    }
}
