//! Scoreboard state
//!
//! Single owner of the roster and the phase/interpolation scalars. Only
//! `tick` and `handle_advance` mutate it; rendering reads it.

use serde::{Deserialize, Serialize};

use super::athlete::{Athlete, rank_order};
use super::phase::Phase;
use super::snapshot::Transition;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreboardState {
    /// Athletes in before-snapshot order. Never reordered.
    pub athletes: Vec<Athlete>,
    /// Highest projected score, drives bar scaling
    pub max_score: u32,
    pub phase: Phase,
    /// Progress of the running phase, 0..=1
    pub interpolation: f32,
    /// True once the running phase has finished (and while idle)
    pub ready_to_advance: bool,
    /// Athlete whose "ELIMINATED" label is fading in
    pub newly_eliminated: Option<String>,
    /// Set once the elimination of the current phase entry has been elected
    pub elimination_elected: bool,
}

impl ScoreboardState {
    pub fn new(transition: Transition) -> Self {
        let Transition {
            athletes, max_score, ..
        } = transition;

        Self {
            athletes,
            max_score,
            phase: Phase::Idle,
            interpolation: 0.0,
            ready_to_advance: true,
            newly_eliminated: None,
            elimination_elected: false,
        }
    }

    pub fn athlete(&self, name: &str) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.name == name)
    }

    pub(crate) fn athlete_mut(&mut self, name: &str) -> Option<&mut Athlete> {
        self.athletes.iter_mut().find(|a| a.name == name)
    }

    /// True once the score reveal has finished and projected scores are on display
    pub fn scores_revealed(&self) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::ScoreReveal => self.ready_to_advance,
            Phase::PositionReveal | Phase::EliminationReveal | Phase::Done => true,
        }
    }

    /// Athletes ranked best first: by original score until the score reveal
    /// completes, by projected score after.
    pub fn standings(&self) -> Vec<&Athlete> {
        let mut order: Vec<&Athlete> = self.athletes.iter().collect();
        if self.scores_revealed() {
            order.sort_by(|a, b| a.rank_cmp(b));
        } else {
            order.sort_by(|a, b| {
                rank_order(a.original_score, &a.name, b.original_score, &b.name)
            });
        }
        order
    }

    /// Alpha of the "ELIMINATED" label for `athlete`.
    ///
    /// Fully opaque except for the athlete being eliminated right now, whose
    /// label fades in with the phase interpolation.
    pub fn eliminated_label_alpha(&self, athlete: &Athlete) -> u8 {
        match &self.newly_eliminated {
            Some(name) if *name == athlete.name => {
                (self.interpolation.clamp(0.0, 1.0) * 255.0) as u8
            }
            _ => u8::MAX,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }
}
