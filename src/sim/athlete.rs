//! Athlete entity and ranking order

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::renderer::Colour;
use crate::settings::AthleteEntry;

/// Compare two (score, name) pairs in standings order.
///
/// Higher score ranks first; equal scores rank by ascending name.
/// `Ordering::Less` means `a` ranks above `b`.
#[inline]
pub fn rank_order(a_score: u32, a_name: &str, b_score: u32, b_name: &str) -> Ordering {
    b_score.cmp(&a_score).then_with(|| a_name.cmp(b_name))
}

/// Apply a signed delta to a score, saturating at zero and `u32::MAX`.
///
/// Projecting an already-projected score with its delta zeroed is a no-op.
#[inline]
pub fn project_score(score: u32, delta: i32) -> u32 {
    score.saturating_add_signed(delta)
}

/// One competitor on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub name: String,
    pub colour: Colour,

    /// Points still to be applied; zero once the after-state has been computed
    pub pending_delta: i32,
    /// Sticky: never goes back to false
    pub is_eliminated: bool,

    /// Score going into the current round
    pub original_score: u32,
    /// Score shown right now
    pub current_score: f32,
    /// Score after the round
    pub projected_score: u32,

    /// Vertical offset before re-ranking
    pub original_position: i32,
    /// Vertical offset shown right now
    pub current_position: f32,
    /// Vertical offset after re-ranking
    pub projected_position: i32,
}

impl Athlete {
    /// Build an athlete from its config entry. Eliminated athletes never gain points.
    pub fn from_entry(entry: &AthleteEntry) -> Self {
        let pending_delta = if entry.is_eliminated {
            0
        } else {
            entry.points_to_add
        };

        Self {
            name: entry.name.clone(),
            colour: entry.colour,
            pending_delta,
            is_eliminated: entry.is_eliminated,
            original_score: entry.current_score,
            current_score: entry.current_score as f32,
            projected_score: entry.current_score,
            original_position: 0,
            current_position: 0.0,
            projected_position: 0,
        }
    }

    /// Standings order once the round's points are in.
    ///
    /// Compares the exact projected scores, never the `f32` display value,
    /// which cannot tell large scores apart.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        rank_order(
            self.projected_score,
            &self.name,
            other.projected_score,
            &other.name,
        )
    }

    /// True if `self` ranks strictly above `other`
    pub fn is_higher_ranked(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Less
    }

    /// Snap displayed score and position to the before-state
    pub fn reset_to_original(&mut self) {
        self.current_score = self.original_score as f32;
        self.current_position = self.original_position as f32;
    }
}

/// Sort athletes into standings order by projected score
pub fn sort_standings(athletes: &mut [Athlete]) {
    athletes.sort_by(Athlete::rank_cmp);
}
