//! Before/after standings snapshots
//!
//! The before snapshot is the roster as loaded, sorted into standings order.
//! The after snapshot applies every pending delta once and re-sorts. The two
//! are joined back onto the athletes by name, never by index, since the
//! sort reorders rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::athlete::{Athlete, project_score, rank_order};
use super::layout::RowLayout;
use crate::error::LoadError;
use crate::settings::AthleteEntry;

/// One row of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub score: u32,
    pub pending_delta: i32,
    /// 0-based row in this snapshot
    pub rank_index: usize,
    /// Pixel offset of the row
    pub position: i32,
}

/// Immutable standings, sorted best first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    standings: Vec<Standing>,
}

impl Snapshot {
    /// Sort `(name, score, delta)` rows and assign rank offsets
    fn ranked(mut standings: Vec<Standing>, rows: RowLayout) -> Self {
        standings.sort_by(|a, b| rank_order(a.score, &a.name, b.score, &b.name));
        for (index, standing) in standings.iter_mut().enumerate() {
            standing.rank_index = index;
            standing.position = rows.offset_for_rank(index);
        }
        Self { standings }
    }

    /// Standings as loaded
    pub fn before(athletes: &[Athlete], rows: RowLayout) -> Self {
        let standings = athletes
            .iter()
            .map(|a| Standing {
                name: a.name.clone(),
                score: a.original_score,
                pending_delta: if a.is_eliminated { 0 } else { a.pending_delta },
                rank_index: 0,
                position: 0,
            })
            .collect();
        Self::ranked(standings, rows)
    }

    /// Standings once every pending delta has been applied.
    ///
    /// Deltas are zeroed in the result, so projecting a projected snapshot
    /// returns it unchanged.
    pub fn project(&self, rows: RowLayout) -> Self {
        let standings = self
            .standings
            .iter()
            .map(|s| Standing {
                score: project_score(s.score, s.pending_delta),
                pending_delta: 0,
                ..s.clone()
            })
            .collect();
        Self::ranked(standings, rows)
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn len(&self) -> usize {
        self.standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    pub fn max_score(&self) -> u32 {
        self.standings.iter().map(|s| s.score).max().unwrap_or(0)
    }

    /// Name lookup table for joining snapshots
    pub fn by_name(&self) -> HashMap<&str, &Standing> {
        self.standings.iter().map(|s| (s.name.as_str(), s)).collect()
    }
}

/// Everything the animation needs for one round
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Athletes in before-snapshot order, with original and projected state filled in
    pub athletes: Vec<Athlete>,
    pub before: Snapshot,
    pub after: Snapshot,
    /// Highest score in the after snapshot
    pub max_score: u32,
}

/// Build both snapshots from the configured roster and join them onto the athletes
pub fn compute(entries: &[AthleteEntry], rows: RowLayout) -> Result<Transition, LoadError> {
    let loaded: Vec<Athlete> = entries.iter().map(Athlete::from_entry).collect();

    let before = Snapshot::before(&loaded, rows);
    let after = before.project(rows);

    let loaded_by_name: HashMap<&str, &Athlete> =
        loaded.iter().map(|a| (a.name.as_str(), a)).collect();
    let after_by_name = after.by_name();

    let mut athletes = Vec::with_capacity(before.len());
    for standing in before.standings() {
        let source = loaded_by_name
            .get(standing.name.as_str())
            .ok_or_else(|| LoadError::MissingAthlete(standing.name.clone()))?;
        let projected = after_by_name
            .get(standing.name.as_str())
            .ok_or_else(|| LoadError::MissingAthlete(standing.name.clone()))?;

        let mut athlete = (*source).clone();
        athlete.original_score = standing.score;
        athlete.original_position = standing.position;
        athlete.projected_score = projected.score;
        athlete.projected_position = projected.position;
        athlete.pending_delta = 0;
        athlete.reset_to_original();
        athletes.push(athlete);
    }

    let max_score = after.max_score();
    log::debug!(
        "Computed standings for {} athletes, max projected score {max_score}",
        athletes.len()
    );

    Ok(Transition {
        athletes,
        before,
        after,
        max_score,
    })
}
