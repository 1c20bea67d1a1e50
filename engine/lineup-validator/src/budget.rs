//! Budget lineup: six players under a salary cap
//!
//! State is an immutable value. `add_player` and `remove_player` return the
//! next state and leave the receiver untouched; a refused add returns a copy
//! equal to the receiver.

use crate::error::LineupRejection;
use crate::player::Player;
use crate::scheme::BudgetScheme;
use fantasy_scoring::{PositionCategory, ScoringTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineup {
    scheme: BudgetScheme,
    players: Vec<Player>,
    remaining: u32,
}

impl Default for BudgetLineup {
    fn default() -> Self {
        Self::new(BudgetScheme::default())
    }
}

impl BudgetLineup {
    /// Empty lineup with the full cap available
    pub fn new(scheme: BudgetScheme) -> Self {
        Self { scheme, players: Vec::new(), remaining: scheme.cap }
    }

    /// Build a lineup by replaying players in order, stopping at the first refusal
    pub fn from_players<'a, I>(scheme: BudgetScheme, players: I) -> Result<Self, LineupRejection>
    where
        I: IntoIterator<Item = &'a Player>,
    {
        let mut lineup = Self::new(scheme);
        for player in players {
            lineup.check_add(player)?;
            lineup = lineup.add_player(player);
        }
        Ok(lineup)
    }

    pub fn scheme(&self) -> &BudgetScheme {
        &self.scheme
    }

    /// Selected players in the order they were added
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn remaining_budget(&self) -> u32 {
        self.remaining
    }

    pub fn total_spent(&self) -> u32 {
        self.scheme.cap - self.remaining
    }

    pub fn contains(&self, player_id: u64) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn position_count(&self, category: PositionCategory) -> usize {
        self.players.iter().filter(|p| p.category() == category).count()
    }

    pub fn can_add(&self, candidate: &Player) -> bool {
        self.check_add(candidate).is_ok()
    }

    /// First reason `candidate` cannot be added: duplicate, position full, over budget
    pub fn check_add(&self, candidate: &Player) -> Result<(), LineupRejection> {
        if self.contains(candidate.id) {
            return Err(LineupRejection::AlreadySelected { player_id: candidate.id });
        }

        let category = candidate.category();
        let capacity = self.scheme.capacity(category);
        if self.position_count(category) >= capacity {
            return Err(LineupRejection::PositionFull { category, capacity });
        }

        if candidate.price > self.remaining {
            return Err(LineupRejection::OverBudget {
                price: candidate.price,
                remaining: self.remaining,
            });
        }

        Ok(())
    }

    pub fn add_player(&self, candidate: &Player) -> BudgetLineup {
        if !self.can_add(candidate) {
            return self.clone();
        }

        let mut next = self.clone();
        next.remaining -= candidate.price;
        next.players.push(candidate.clone());
        next
    }

    /// Remove the player with `player_id` and refund its price
    pub fn remove_player(&self, player_id: u64) -> BudgetLineup {
        let mut next = self.clone();
        if let Some(index) = next.players.iter().position(|p| p.id == player_id) {
            let removed = next.players.remove(index);
            next.remaining += removed.price;
        }
        next
    }

    /// Every category filled to exactly its capacity
    pub fn is_complete(&self) -> bool {
        PositionCategory::ALL
            .into_iter()
            .all(|category| self.position_count(category) == self.scheme.capacity(category))
    }

    pub fn check_complete(&self) -> Result<(), LineupRejection> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(LineupRejection::Incomplete {
                filled: self.players.len(),
                required: self.scheme.roster_size(),
            })
        }
    }

    /// Sum of season points across skaters
    pub fn total_points(&self) -> u32 {
        self.players.iter().map(|p| p.stats.points()).sum()
    }

    pub fn fantasy_points(&self, table: &ScoringTable) -> f64 {
        self.players.iter().map(|p| p.fantasy_points(table)).sum()
    }
}
