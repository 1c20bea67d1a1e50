//! Daily lineup: named slots filled from the players on a given date
//!
//! Each slot takes exactly one player of the slot's category. A player can sit
//! in at most one slot. When the scheme carries a budget cap the summed price
//! of all slotted players stays within it.

use crate::error::LineupRejection;
use crate::filter::PlayerFilter;
use crate::player::Player;
use crate::scheme::{DailyScheme, SlotId};
use fantasy_scoring::ScoringTable;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLineup {
    scheme: DailyScheme,
    assignments: BTreeMap<SlotId, Player>,
}

impl DailyLineup {
    pub fn new(scheme: DailyScheme) -> Self {
        Self { scheme, assignments: BTreeMap::new() }
    }

    /// Build a lineup from a slot map, refusing the first invalid assignment
    ///
    /// Empty (`None`) slots are skipped.
    pub fn from_assignments(
        scheme: DailyScheme,
        slots: &BTreeMap<SlotId, Option<Player>>,
    ) -> Result<Self, LineupRejection> {
        let mut lineup = Self::new(scheme);
        for (slot, player) in slots {
            if let Some(player) = player {
                lineup.check_assign(*slot, player)?;
                lineup = lineup.assign(*slot, player);
            }
        }
        Ok(lineup)
    }

    pub fn scheme(&self) -> &DailyScheme {
        &self.scheme
    }

    /// Slots in display order with their occupants
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, Option<&Player>)> + '_ {
        self.scheme.slots().into_iter().map(move |slot| (slot, self.assignments.get(&slot)))
    }

    pub fn get(&self, slot: SlotId) -> Option<&Player> {
        self.assignments.get(&slot)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.assignments.values()
    }

    pub fn filled(&self) -> usize {
        self.assignments.len()
    }

    /// Slot currently holding `player_id`, if any
    pub fn slot_of(&self, player_id: u64) -> Option<SlotId> {
        self.assignments.iter().find(|(_, p)| p.id == player_id).map(|(slot, _)| *slot)
    }

    /// Summed price of every slotted player, widened so uncapped lineups cannot overflow
    pub fn total_price(&self) -> u64 {
        self.assignments.values().map(|p| u64::from(p.price)).sum()
    }

    pub fn can_assign(&self, slot: SlotId, player: &Player) -> bool {
        self.check_assign(slot, player).is_ok()
    }

    pub fn check_assign(&self, slot: SlotId, player: &Player) -> Result<(), LineupRejection> {
        if !self.scheme.contains(slot) {
            return Err(LineupRejection::UnknownSlot(slot));
        }

        if slot.category != player.category() {
            return Err(LineupRejection::CategoryMismatch {
                slot,
                expected: slot.category,
                found: player.category(),
            });
        }

        if matches!(self.slot_of(player.id), Some(existing) if existing != slot) {
            return Err(LineupRejection::AlreadySelected { player_id: player.id });
        }

        if let Some(cap) = self.scheme.budget_cap {
            let displaced = self.assignments.get(&slot).map_or(0, |p| u64::from(p.price));
            let spent = self.total_price().saturating_sub(displaced);
            let remaining = u32::try_from(u64::from(cap).saturating_sub(spent)).unwrap_or(cap);
            if player.price > remaining {
                return Err(LineupRejection::OverBudget { price: player.price, remaining });
            }
        }

        Ok(())
    }

    /// Place `player` in `slot`, replacing any occupant; a refused assignment is a no-op
    pub fn assign(&self, slot: SlotId, player: &Player) -> DailyLineup {
        let mut next = self.clone();
        if self.can_assign(slot, player) {
            next.assignments.insert(slot, player.clone());
        }
        next
    }

    pub fn clear(&self, slot: SlotId) -> DailyLineup {
        let mut next = self.clone();
        next.assignments.remove(&slot);
        next
    }

    pub fn is_complete(&self) -> bool {
        self.scheme.slots().iter().all(|slot| self.assignments.contains_key(slot))
    }

    pub fn check_complete(&self) -> Result<(), LineupRejection> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(LineupRejection::Incomplete {
                filled: self.filled(),
                required: self.scheme.slots().len(),
            })
        }
    }

    pub fn fantasy_points(&self, table: &ScoringTable) -> f64 {
        self.assignments.values().map(|p| p.fantasy_points(table)).sum()
    }

    /// Players eligible for `slot`, best first
    ///
    /// Keeps players of the slot's category that are not already slotted and
    /// that pass `filter`, ordered by points then wins, both descending.
    pub fn candidates<'a>(
        &self,
        players: &'a [Player],
        slot: SlotId,
        filter: &PlayerFilter,
    ) -> Vec<&'a Player> {
        let mut eligible: Vec<&Player> = players
            .iter()
            .filter(|p| p.category() == slot.category)
            .filter(|p| self.slot_of(p.id).is_none())
            .filter(|p| filter.matches(p))
            .collect();
        eligible.sort_by_key(|p| (Reverse(p.stats.points()), Reverse(p.stats.wins())));
        eligible
    }
}
