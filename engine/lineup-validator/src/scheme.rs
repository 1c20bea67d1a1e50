//! Roster slot schemes
//!
//! Two product flows exist side by side and never share state: the budget
//! lineup (3 forwards, 2 defensemen, 1 goalie under a 200-unit cap) and the
//! daily lineup (named slots F1-F5, D1-D3, G1 with no cap by default).

use fantasy_scoring::PositionCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default salary cap for the budget lineup
pub const DEFAULT_BUDGET_CAP: u32 = 200;

/// Position capacities and salary cap for the budget lineup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetScheme {
    pub forwards: usize,
    pub defense: usize,
    pub goalies: usize,
    pub cap: u32,
}

impl Default for BudgetScheme {
    fn default() -> Self {
        Self { forwards: 3, defense: 2, goalies: 1, cap: DEFAULT_BUDGET_CAP }
    }
}

impl BudgetScheme {
    pub fn capacity(&self, category: PositionCategory) -> usize {
        match category {
            PositionCategory::Forward => self.forwards,
            PositionCategory::Defense => self.defense,
            PositionCategory::Goalie => self.goalies,
        }
    }

    /// Number of players in a complete lineup
    pub fn roster_size(&self) -> usize {
        self.forwards + self.defense + self.goalies
    }
}

/// Slot layout for the daily lineup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScheme {
    pub forwards: u8,
    pub defense: u8,
    pub goalies: u8,

    /// Optional salary cap; the daily flow carries none by default
    pub budget_cap: Option<u32>,
}

impl Default for DailyScheme {
    fn default() -> Self {
        Self { forwards: 5, defense: 3, goalies: 1, budget_cap: None }
    }
}

impl DailyScheme {
    pub fn slot_count(&self, category: PositionCategory) -> u8 {
        match category {
            PositionCategory::Forward => self.forwards,
            PositionCategory::Defense => self.defense,
            PositionCategory::Goalie => self.goalies,
        }
    }

    /// Every slot in display order: forwards, then defense, then goalies
    pub fn slots(&self) -> Vec<SlotId> {
        PositionCategory::ALL
            .into_iter()
            .flat_map(|category| {
                (1..=self.slot_count(category)).map(move |index| SlotId { category, index })
            })
            .collect()
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        slot.index >= 1 && slot.index <= self.slot_count(slot.category)
    }
}

/// Named lineup slot such as `F1` or `G1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotId {
    pub category: PositionCategory,
    /// 1-based index within the category
    pub index: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid slot identifier: '{0}'")]
pub struct InvalidSlot(pub String);

impl SlotId {
    pub fn new(category: PositionCategory, index: u8) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category.short_label(), self.index)
    }
}

impl FromStr for SlotId {
    type Err = InvalidSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let prefix = chars.next().ok_or_else(|| InvalidSlot(s.to_string()))?;
        let category = prefix
            .to_string()
            .parse::<PositionCategory>()
            .map_err(|_| InvalidSlot(s.to_string()))?;
        let index = chars.as_str().parse::<u8>().map_err(|_| InvalidSlot(s.to_string()))?;
        if index == 0 {
            return Err(InvalidSlot(s.to_string()));
        }
        Ok(Self { category, index })
    }
}

impl TryFrom<String> for SlotId {
    type Error = InvalidSlot;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotId> for String {
    fn from(slot: SlotId) -> Self {
        slot.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_scheme_defaults() {
        let scheme = BudgetScheme::default();
        assert_eq!(scheme.capacity(PositionCategory::Forward), 3);
        assert_eq!(scheme.capacity(PositionCategory::Defense), 2);
        assert_eq!(scheme.capacity(PositionCategory::Goalie), 1);
        assert_eq!(scheme.roster_size(), 6);
        assert_eq!(scheme.cap, 200);
    }

    #[test]
    fn test_daily_slots_in_order() {
        let labels: Vec<String> =
            DailyScheme::default().slots().into_iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, vec!["F1", "F2", "F3", "F4", "F5", "D1", "D2", "D3", "G1"]);
    }

    #[test]
    fn test_slot_parsing() {
        let slot: SlotId = "d2".parse().unwrap();
        assert_eq!(slot, SlotId::new(PositionCategory::Defense, 2));
        assert!("F0".parse::<SlotId>().is_err());
        assert!("X1".parse::<SlotId>().is_err());
        assert!("F".parse::<SlotId>().is_err());
        assert!("".parse::<SlotId>().is_err());
    }

    #[test]
    fn test_scheme_contains() {
        let scheme = DailyScheme::default();
        assert!(scheme.contains(SlotId::new(PositionCategory::Forward, 5)));
        assert!(!scheme.contains(SlotId::new(PositionCategory::Forward, 6)));
        assert!(!scheme.contains(SlotId::new(PositionCategory::Goalie, 2)));
    }

    #[test]
    fn test_slot_ids_as_json_map_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(SlotId::new(PositionCategory::Goalie, 1), 1);
        map.insert(SlotId::new(PositionCategory::Forward, 2), 2);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"F2":2,"G1":1}"#);

        let back: std::collections::BTreeMap<SlotId, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
