use crate::player::Player;
use fantasy_scoring::PositionCategory;
use serde::{Deserialize, Serialize};

/// Player-list filter used by the selection screens
///
/// Empty fields match everything. Team comparison is exact, name search is a
/// case-insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerFilter {
    pub team: Option<String>,
    pub category: Option<PositionCategory>,
    pub search: Option<String>,
}

impl PlayerFilter {
    pub fn matches(&self, player: &Player) -> bool {
        if let Some(team) = self.team.as_deref().filter(|t| !t.is_empty()) {
            if player.team != team {
                return false;
            }
        }

        if let Some(category) = self.category {
            if player.category() != category {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !player.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::fixtures::{defenseman, forward, goalie};

    fn pool() -> Vec<Player> {
        let mut mcdavid = forward(1, 50);
        mcdavid.name = "Connor McDavid".to_string();
        let mut bouchard = defenseman(2, 30);
        bouchard.name = "Evan Bouchard".to_string();
        let mut swayman = goalie(3, 35);
        swayman.name = "Jeremy Swayman".to_string();
        vec![mcdavid, bouchard, swayman]
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let players = pool();
        assert_eq!(PlayerFilter::default().apply(&players).len(), 3);
    }

    #[test]
    fn test_team_filter() {
        let players = pool();
        let filter = PlayerFilter { team: Some("BOS".to_string()), ..Default::default() };
        let matched = filter.apply(&players);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let players = pool();
        let filter = PlayerFilter { search: Some("mcDAV".to_string()), ..Default::default() };
        let matched = filter.apply(&players);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Connor McDavid");
    }

    #[test]
    fn test_category_filter() {
        let players = pool();
        let filter =
            PlayerFilter { category: Some(PositionCategory::Defense), ..Default::default() };
        assert_eq!(filter.apply(&players)[0].id, 2);
    }
}
