use crate::scheme::SlotId;
use fantasy_scoring::PositionCategory;
use thiserror::Error;

/// Reason a lineup transition was refused
///
/// Transitions themselves never fail; a refused add or assign leaves the
/// lineup unchanged. Callers that report the reason ask for it through the
/// `check_*` methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupRejection {
    #[error("Player {player_id} is already in the lineup")]
    AlreadySelected { player_id: u64 },

    #[error("All {capacity} {category} slots are filled")]
    PositionFull { category: PositionCategory, capacity: usize },

    #[error("Price {price} exceeds remaining budget {remaining}")]
    OverBudget { price: u32, remaining: u32 },

    #[error("Slot {0} does not exist in this lineup")]
    UnknownSlot(SlotId),

    #[error("Slot {slot} takes {expected} players, got {found}")]
    CategoryMismatch { slot: SlotId, expected: PositionCategory, found: PositionCategory },

    #[error("Lineup incomplete: {filled} of {required} players selected")]
    Incomplete { filled: usize, required: usize },
}

impl LineupRejection {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LineupRejection::AlreadySelected { .. } => "ALREADY_SELECTED",
            LineupRejection::PositionFull { .. } => "POSITION_FULL",
            LineupRejection::OverBudget { .. } => "OVER_BUDGET",
            LineupRejection::UnknownSlot(_) => "UNKNOWN_SLOT",
            LineupRejection::CategoryMismatch { .. } => "CATEGORY_MISMATCH",
            LineupRejection::Incomplete { .. } => "INCOMPLETE_LINEUP",
        }
    }
}
