use core::fmt;
use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::*;

/// Accepted band of total moves for a generated board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTier {
    min_moves: CellCount,
    max_moves: CellCount,
}

impl DifficultyTier {
    pub const fn new_unchecked(min_moves: CellCount, max_moves: CellCount) -> Self {
        Self {
            min_moves,
            max_moves,
        }
    }

    pub fn new(min_moves: CellCount, max_moves: CellCount) -> Result<Self> {
        let tier = Self::new_unchecked(min_moves, max_moves);
        tier.validate()?;
        Ok(tier)
    }

    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.min_moves > self.max_moves {
            Err(ConfigError::InvalidDifficulty {
                min: self.min_moves,
                max: self.max_moves,
            })
        } else {
            Ok(())
        }
    }

    pub const fn min_moves(&self) -> CellCount {
        self.min_moves
    }

    pub const fn max_moves(&self) -> CellCount {
        self.max_moves
    }

    pub const fn contains(&self, moves: CellCount) -> bool {
        self.min_moves <= moves && moves <= self.max_moves
    }

    pub const fn range(&self) -> RangeInclusive<CellCount> {
        self.min_moves..=self.max_moves
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min_moves, self.max_moves)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Custom(DifficultyTier),
}

impl Difficulty {
    pub const fn tier(self) -> DifficultyTier {
        match self {
            Self::Easy => DifficultyTier::new_unchecked(3, 7),
            Self::Medium => DifficultyTier::new_unchecked(8, 16),
            Self::Hard => DifficultyTier::new_unchecked(12, 24),
            Self::Custom(tier) => tier,
        }
    }
}

impl From<DifficultyTier> for Difficulty {
    fn from(tier: DifficultyTier) -> Self {
        Self::Custom(tier)
    }
}
