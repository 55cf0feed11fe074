use thiserror::Error;

use crate::{CellCount, Point};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board rows do not all have the same length")]
    InvalidBoardShape,
    #[error("Unknown tile symbol {0:?}")]
    InvalidTile(char),
    #[error("Unknown direction")]
    InvalidDirection,
    #[error("Board must have exactly one flag, found {0}")]
    InvalidFlagCount(usize),
    #[error("Tile {0} inside the wall ring is not a wall")]
    OpenWallRing(Point),
    #[error("Flag cannot be reached from the player start")]
    Unsolvable,
    #[error("Board claims {stored} moves but solves in {measured}")]
    MoveCountMismatch { stored: CellCount, measured: CellCount },
    #[error("Invalid board configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("No acceptable board found after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("Path ancestry exceeded {limit} nodes while counting breakable obstacles")]
    PathAccountingOverflow { limit: usize },
    #[error("Stage already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Saved session does not fit its board")]
    InvalidSession,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board dimensions must be positive")]
    EmptyDimensions,
    #[error("Wall width {wall_width} leaves no interior on a {rows}x{cols} board")]
    WallTooThick {
        wall_width: u8,
        rows: u8,
        cols: u8,
    },
    #[error("Player start must lie inside the walls")]
    StartOutsideInterior,
    #[error("Interior has no free cell for the flag")]
    NoRoomForFlag,
    #[error("Difficulty band {min}..={max} is empty")]
    InvalidDifficulty { min: CellCount, max: CellCount },
    #[error("Attempt budget must be at least one")]
    NoAttempts,
}

pub type Result<T> = core::result::Result<T, BoardError>;
