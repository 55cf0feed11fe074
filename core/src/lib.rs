#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};

use serde::{Deserialize, Serialize};

pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use movement::*;
pub use search::*;
pub use solver::*;
pub use tile::*;
pub use types::*;
pub use validator::*;

mod difficulty;
mod engine;
mod error;
mod generator;
mod grid;
mod movement;
mod search;
mod solver;
mod tile;
mod types;
mod validator;

/// Version tag of the generation algorithm, bumped when seeds stop reproducing old boards.
pub const GENERATOR_VERSION: &str = "1.0";

pub const DEFAULT_BOARD_SIZE: Coord = 14;
pub const DEFAULT_WALL_WIDTH: Coord = 1;
pub const DEFAULT_START: Point = Point::new(1, 1);
pub const DEFAULT_OBSTACLES: CellCount = 5;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5000;

/// Parameters for generating one board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub wall_width: Coord,
    pub player_start: Point,
    pub start_direction: Direction,
    pub obstacle_count: CellCount,
    pub difficulty: Difficulty,
    /// Generation gives up after this many rejected candidates.
    pub max_attempts: u32,
    /// Generator version the config was written for.
    pub version: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            wall_width: DEFAULT_WALL_WIDTH,
            player_start: DEFAULT_START,
            start_direction: Direction::Down,
            obstacle_count: DEFAULT_OBSTACLES,
            difficulty: Difficulty::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            version: GENERATOR_VERSION.to_string(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyDimensions);
        }

        let ring = 2 * u16::from(self.wall_width);
        if ring >= u16::from(self.rows) || ring >= u16::from(self.cols) {
            return Err(ConfigError::WallTooThick {
                wall_width: self.wall_width,
                rows: self.rows,
                cols: self.cols,
            });
        }

        if !self.is_interior(self.player_start) {
            return Err(ConfigError::StartOutsideInterior);
        }

        if self.interior_cells() < 2 {
            return Err(ConfigError::NoRoomForFlag);
        }

        self.difficulty.tier().validate()?;

        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }

        Ok(())
    }

    pub const fn interior_size(&self) -> (Coord, Coord) {
        let inset = self.wall_width.saturating_mul(2);
        (
            self.cols.saturating_sub(inset),
            self.rows.saturating_sub(inset),
        )
    }

    pub const fn interior_cells(&self) -> CellCount {
        let (cols, rows) = self.interior_size();
        mult(cols, rows)
    }

    pub const fn is_interior(&self, at: Point) -> bool {
        inside_ring(at, self.wall_width, self.cols, self.rows)
    }
}

/// A generated, solvable board. Never changes once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    grid: TileGrid,
    wall_width: Coord,
    player_start: Point,
    flag: Point,
    start_direction: Direction,
    min_moves: CellCount,
    requested_obstacles: CellCount,
    placed_obstacles: CellCount,
    attempts: u32,
}

/// Unchecked [`Board`] as read from disk.
#[derive(Deserialize)]
struct RawBoard {
    grid: TileGrid,
    wall_width: Coord,
    player_start: Point,
    flag: Point,
    start_direction: Direction,
    min_moves: CellCount,
    requested_obstacles: CellCount,
    placed_obstacles: CellCount,
    attempts: u32,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let flag = check_layout(&raw.grid, raw.wall_width, raw.player_start)?;
        if flag != raw.flag {
            return Err(BoardError::InvalidCoords);
        }

        let measured =
            measure_min_moves(&raw.grid, raw.player_start, flag)?.ok_or(BoardError::Unsolvable)?;
        if measured != raw.min_moves {
            return Err(BoardError::MoveCountMismatch {
                stored: raw.min_moves,
                measured,
            });
        }

        Ok(Self {
            grid: raw.grid,
            wall_width: raw.wall_width,
            player_start: raw.player_start,
            flag,
            start_direction: raw.start_direction,
            min_moves: measured,
            requested_obstacles: raw.requested_obstacles,
            placed_obstacles: raw.placed_obstacles,
            attempts: raw.attempts,
        })
    }
}

/// Checks the wall ring, the player start and the single flag, returning the flag.
fn check_layout(grid: &TileGrid, wall_width: Coord, player_start: Point) -> Result<Point> {
    if usize::from(grid.rows()) * usize::from(grid.cols()) != grid.cell_count() {
        return Err(BoardError::InvalidBoardShape);
    }

    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let at = Point::new(x, y);
            let tile = grid.tile(at).ok_or(BoardError::InvalidCoords)?;
            if tile.location() != at {
                return Err(BoardError::InvalidCoords);
            }
            if !grid.is_interior(at, wall_width) && tile.kind() != TileKind::Wall {
                return Err(BoardError::OpenWallRing(at));
            }
        }
    }

    if !grid.is_interior(player_start, wall_width)
        || matches!(grid.tile(player_start), None | Some(Tile::Wall(_)))
    {
        return Err(BoardError::InvalidCoords);
    }

    let flag = {
        let mut flags = grid.find(TileKind::Flag);
        match (flags.next(), flags.next()) {
            (Some(flag), None) => flag,
            _ => return Err(BoardError::InvalidFlagCount(grid.count(TileKind::Flag))),
        }
    };
    if flag == player_start {
        return Err(BoardError::InvalidCoords);
    }
    Ok(flag)
}

impl Board {
    /// Wraps a hand-made grid, measuring its minimum moves.
    ///
    /// Everything outside the `wall_width` ring must be wall, the start must lie inside it,
    /// and the grid must hold exactly one reachable flag.
    pub fn from_grid(
        grid: TileGrid,
        wall_width: Coord,
        player_start: Point,
        start_direction: Direction,
    ) -> Result<Self> {
        let flag = check_layout(&grid, wall_width, player_start)?;
        let min_moves = measure_min_moves(&grid, player_start, flag)?.ok_or(BoardError::Unsolvable)?;
        let obstacles = CellCount::try_from(grid.obstacles().len()).unwrap_or(CellCount::MAX);

        Ok(Self {
            grid,
            wall_width,
            player_start,
            flag,
            start_direction,
            min_moves,
            requested_obstacles: obstacles,
            placed_obstacles: obstacles,
            attempts: 0,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rows(&self) -> Coord {
        self.grid.rows()
    }

    pub fn cols(&self) -> Coord {
        self.grid.cols()
    }

    pub fn wall_width(&self) -> Coord {
        self.wall_width
    }

    pub fn player_start(&self) -> Point {
        self.player_start
    }

    pub fn flag(&self) -> Point {
        self.flag
    }

    pub fn start_direction(&self) -> Direction {
        self.start_direction
    }

    pub fn min_moves(&self) -> CellCount {
        self.min_moves
    }

    pub fn requested_obstacles(&self) -> CellCount {
        self.requested_obstacles
    }

    pub fn placed_obstacles(&self) -> CellCount {
        self.placed_obstacles
    }

    /// Whether fewer obstacles were placed than requested.
    pub fn is_underfilled(&self) -> bool {
        self.placed_obstacles < self.requested_obstacles
    }

    /// Generation attempts spent on this board, zero for hand-made boards.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn tile(&self, at: Point) -> Option<Tile> {
        self.grid.tile(at)
    }
}
