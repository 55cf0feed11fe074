use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read access to a board, shared by the static grid and overlays on top of it.
pub trait TileLookup {
    /// `(cols, rows)`, in the order [`Point::step`] expects.
    fn bounds(&self) -> (Coord, Coord);

    /// Tile at `at`, `None` when out of bounds.
    fn tile(&self, at: Point) -> Option<Tile>;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Array2<Tile>,
}

impl TileGrid {
    /// A `rows` x `cols` grid of walls with an empty interior inset by `wall_width`.
    pub fn walled(rows: Coord, cols: Coord, wall_width: Coord) -> Self {
        let mut grid = Self {
            tiles: Array2::from_shape_fn((usize::from(rows), usize::from(cols)), |(row, col)| {
                Tile::Wall(Point::new(col as Coord, row as Coord))
            }),
        };
        grid.reset_interior(wall_width);
        grid
    }

    pub fn rows(&self) -> Coord {
        self.tiles.nrows() as Coord
    }

    pub fn cols(&self) -> Coord {
        self.tiles.ncols() as Coord
    }

    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn in_bounds(&self, at: Point) -> bool {
        at.x < self.cols() && at.y < self.rows()
    }

    /// Whether `at` lies strictly inside a wall ring of `wall_width`.
    pub fn is_interior(&self, at: Point, wall_width: Coord) -> bool {
        inside_ring(at, wall_width, self.cols(), self.rows())
    }

    pub fn tile_at(&self, row: Coord, col: Coord) -> Option<Tile> {
        self.tiles.get([row.into(), col.into()]).copied()
    }

    /// Stores `tile` at the cell, relocating it there. Out of bounds leaves the grid untouched.
    pub fn set_tile(&mut self, row: Coord, col: Coord, tile: Tile) -> bool {
        match self.tiles.get_mut([row.into(), col.into()]) {
            Some(slot) => {
                *slot = tile.relocated(Point::new(col, row));
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, at: Point, tile: Tile) -> bool {
        self.set_tile(at.y, at.x, tile)
    }

    pub fn set_kind(&mut self, at: Point, kind: TileKind) -> bool {
        self.set(at, kind.at(at))
    }

    /// Refills everything inside the wall ring with empty tiles.
    pub fn reset_interior(&mut self, wall_width: Coord) {
        let width = usize::from(wall_width);
        let (rows, cols) = self.tiles.dim();
        for row in width..rows.saturating_sub(width) {
            for col in width..cols.saturating_sub(width) {
                self.tiles[[row, col]] = Tile::Empty(Point::new(col as Coord, row as Coord));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    pub fn find(&self, kind: TileKind) -> impl Iterator<Item = Point> + '_ {
        self.iter()
            .filter(move |tile| tile.kind() == kind)
            .map(Tile::location)
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.find(kind).count()
    }

    /// Locations of every boulder, breakable or not.
    pub fn obstacles(&self) -> BTreeSet<Point> {
        self.iter()
            .filter(|tile| tile.is_obstacle())
            .map(Tile::location)
            .collect()
    }
}

impl TileLookup for TileGrid {
    fn bounds(&self) -> (Coord, Coord) {
        (self.cols(), self.rows())
    }

    fn tile(&self, at: Point) -> Option<Tile> {
        self.tile_at(at.y, at.x)
    }
}

impl PartialEq for TileGrid {
    fn eq(&self, other: &Self) -> bool {
        self.tiles.dim() == other.tiles.dim()
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| left.kind() == right.kind())
    }
}

impl Eq for TileGrid {}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for (index, row) in self.tiles.rows().into_iter().enumerate() {
            if index > 0 {
                f.write_char('\n')?;
            }
            for tile in row {
                f.write_char(tile.kind().symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for TileGrid {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || cols == 0 || rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(BoardError::InvalidBoardShape);
        }

        let mut tiles = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(BoardError::InvalidBoardShape);
            }
            for (col, symbol) in line.chars().enumerate() {
                let kind = TileKind::from_symbol(symbol).ok_or(BoardError::InvalidTile(symbol))?;
                tiles.push(kind.at(Point::new(col as Coord, row as Coord)));
            }
        }

        let tiles =
            Array2::from_shape_vec((rows, cols), tiles).map_err(|_| BoardError::InvalidBoardShape)?;
        Ok(Self { tiles })
    }
}
