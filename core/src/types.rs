use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for cell counts and move counts.
pub type CellCount = u16;

/// Grid position, `x` is the column and `y` is the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Neighbor one cell away in `direction`, `None` when it would leave `bounds` (cols, rows).
    pub fn step(self, direction: Direction, bounds: (Coord, Coord)) -> Option<Point> {
        apply_delta(self, direction.delta(), bounds)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Point {
    type Output = [usize; 2];

    /// Grids are stored row-major, so the row comes first.
    fn to_nd_index(self) -> Self::Output {
        [self.y.into(), self.x.into()]
    }
}

/// Whether `at` lies strictly inside a ring of `wall_width` around a `cols` x `rows` board.
pub const fn inside_ring(at: Point, wall_width: Coord, cols: Coord, rows: Coord) -> bool {
    let wall = wall_width as u16;
    at.x >= wall_width
        && at.y >= wall_width
        && at.x as u16 + wall < cols as u16
        && at.y as u16 + wall < rows as u16
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit `(dx, dy)` vector.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.pad(name)
    }
}

impl core::str::FromStr for Direction {
    type Err = crate::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "u" | "U" => Ok(Self::Up),
            "down" | "d" | "D" => Ok(Self::Down),
            "left" | "l" | "L" => Ok(Self::Left),
            "right" | "r" | "R" => Ok(Self::Right),
            _ => Err(crate::BoardError::InvalidDirection),
        }
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Point, delta: (i8, i8), bounds: (Coord, Coord)) -> Option<Point> {
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = coords.x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = coords.y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some(Point::new(next_x, next_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stays_in_bounds() {
        let bounds = (3, 2);
        assert_eq!(Point::new(0, 0).step(Direction::Up, bounds), None);
        assert_eq!(Point::new(0, 0).step(Direction::Left, bounds), None);
        assert_eq!(Point::new(2, 1).step(Direction::Right, bounds), None);
        assert_eq!(Point::new(2, 1).step(Direction::Down, bounds), None);
        assert_eq!(
            Point::new(1, 0).step(Direction::Down, bounds),
            Some(Point::new(1, 1))
        );
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
            let (dx, dy) = direction.delta();
            assert_eq!(direction.opposite().delta(), (-dx, -dy));
        }
    }

    #[test]
    fn nd_index_is_row_major() {
        assert_eq!(Point::new(4, 1).to_nd_index(), [1, 4]);
    }
}
