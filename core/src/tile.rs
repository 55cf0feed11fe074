use serde::{Deserialize, Serialize};

use crate::*;

/// Field-less tile tag, used to key placement validators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Empty,
    Boulder,
    BreakableBoulder,
    Flag,
}

impl TileKind {
    pub const fn at(self, location: Point) -> Tile {
        match self {
            Self::Wall => Tile::Wall(location),
            Self::Empty => Tile::Empty(location),
            Self::Boulder => Tile::Boulder(location),
            Self::BreakableBoulder => Tile::BreakableBoulder(location),
            Self::Flag => Tile::Flag(location),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Empty => '.',
            Self::Boulder => 'O',
            Self::BreakableBoulder => 'o',
            Self::Flag => 'F',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        Some(match symbol {
            '#' => Self::Wall,
            '.' => Self::Empty,
            'O' => Self::Boulder,
            'o' => Self::BreakableBoulder,
            'F' => Self::Flag,
            _ => return None,
        })
    }
}

/// A board cell together with its own location.
///
/// Two tiles are equal when they sit on the same cell, whatever their kind.
#[derive(Copy, Clone, Debug, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall(Point),
    Empty(Point),
    Boulder(Point),
    BreakableBoulder(Point),
    Flag(Point),
}

impl Tile {
    pub const fn kind(self) -> TileKind {
        match self {
            Self::Wall(_) => TileKind::Wall,
            Self::Empty(_) => TileKind::Empty,
            Self::Boulder(_) => TileKind::Boulder,
            Self::BreakableBoulder(_) => TileKind::BreakableBoulder,
            Self::Flag(_) => TileKind::Flag,
        }
    }

    pub const fn location(self) -> Point {
        match self {
            Self::Wall(at)
            | Self::Empty(at)
            | Self::Boulder(at)
            | Self::BreakableBoulder(at)
            | Self::Flag(at) => at,
        }
    }

    /// Same kind, moved to `location`.
    pub const fn relocated(self, location: Point) -> Self {
        self.kind().at(location)
    }

    /// Halts sliding movement; the slider stops in front of it.
    pub const fn is_blocking(self) -> bool {
        matches!(
            self,
            Self::Wall(_) | Self::Boulder(_) | Self::BreakableBoulder(_)
        )
    }

    pub const fn is_passable(self) -> bool {
        !self.is_blocking()
    }

    /// Can be broken through by a momentum push.
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Self::Boulder(_) | Self::BreakableBoulder(_))
    }

    /// Absorbs momentum when stepped on.
    pub const fn is_exit(self) -> bool {
        matches!(self, Self::Flag(_))
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.location() == other.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_follow_kind() {
        let at = Point::new(2, 3);
        assert!(Tile::Wall(at).is_blocking());
        assert!(Tile::Boulder(at).is_blocking());
        assert!(Tile::BreakableBoulder(at).is_blocking());
        assert!(Tile::Empty(at).is_passable());
        assert!(Tile::Flag(at).is_passable());

        assert!(Tile::Boulder(at).is_obstacle());
        assert!(Tile::BreakableBoulder(at).is_obstacle());
        assert!(!Tile::Wall(at).is_obstacle());

        assert!(Tile::Flag(at).is_exit());
        assert!(!Tile::Empty(at).is_exit());
    }

    #[test]
    fn equality_ignores_kind() {
        let at = Point::new(1, 1);
        assert_eq!(Tile::Wall(at), Tile::Empty(at));
        assert_ne!(Tile::Wall(at), Tile::Wall(Point::new(1, 2)));
    }

    #[test]
    fn symbols_map_back_to_kinds() {
        for kind in [
            TileKind::Wall,
            TileKind::Empty,
            TileKind::Boulder,
            TileKind::BreakableBoulder,
            TileKind::Flag,
        ] {
            assert_eq!(TileKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(TileKind::from_symbol('x'), None);
    }
}
