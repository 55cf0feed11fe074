use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;

use crate::*;

/// Placement rule for one tile kind.
pub trait TileValidator {
    /// Whether a tile may be placed at `at` while the player starts at `player`.
    fn is_valid(&self, at: Point, player: Point, grid: &TileGrid) -> bool;
}

impl<F> TileValidator for F
where
    F: Fn(Point, Point, &TileGrid) -> bool,
{
    fn is_valid(&self, at: Point, player: Point, grid: &TileGrid) -> bool {
        self(at, player, grid)
    }
}

/// Boulders go on empty cells only, never on the player's start.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoulderValidator;

impl TileValidator for BoulderValidator {
    fn is_valid(&self, at: Point, player: Point, grid: &TileGrid) -> bool {
        at != player && matches!(grid.tile(at), Some(Tile::Empty(_)))
    }
}

/// Registry of placement rules keyed by tile kind.
///
/// Kinds without a registered rule are always accepted.
pub struct TileValidatorFactory {
    validators: HashMap<TileKind, Box<dyn TileValidator>>,
}

impl TileValidatorFactory {
    /// A factory with no rules at all.
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    pub fn register(&mut self, kind: TileKind, validator: impl TileValidator + 'static) {
        self.validators.insert(kind, Box::new(validator));
    }

    pub fn unregister(&mut self, kind: TileKind) -> bool {
        self.validators.remove(&kind).is_some()
    }

    pub fn has_rule(&self, kind: TileKind) -> bool {
        self.validators.contains_key(&kind)
    }

    pub fn validate(&self, kind: TileKind, at: Point, player: Point, grid: &TileGrid) -> bool {
        self.validators
            .get(&kind)
            .is_none_or(|validator| validator.is_valid(at, player, grid))
    }
}

impl Default for TileValidatorFactory {
    fn default() -> Self {
        let mut factory = Self::empty();
        factory.register(TileKind::Boulder, BoulderValidator);
        factory.register(TileKind::BreakableBoulder, BoulderValidator);
        factory
    }
}

impl fmt::Debug for TileValidatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.validators.keys()).finish()
    }
}
