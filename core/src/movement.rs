use smallvec::SmallVec;

use crate::*;

/// Result of one slide: where it came to rest and which obstacles it broke through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    pub rest: Point,
    pub impacts: SmallVec<[Point; 2]>,
}

impl Slide {
    pub fn moved_from(&self, origin: Point) -> bool {
        self.rest != origin || !self.impacts.is_empty()
    }
}

/// Resting point of a slide from `origin` in `direction`.
pub fn resolve_slide<G: TileLookup + ?Sized>(grid: &G, origin: Point, direction: Direction) -> Point {
    trace_slide(grid, origin, direction).rest
}

/// Slides from `origin` until the next cell blocks or the exit is reached.
///
/// A push that starts against an obstacle carries through it and the slide
/// continues from the obstacle's own cell, recording the obstacle as an impact.
pub fn trace_slide<G: TileLookup + ?Sized>(grid: &G, origin: Point, direction: Direction) -> Slide {
    let (cols, rows) = grid.bounds();
    let mut impacts = SmallVec::new();
    let rest = slide_from(
        grid,
        origin,
        direction,
        &mut impacts,
        usize::from(cols) + usize::from(rows),
    );
    Slide { rest, impacts }
}

fn slide_from<G: TileLookup + ?Sized>(
    grid: &G,
    origin: Point,
    direction: Direction,
    impacts: &mut SmallVec<[Point; 2]>,
    depth: usize,
) -> Point {
    let bounds = grid.bounds();
    let mut current = origin;
    let mut moved = false;

    loop {
        let Some(next) = current.step(direction, bounds) else {
            return current;
        };
        let Some(tile) = grid.tile(next) else {
            return current;
        };

        if tile.is_blocking() {
            if !moved && tile.is_obstacle() && depth > 0 {
                impacts.push(next);
                return slide_from(grid, next, direction, impacts, depth - 1);
            }
            return current;
        }

        current = next;
        moved = true;

        if tile.is_exit() {
            return current;
        }
    }
}
