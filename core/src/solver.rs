use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;

use ndarray::Array2;

use crate::*;

/// Shortest slide route found by [`find_shortest_path`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPath {
    tree: SearchTree,
    goal: NodeId,
}

impl ShortestPath {
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn goal(&self) -> NodeId {
        self.goal
    }

    /// Number of slides from the start to the goal.
    pub fn slide_count(&self) -> usize {
        self.tree.slide_count(self.goal)
    }

    /// Start point followed by every resting point up to the goal.
    pub fn resting_points(&self) -> Vec<Point> {
        self.tree
            .path_to(self.goal)
            .into_iter()
            .filter(|node| node.kind != NodeKind::Impact)
            .map(|node| node.value)
            .collect()
    }

    /// Obstacles broken along the route, in travel order.
    pub fn impacts(&self) -> Vec<Point> {
        self.tree
            .path_to(self.goal)
            .into_iter()
            .filter(|node| node.kind == NodeKind::Impact)
            .map(|node| node.value)
            .collect()
    }
}

/// Breadth-first search over slides from `start` to `end`.
///
/// A cell is visited once no matter which direction reached it. The start
/// cell is not pre-marked, so a slide that stays put still gets a node.
pub fn find_shortest_path<G: TileLookup + ?Sized>(
    grid: &G,
    start: Point,
    end: Point,
) -> Option<ShortestPath> {
    grid.tile(start)?;

    let (cols, rows) = grid.bounds();
    let mut visited: Array2<bool> = Array2::default((usize::from(rows), usize::from(cols)));
    let mut tree = SearchTree::new(start);
    let mut queue = VecDeque::from([tree.root()]);

    while let Some(current) = queue.pop_front() {
        let (origin, kind) = {
            let node = tree.node(current);
            (node.value, node.kind)
        };

        if kind != NodeKind::Root && origin == end {
            return Some(ShortestPath {
                tree,
                goal: current,
            });
        }

        for direction in Direction::ALL {
            let slide = trace_slide(grid, origin, direction);
            let Some(seen) = visited.get_mut(slide.rest.to_nd_index()) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;

            let mut parent = current;
            for &impact in &slide.impacts {
                parent = tree.push(parent, impact, NodeKind::Impact);
            }
            queue.push_back(tree.push(parent, slide.rest, NodeKind::Slide));
        }
    }

    None
}

/// Extra moves owed to obstacles broken along a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakTally {
    pub extra_moves: CellCount,
    /// Obstacles to re-insert as breakable, nearest to the goal first.
    pub breakable: Vec<Point>,
}

/// Charges one move for every active obstacle among the goal's ancestors.
///
/// Each charged obstacle is cleared from `grid` and dropped from `active` so it
/// is never counted twice. The walk is capped at the grid's cell count.
pub fn account_breakable_cost(
    path: &ShortestPath,
    grid: &mut TileGrid,
    active: &mut BTreeSet<Point>,
) -> Result<BreakTally> {
    let limit = grid.cell_count();
    let mut tally = BreakTally::default();

    for (walked, ancestor) in path.tree.ancestors(path.goal).enumerate() {
        if walked >= limit {
            return Err(BoardError::PathAccountingOverflow { limit });
        }

        let at = path.tree.node(ancestor).value;
        if active.remove(&at) {
            tally.extra_moves = tally.extra_moves.saturating_add(1);
            grid.set_kind(at, TileKind::Empty);
            tally.breakable.push(at);
        }
    }

    Ok(tally)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Unreachable,
    OutOfBand { total: CellCount },
    NoBreakable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub verdict: Verdict,
    /// Slides plus broken obstacles, `None` when the flag is unreachable.
    pub total_moves: Option<CellCount>,
    pub breakable: Vec<Point>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// Checks that `flag` is reachable from `start` within `difficulty`.
///
/// Obstacles charged as breakable are cleared from `grid`; the caller decides
/// whether to put them back.
pub fn validate(
    grid: &mut TileGrid,
    start: Point,
    flag: Point,
    difficulty: DifficultyTier,
) -> Result<Validation> {
    let Some(path) = find_shortest_path(&*grid, start, flag) else {
        return Ok(Validation {
            verdict: Verdict::Unreachable,
            total_moves: None,
            breakable: Vec::new(),
        });
    };

    let mut active = grid.obstacles();
    let tally = account_breakable_cost(&path, grid, &mut active)?;
    let slides = CellCount::try_from(path.slide_count()).unwrap_or(CellCount::MAX);
    let total = slides.saturating_add(tally.extra_moves);

    let verdict = if !difficulty.contains(total) {
        Verdict::OutOfBand { total }
    } else if tally.breakable.is_empty() {
        Verdict::NoBreakable
    } else {
        Verdict::Accepted
    };

    Ok(Validation {
        verdict,
        total_moves: Some(total),
        breakable: tally.breakable,
    })
}

/// Minimum moves of a finished board, obstacles of either kind counted as breakable.
///
/// Works on a copy, `grid` itself is left as is.
pub fn measure_min_moves(grid: &TileGrid, start: Point, flag: Point) -> Result<Option<CellCount>> {
    let Some(path) = find_shortest_path(grid, start, flag) else {
        return Ok(None);
    };

    let mut scratch = grid.clone();
    let mut active = grid.obstacles();
    let tally = account_breakable_cost(&path, &mut scratch, &mut active)?;
    let slides = CellCount::try_from(path.slide_count()).unwrap_or(CellCount::MAX);
    Ok(Some(slides.saturating_add(tally.extra_moves)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> TileGrid {
        text.parse().unwrap()
    }

    fn corridor_with_boulder() -> TileGrid {
        grid(
            "
            #######
            #..O.F#
            #######
            ",
        )
    }

    #[test]
    fn straight_line_takes_one_slide() {
        let grid = grid(
            "
            #######
            #....F#
            #######
            ",
        );
        let path = find_shortest_path(&grid, Point::new(1, 1), Point::new(5, 1)).unwrap();

        assert_eq!(path.slide_count(), 1);
        assert_eq!(path.resting_points(), [Point::new(1, 1), Point::new(5, 1)]);
        assert!(path.impacts().is_empty());
    }

    #[test]
    fn open_floor_cannot_stop_in_the_middle() {
        let grid = grid(
            "
            #####
            #...#
            #.F.#
            #...#
            #####
            ",
        );
        assert_eq!(find_shortest_path(&grid, Point::new(1, 1), Point::new(2, 2)), None);
    }

    #[test]
    fn boulders_act_as_stoppers() {
        let grid = grid(
            "
            #######
            #...O.#
            #.....#
            #..F..#
            #.....#
            #.....#
            #######
            ",
        );
        let path = find_shortest_path(&grid, Point::new(1, 1), Point::new(3, 3)).unwrap();
        assert_eq!(path.slide_count(), 2);
        assert_eq!(
            path.resting_points(),
            [Point::new(1, 1), Point::new(3, 1), Point::new(3, 3)]
        );
        assert!(path.impacts().is_empty());
    }

    #[test]
    fn route_through_a_boulder_records_the_impact() {
        let grid = corridor_with_boulder();
        let path = find_shortest_path(&grid, Point::new(1, 1), Point::new(5, 1)).unwrap();

        assert_eq!(path.slide_count(), 2);
        assert_eq!(
            path.resting_points(),
            [Point::new(1, 1), Point::new(2, 1), Point::new(5, 1)]
        );
        assert_eq!(path.impacts(), [Point::new(3, 1)]);
    }

    #[test]
    fn accounting_charges_and_clears_each_obstacle_once() {
        let mut grid = corridor_with_boulder();
        let path = find_shortest_path(&grid, Point::new(1, 1), Point::new(5, 1)).unwrap();
        let mut active = grid.obstacles();

        let tally = account_breakable_cost(&path, &mut grid, &mut active).unwrap();

        assert_eq!(tally.extra_moves, 1);
        assert_eq!(tally.breakable, [Point::new(3, 1)]);
        assert!(active.is_empty());
        assert_eq!(grid.tile(Point::new(3, 1)).map(Tile::kind), Some(TileKind::Empty));

        let again = account_breakable_cost(&path, &mut grid, &mut active).unwrap();
        assert_eq!(again, BreakTally::default());
    }

    #[test]
    fn accounting_ignores_inactive_obstacles() {
        let mut grid = corridor_with_boulder();
        let path = find_shortest_path(&grid, Point::new(1, 1), Point::new(5, 1)).unwrap();

        let tally = account_breakable_cost(&path, &mut grid, &mut BTreeSet::new()).unwrap();

        assert_eq!(tally, BreakTally::default());
        assert_eq!(grid, corridor_with_boulder());
    }

    #[test]
    fn runaway_ancestry_is_an_overflow() {
        let mut grid = grid("..");
        let mut tree = SearchTree::new(Point::new(0, 0));
        let mut last = tree.root();
        for _ in 0..4 {
            last = tree.push(last, Point::new(1, 0), NodeKind::Slide);
        }
        let path = ShortestPath { tree, goal: last };

        assert_eq!(
            account_breakable_cost(&path, &mut grid, &mut BTreeSet::new()),
            Err(BoardError::PathAccountingOverflow { limit: 2 })
        );
    }

    #[test]
    fn validate_accepts_band_with_breakable() {
        let mut grid = corridor_with_boulder();
        let band = DifficultyTier::new(3, 3).unwrap();

        let validation = validate(&mut grid, Point::new(1, 1), Point::new(5, 1), band).unwrap();

        assert!(validation.is_valid());
        assert_eq!(validation.total_moves, Some(3));
        assert_eq!(validation.breakable, [Point::new(3, 1)]);
    }

    #[test]
    fn validate_rejects_out_of_band() {
        let mut grid = corridor_with_boulder();
        let band = DifficultyTier::new(4, 10).unwrap();

        let validation = validate(&mut grid, Point::new(1, 1), Point::new(5, 1), band).unwrap();

        assert_eq!(validation.verdict, Verdict::OutOfBand { total: 3 });
        assert!(!validation.is_valid());
    }

    #[test]
    fn validate_requires_a_breakable_obstacle() {
        let mut grid = grid(
            "
            #######
            #....F#
            #######
            ",
        );
        let band = DifficultyTier::new(1, 5).unwrap();

        let validation = validate(&mut grid, Point::new(1, 1), Point::new(5, 1), band).unwrap();

        assert_eq!(validation.verdict, Verdict::NoBreakable);
        assert_eq!(validation.total_moves, Some(1));
    }

    #[test]
    fn validate_reports_unreachable_flag() {
        let mut grid = grid(
            "
            #####
            #...#
            #.F.#
            #...#
            #####
            ",
        );
        let band = DifficultyTier::new(1, 5).unwrap();

        let validation = validate(&mut grid, Point::new(1, 1), Point::new(2, 2), band).unwrap();

        assert_eq!(validation.verdict, Verdict::Unreachable);
        assert_eq!(validation.total_moves, None);
    }
}
