use alloc::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Ready,
    Active,
    Won,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Reaction to the player coming to rest, e.g. a sound or an animation trigger.
pub trait CollisionHook {
    type Output;

    fn on_rest(&mut self, at: Point) -> Self::Output;
}

impl<F, T> CollisionHook for F
where
    F: FnMut(Point) -> T,
{
    type Output = T;

    fn on_rest(&mut self, at: Point) -> T {
        self(at)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideOutcome<T> {
    pub from: Point,
    pub to: Point,
    /// Obstacles broken by this slide, in travel order.
    pub broken: SmallVec<[Point; 2]>,
    /// Cells that need redrawing.
    pub updated: SmallVec<[Point; 4]>,
    pub reaction: T,
    pub ended: bool,
}

/// Mutable part of a play session, everything else lives in the [`Board`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayState {
    player: Point,
    facing: Direction,
    broken: BTreeSet<Point>,
    moves: CellCount,
    state: EngineState,
}

impl PlayState {
    fn start(board: &Board) -> Self {
        Self {
            player: board.player_start(),
            facing: board.start_direction(),
            broken: BTreeSet::new(),
            moves: 0,
            state: EngineState::Ready,
        }
    }
}

/// Board tiles with the broken obstacles cleared.
#[derive(Copy, Clone, Debug)]
pub struct PlayView<'a> {
    grid: &'a TileGrid,
    broken: &'a BTreeSet<Point>,
}

impl TileLookup for PlayView<'_> {
    fn bounds(&self) -> (Coord, Coord) {
        self.grid.bounds()
    }

    fn tile(&self, at: Point) -> Option<Tile> {
        let tile = self.grid.tile(at)?;
        if self.broken.contains(&at) {
            Some(TileKind::Empty.at(at))
        } else {
            Some(tile)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayEngine")]
pub struct PlayEngine {
    board: Board,
    play: PlayState,
}

#[derive(Deserialize)]
struct RawPlayEngine {
    board: Board,
    play: PlayState,
}

impl TryFrom<RawPlayEngine> for PlayEngine {
    type Error = BoardError;

    /// Accepts a saved session only if its state could come from playing its board.
    fn try_from(RawPlayEngine { board, play }: RawPlayEngine) -> Result<Self> {
        let grid = board.grid();
        if !play
            .broken
            .iter()
            .all(|&at| grid.tile(at).is_some_and(Tile::is_obstacle))
        {
            return Err(BoardError::InvalidSession);
        }

        let engine = Self { board, play };
        let player = engine.play.player;
        let at_flag = player == engine.board.flag();
        let fresh = player == engine.board.player_start() && engine.play.moves == 0;
        let consistent = match engine.play.state {
            EngineState::Ready => fresh && engine.play.broken.is_empty(),
            EngineState::Active => !at_flag,
            EngineState::Won => at_flag,
        };
        if !consistent || !engine.tile(player).is_some_and(Tile::is_passable) {
            return Err(BoardError::InvalidSession);
        }
        Ok(engine)
    }
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        let play = PlayState::start(&board);
        Self { board, play }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.play.state
    }

    pub fn is_finished(&self) -> bool {
        self.play.state.is_finished()
    }

    pub fn player(&self) -> Point {
        self.play.player
    }

    /// Direction of the last slide, the board's start direction before any.
    pub fn facing(&self) -> Direction {
        self.play.facing
    }

    pub fn moves(&self) -> CellCount {
        self.play.moves
    }

    pub fn broken(&self) -> &BTreeSet<Point> {
        &self.play.broken
    }

    pub fn view(&self) -> PlayView<'_> {
        PlayView {
            grid: self.board.grid(),
            broken: &self.play.broken,
        }
    }

    /// Tile as the player currently sees it.
    pub fn tile(&self, at: Point) -> Option<Tile> {
        self.view().tile(at)
    }

    pub fn slide<H: CollisionHook>(
        &mut self,
        direction: Direction,
        mut hook: H,
    ) -> Result<SlideOutcome<H::Output>> {
        if self.is_finished() {
            return Err(BoardError::AlreadyEnded);
        }

        let from = self.play.player;
        let Slide { rest, impacts } = trace_slide(&self.view(), from, direction);

        let mut updated = SmallVec::new();
        updated.push(from);
        for &at in &impacts {
            self.play.broken.insert(at);
            updated.push(at);
        }
        if rest != from {
            updated.push(rest);
        }

        let cost = CellCount::try_from(impacts.len()).unwrap_or(CellCount::MAX);
        self.play.moves = self.play.moves.saturating_add(1).saturating_add(cost);
        self.play.player = rest;
        self.play.facing = direction;

        let ended = self.board.flag() == rest;
        self.play.state = if ended {
            EngineState::Won
        } else {
            EngineState::Active
        };

        log::trace!("Slide {direction} from {from} to {rest}, broke {}", impacts.len());
        if ended {
            log::debug!("Flag reached in {} moves", self.play.moves);
        }

        let reaction = hook.on_rest(rest);

        Ok(SlideOutcome {
            from,
            to: rest,
            broken: impacts,
            updated,
            reaction,
            ended,
        })
    }

    /// Breaks an intact obstacle without moving the player.
    pub fn remove_tile(&mut self, at: Point) -> bool {
        match self.tile(at) {
            Some(tile) if tile.is_obstacle() => self.play.broken.insert(at),
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.play = PlayState::start(&self.board);
    }
}
