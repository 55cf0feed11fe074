use std::fmt;

use icecave_core::*;

pub const PLAYER_SYMBOL: char = 'P';

/// Header lines describing a generated board.
pub struct Summary<'a> {
    pub board: &'a Board,
    pub seed: u64,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board;
        writeln!(
            f,
            "{}x{} board, seed {}, generator {GENERATOR_VERSION}",
            board.rows(),
            board.cols(),
            self.seed
        )?;
        writeln!(
            f,
            "start {} facing {}, flag {}, {} moves",
            board.player_start(),
            board.start_direction(),
            board.flag(),
            board.min_moves()
        )?;
        writeln!(
            f,
            "{} of {} obstacles placed after {} attempts",
            board.placed_obstacles(),
            board.requested_obstacles(),
            board.attempts()
        )
    }
}

/// Board as the player sees it, broken obstacles cleared and the player marked.
pub fn ascii(engine: &PlayEngine) -> String {
    let board = engine.board();
    let mut out = String::with_capacity(usize::from(board.rows()) * (usize::from(board.cols()) + 1));
    for y in 0..board.rows() {
        for x in 0..board.cols() {
            let at = Point::new(x, y);
            let symbol = if at == engine.player() {
                PLAYER_SYMBOL
            } else {
                engine.tile(at).map_or(' ', |tile| tile.kind().symbol())
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}
