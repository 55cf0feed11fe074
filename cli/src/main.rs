use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use icecave_core::*;
use serde::Serialize;

mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Generate a solvable ice cave board and optionally replay moves on it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// JSON file with a board configuration, flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(long)]
    wall_width: Option<Coord>,

    /// Number of boulders to place
    #[arg(long)]
    obstacles: Option<CellCount>,

    #[arg(short, long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Custom band lower bound, replaces --difficulty
    #[arg(long, requires = "max_moves")]
    min_moves: Option<CellCount>,

    /// Custom band upper bound, replaces --difficulty
    #[arg(long, requires = "min_moves")]
    max_moves: Option<CellCount>,

    #[arg(long)]
    start_x: Option<Coord>,

    #[arg(long)]
    start_y: Option<Coord>,

    /// Direction the player faces at the start (up, down, left, right)
    #[arg(long)]
    direction: Option<Direction>,

    /// Give up after this many rejected boards
    #[arg(long)]
    attempts: Option<u32>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Comma separated slides to replay, e.g. "r,d,l"
    #[arg(short, long, value_delimiter = ',')]
    moves: Vec<Direction>,

    /// Print JSON instead of ASCII
    #[arg(long)]
    json: bool,
}

impl Args {
    fn board_config(&self) -> Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Could not read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Could not parse config {}", path.display()))?
            }
            None => BoardConfig::default(),
        };
        self.apply_overrides(&mut config)?;
        config.validate().context("Invalid board configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut BoardConfig) -> Result<()> {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(wall_width) = self.wall_width {
            config.wall_width = wall_width;
        }
        if let Some(obstacles) = self.obstacles {
            config.obstacle_count = obstacles;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }
        if let (Some(min), Some(max)) = (self.min_moves, self.max_moves) {
            if self.difficulty.is_some() {
                bail!("--difficulty cannot be combined with --min-moves/--max-moves");
            }
            config.difficulty = DifficultyTier::new(min, max)?.into();
        }
        if let Some(x) = self.start_x {
            config.player_start.x = x;
        }
        if let Some(y) = self.start_y {
            config.player_start.y = y;
        }
        if let Some(direction) = self.direction {
            config.start_direction = direction;
        }
        if let Some(attempts) = self.attempts {
            config.max_attempts = attempts;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SlideReport {
    direction: Direction,
    from: Point,
    to: Point,
    broken: Vec<Point>,
    moves: CellCount,
}

#[derive(Serialize)]
struct Report<'a> {
    generator_version: &'a str,
    seed: u64,
    board: &'a Board,
    replay: Vec<SlideReport>,
    won: bool,
}

fn replay(engine: &mut PlayEngine, moves: &[Direction]) -> Result<Vec<SlideReport>> {
    let mut reports = Vec::with_capacity(moves.len());
    for (index, &direction) in moves.iter().enumerate() {
        let outcome = engine
            .slide(direction, |at: Point| log::debug!("Player rests at {at}"))
            .with_context(|| format!("Move {} ({direction}) rejected", index + 1))?;
        reports.push(SlideReport {
            direction,
            from: outcome.from,
            to: outcome.to,
            broken: outcome.broken.to_vec(),
            moves: engine.moves(),
        });
    }
    Ok(reports)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.board_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let board = RandomBoardGenerator::new(seed)
        .generate(&config)
        .with_context(|| format!("Could not generate a board with seed {seed}"))?;

    let mut engine = PlayEngine::new(board);
    let slides = replay(&mut engine, &args.moves)?;

    if args.json {
        let report = Report {
            generator_version: GENERATOR_VERSION,
            seed,
            board: engine.board(),
            replay: slides,
            won: engine.is_finished(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!(
            "{}",
            render::Summary {
                board: engine.board(),
                seed
            }
        );
        for slide in &slides {
            println!(
                "{:>5}: {} -> {}, broke {}, {} moves",
                slide.direction,
                slide.from,
                slide.to,
                slide.broken.len(),
                slide.moves
            );
        }
        print!("{}", render::ascii(&engine));
        if engine.is_finished() {
            println!("Flag reached in {} moves", engine.moves());
        }
    }

    Ok(())
}
