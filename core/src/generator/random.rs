use rand::prelude::*;

use super::*;

/// Consecutive rejected placements after which an attempt stops adding obstacles.
pub const MAX_REJECTED_PLACEMENTS: u32 = 10;

/// Generation strategy that places the flag and the obstacles uniformly at random and
/// retries until the solver accepts the board.
#[derive(Debug)]
pub struct RandomBoardGenerator {
    seed: u64,
    validators: TileValidatorFactory,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            validators: TileValidatorFactory::default(),
        }
    }

    /// Replaces the placement rules used for obstacles.
    pub fn with_validators(mut self, validators: TileValidatorFactory) -> Self {
        self.validators = validators;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs generation against a caller-owned random source instead of the stored seed.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        config: &BoardConfig,
        rng: &mut R,
    ) -> Result<Board> {
        config.validate()?;
        if config.version != GENERATOR_VERSION {
            log::warn!(
                "Config targets generator {}, running {}, seeds may not reproduce",
                config.version,
                GENERATOR_VERSION
            );
        }
        let difficulty = config.difficulty.tier();
        let mut grid = TileGrid::walled(config.rows, config.cols, config.wall_width);

        for attempt in 1..=config.max_attempts {
            grid.reset_interior(config.wall_width);
            let flag = place_flag(&mut grid, config, rng);
            let placed = self.place_obstacles(&mut grid, config, rng);

            let validation = match validate(&mut grid, config.player_start, flag, difficulty) {
                Ok(validation) => validation,
                Err(err) => {
                    log::debug!("Attempt {attempt} discarded: {err}");
                    continue;
                }
            };
            if !validation.is_valid() {
                log::debug!("Attempt {attempt} rejected: {:?}", validation.verdict);
                continue;
            }

            for &at in &validation.breakable {
                grid.set_kind(at, TileKind::BreakableBoulder);
            }

            if placed < config.obstacle_count {
                log::warn!(
                    "Board under-filled, requested {} obstacles but only placed {}",
                    config.obstacle_count,
                    placed
                );
            }

            let min_moves = validation.total_moves.unwrap_or_default();
            log::info!(
                "Generated {}x{} board in {} attempts, {} moves, {} breakable",
                config.rows,
                config.cols,
                attempt,
                min_moves,
                validation.breakable.len()
            );

            return Ok(Board {
                grid,
                wall_width: config.wall_width,
                player_start: config.player_start,
                flag,
                start_direction: config.start_direction,
                min_moves,
                requested_obstacles: config.obstacle_count,
                placed_obstacles: placed,
                attempts: attempt,
            });
        }

        log::warn!(
            "Gave up after {} attempts for {}x{} board with {} obstacles",
            config.max_attempts,
            config.rows,
            config.cols,
            config.obstacle_count
        );
        Err(BoardError::GenerationExhausted {
            attempts: config.max_attempts,
        })
    }

    /// Drops up to `obstacle_count` boulders on valid interior cells, returns how many landed.
    fn place_obstacles<R: Rng + ?Sized>(
        &self,
        grid: &mut TileGrid,
        config: &BoardConfig,
        rng: &mut R,
    ) -> CellCount {
        let wall = config.wall_width;
        let mut placed = 0;
        let mut rejected = 0;

        while placed < config.obstacle_count && rejected < MAX_REJECTED_PLACEMENTS {
            let at = Point::new(
                rng.random_range(wall..config.cols - wall),
                rng.random_range(wall..config.rows - wall),
            );

            if !self
                .validators
                .validate(TileKind::Boulder, at, config.player_start, grid)
            {
                rejected += 1;
                continue;
            }

            grid.set_kind(at, TileKind::Boulder);
            placed += 1;
            rejected = 0;
        }

        placed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &BoardConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.generate_with_rng(config, &mut rng)
    }
}

/// Puts the flag on a uniformly chosen interior cell other than the player start.
fn place_flag<R: Rng + ?Sized>(grid: &mut TileGrid, config: &BoardConfig, rng: &mut R) -> Point {
    let wall = config.wall_width;
    let (width, _) = config.interior_size();
    let width = CellCount::from(width);
    let start = config.player_start;
    let start_index =
        CellCount::from(start.y - wall) * width + CellCount::from(start.x - wall);

    let mut index = rng.random_range(0..config.interior_cells() - 1);
    if index >= start_index {
        index += 1;
    }

    let at = Point::new(
        wall + (index % width) as Coord,
        wall + (index / width) as Coord,
    );
    grid.set_kind(at, TileKind::Flag);
    at
}
