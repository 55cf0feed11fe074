use icecave_core::*;

fn medium_config() -> BoardConfig {
    BoardConfig {
        rows: 14,
        cols: 14,
        wall_width: 1,
        player_start: Point::new(1, 1),
        start_direction: Direction::Down,
        obstacle_count: 5,
        difficulty: Difficulty::Medium,
        max_attempts: 5000,
        version: GENERATOR_VERSION.to_string(),
    }
}

fn assert_wall_ring(board: &Board) {
    let wall = board.wall_width();
    for tile in board.grid().iter() {
        let at = tile.location();
        let on_ring = at.x < wall
            || at.y < wall
            || at.x >= board.cols() - wall
            || at.y >= board.rows() - wall;
        assert_eq!(on_ring, tile.kind() == TileKind::Wall, "tile {tile:?}");
    }
}

#[test]
fn medium_scenario_produces_a_valid_board() {
    for seed in 0..8 {
        let board = RandomBoardGenerator::new(seed)
            .generate(&medium_config())
            .unwrap();

        assert!(Difficulty::Medium.tier().contains(board.min_moves()), "seed {seed}");
        assert!(board.grid().count(TileKind::BreakableBoulder) >= 1, "seed {seed}");
        assert_eq!(board.grid().count(TileKind::Flag), 1);
        assert_ne!(board.flag(), board.player_start());
        assert_eq!(board.player_start(), Point::new(1, 1));
        assert_eq!(board.start_direction(), Direction::Down);
        assert!(board.placed_obstacles() <= 5);
        assert_eq!(
            board.grid().obstacles().len(),
            usize::from(board.placed_obstacles())
        );
        assert_wall_ring(&board);
    }
}

#[test]
fn accepted_boards_reproduce_their_move_count() {
    for seed in 100..106 {
        let board = RandomBoardGenerator::new(seed)
            .generate(&medium_config())
            .unwrap();

        let measured = measure_min_moves(board.grid(), board.player_start(), board.flag()).unwrap();
        assert_eq!(measured, Some(board.min_moves()), "seed {seed}");

        let rebuilt = Board::from_grid(
            board.grid().clone(),
            board.wall_width(),
            board.player_start(),
            board.start_direction(),
        )
        .unwrap();
        assert_eq!(rebuilt.min_moves(), board.min_moves());
    }
}

#[test]
fn same_seed_same_board() {
    let config = medium_config();
    let first = RandomBoardGenerator::new(7).generate(&config).unwrap();
    let second = RandomBoardGenerator::new(7).generate(&config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.grid().to_string(), second.grid().to_string());
}

#[test]
fn thick_walls_stay_intact() {
    let config = BoardConfig {
        rows: 16,
        cols: 12,
        wall_width: 2,
        player_start: Point::new(2, 2),
        difficulty: Difficulty::Easy,
        ..medium_config()
    };

    let board = RandomBoardGenerator::new(3).generate(&config).unwrap();

    assert_eq!(board.rows(), 16);
    assert_eq!(board.cols(), 12);
    assert!(Difficulty::Easy.tier().contains(board.min_moves()));
    assert_wall_ring(&board);
}

#[test]
fn overfull_request_is_bounded() {
    let config = BoardConfig {
        rows: 5,
        cols: 5,
        obstacle_count: 40,
        difficulty: Difficulty::Custom(DifficultyTier::new(1, 60).unwrap()),
        max_attempts: 200,
        ..medium_config()
    };

    match RandomBoardGenerator::new(5).generate(&config) {
        Ok(board) => {
            assert!(board.placed_obstacles() <= 7);
            assert!(board.is_underfilled());
            assert_wall_ring(&board);
        }
        Err(err) => assert_eq!(err, BoardError::GenerationExhausted { attempts: 200 }),
    }
}

#[test]
fn impossible_band_exhausts_budget() {
    let config = BoardConfig {
        difficulty: Difficulty::Custom(DifficultyTier::new(400, 500).unwrap()),
        max_attempts: 20,
        ..medium_config()
    };

    assert_eq!(
        RandomBoardGenerator::new(0).generate(&config),
        Err(BoardError::GenerationExhausted { attempts: 20 })
    );
}

#[test]
fn config_loads_from_partial_json() {
    let config: BoardConfig =
        serde_json::from_str(r#"{ "rows": 10, "difficulty": "Easy" }"#).unwrap();

    assert_eq!(config.rows, 10);
    assert_eq!(config.cols, DEFAULT_BOARD_SIZE);
    assert_eq!(config.difficulty, Difficulty::Easy);
    assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn board_survives_json_round_trip() {
    let board = RandomBoardGenerator::new(9)
        .generate(&medium_config())
        .unwrap();

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, board);
    assert_eq!(restored.min_moves(), board.min_moves());
}

#[test]
fn edited_board_json_is_rejected() {
    let board = RandomBoardGenerator::new(9)
        .generate(&medium_config())
        .unwrap();
    let json = serde_json::to_value(&board).unwrap();

    let mut start_in_wall = json.clone();
    start_in_wall["player_start"] = serde_json::json!({ "x": 0, "y": 0 });
    assert!(serde_json::from_value::<Board>(start_in_wall).is_err());

    let mut stray_flag = json.clone();
    stray_flag["flag"] = serde_json::json!({ "x": 200, "y": 200 });
    assert!(serde_json::from_value::<Board>(stray_flag).is_err());

    let mut wrong_moves = json.clone();
    wrong_moves["min_moves"] = serde_json::json!(board.min_moves() + 1);
    let err = serde_json::from_value::<Board>(wrong_moves).unwrap_err();
    assert!(err.to_string().contains("solves in"), "{err}");

    assert_eq!(serde_json::from_value::<Board>(json).unwrap(), board);
}

#[test]
fn session_json_round_trips_and_rejects_a_walled_player() {
    let grid: TileGrid = "
        #######
        #..O.F#
        #######
    "
    .parse()
    .unwrap();
    let board = Board::from_grid(grid, 1, Point::new(1, 1), Direction::Right).unwrap();
    let mut engine = PlayEngine::new(board);
    engine.slide(Direction::Right, |_: Point| ()).unwrap();

    let json = serde_json::to_value(&engine).unwrap();
    assert_eq!(serde_json::from_value::<PlayEngine>(json.clone()).unwrap(), engine);

    let mut walled = json;
    walled["play"]["player"] = serde_json::json!({ "x": 0, "y": 0 });
    assert!(serde_json::from_value::<PlayEngine>(walled).is_err());
}
