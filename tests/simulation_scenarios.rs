use grid_snake::game::{
    CollisionType, Difficulty, Direction, GRID_SIZE, GameEngine, GameState, Lifecycle, Position,
    Snake, TickOutcome,
};
use grid_snake::persistence::{HighScore, JsonFileStore, MemoryStore};
use tempfile::TempDir;

fn cells(list: &[(i32, i32)]) -> Vec<Position> {
    list.iter().copied().map(Position::from).collect()
}

fn started(engine: &mut GameEngine, difficulty: Difficulty) -> GameState {
    let mut state = engine.new_session(difficulty);
    state.start();
    state
}

#[test]
fn test_medium_eat_scenario() {
    let mut engine = GameEngine::with_seed(2024);
    let mut high_score = HighScore::load(Box::new(MemoryStore::new()));
    let mut state = started(&mut engine, Difficulty::Medium);
    state.food = Position::new(11, 10);

    let outcome = engine.tick(&mut state, &mut high_score);

    assert_eq!(outcome, TickOutcome::Ate { points: 20 });
    assert_eq!(state.score, 20);
    assert_eq!(
        state.snake.body,
        cells(&[(11, 10), (10, 10), (9, 10), (8, 10)])
    );
    assert_ne!(state.food, Position::new(11, 10));
    assert!(!state.snake.occupies(state.food));
}

#[test]
fn test_plain_move_scenario() {
    let mut engine = GameEngine::with_seed(2024);
    let mut high_score = HighScore::load(Box::new(MemoryStore::new()));
    let mut state = started(&mut engine, Difficulty::Medium);
    state.food = Position::new(0, 0);

    engine.tick(&mut state, &mut high_score);

    assert_eq!(state.snake.body, cells(&[(11, 10), (10, 10), (9, 10)]));
    assert_eq!(state.score, 0);
}

#[test]
fn test_reversal_rule_scenario() {
    let mut engine = GameEngine::with_seed(5);
    let mut high_score = HighScore::load(Box::new(MemoryStore::new()));
    let mut state = started(&mut engine, Difficulty::Easy);
    state.food = Position::new(0, 0);

    state.request_direction(Direction::Left);
    engine.tick(&mut state, &mut high_score);
    assert_eq!(state.snake.head(), Position::new(11, 10));

    assert!(state.request_direction(Direction::Up));
    engine.tick(&mut state, &mut high_score);
    assert_eq!(state.snake.head(), Position::new(11, 9));
}

#[test]
fn test_wall_collision_on_right_edge() {
    let mut engine = GameEngine::with_seed(5);
    let mut high_score = HighScore::load(Box::new(MemoryStore::new()));
    let mut state = started(&mut engine, Difficulty::Easy);
    state.food = Position::new(0, 0);

    // Ride along row 10 until the head sits on the last column
    while state.snake.head().x < GRID_SIZE - 1 {
        assert_eq!(engine.tick(&mut state, &mut high_score), TickOutcome::Moved);
    }
    let before = state.snake.clone();

    let outcome = engine.tick(&mut state, &mut high_score);

    assert_eq!(
        outcome,
        TickOutcome::GameOver {
            collision: CollisionType::Wall,
            new_high_score: false
        }
    );
    assert!(state.over);
    assert!(!state.playing);
    assert_eq!(state.snake, before);
}

#[test]
fn test_reset_is_canonical_every_time() {
    let mut engine = GameEngine::with_seed(99);
    let mut state = started(&mut engine, Difficulty::Hard);
    state.score = 300;

    let first = engine.reset(&state);
    let second = engine.reset(&first);

    for fresh in [&first, &second] {
        assert_eq!(fresh.lifecycle(), Lifecycle::Ready);
        assert_eq!(fresh.snake, Snake::initial());
        assert_eq!(fresh.snake.direction, Direction::Right);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.difficulty, Difficulty::Hard);
        assert_eq!(fresh.pending_direction, None);
        assert!(!fresh.snake.occupies(fresh.food));
    }
}

#[test]
fn test_high_score_is_max_over_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("high_score.json");
    let mut engine = GameEngine::with_seed(17);

    let finals = [40, 120, 60, 0, 110];
    for (i, final_score) in finals.iter().copied().enumerate() {
        // A fresh process each session: reload from disk
        let mut high_score = HighScore::load(Box::new(JsonFileStore::new(&path)));
        let mut state = started(&mut engine, Difficulty::Easy);
        state.snake = Snake::new(Position::new(0, 5), Direction::Left, 3);
        state.food = Position::new(20, 20);
        state.score = final_score;

        let outcome = engine.tick(&mut state, &mut high_score);
        assert!(matches!(outcome, TickOutcome::GameOver { .. }));

        let expected = finals[..=i].iter().copied().max().unwrap();
        assert_eq!(high_score.get(), expected);
    }

    let reloaded = HighScore::load(Box::new(JsonFileStore::new(&path)));
    assert_eq!(reloaded.get(), 120);
}

#[test]
fn test_corrupt_high_score_file_starts_from_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("high_score.json");
    std::fs::write(&path, "{ broken").unwrap();

    let high_score = HighScore::load(Box::new(JsonFileStore::new(&path)));
    assert_eq!(high_score.get(), 0);
}
