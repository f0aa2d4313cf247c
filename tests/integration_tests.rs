//! Integration tests for the engine driven through the facade crate

use std::time::Duration;

use blockfall::core::testing::{ManualTimer, RecordingScoring};
use blockfall::core::{
    Block, BoardConfig, ClassicScoring, Error, Event, Game, ModernScoring, PieceGenerator,
    ReplaySource, Scoring, ScoringRule,
};
use blockfall::types::{Action, Color, Command, PieceKind, Position, BOARD_WIDTH};

fn replay(letters: &str) -> ReplaySource {
    ReplaySource::from_letters(letters).unwrap()
}

/// Move horizontally by `dx`, then tick until the piece lands
fn drop_at<S: Scoring>(game: &mut Game<ManualTimer, S, ReplaySource>, dx: i32) {
    let command = if dx < 0 { Command::Left } else { Command::Right };
    for _ in 0..dx.abs() {
        game.apply(command).unwrap();
    }
    loop {
        game.tick().unwrap();
        if game.last_action() == Action::Land {
            break;
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(
        BoardConfig::default(),
        ManualTimer::new(),
        ClassicScoring::new(),
        PieceGenerator::new(12345),
    )
    .unwrap();

    assert!(game.is_paused());
    assert_eq!(game.current().kind(), PieceKind::Z);
    assert_eq!(game.preview(0).unwrap().kind(), PieceKind::J);
    assert_eq!(game.score(), 1);

    game.handle(Event::Command(Command::Resume)).unwrap();
    assert!(!game.is_paused());
    assert_eq!(
        game.timer().last_interval,
        Some(Duration::from_millis(999))
    );

    game.handle(Event::Tick).unwrap();
    assert_eq!(game.last_action(), Action::Down);

    game.handle(Event::Command(Command::Pause)).unwrap();
    assert!(game.is_paused());
    assert!(!game.is_over());
}

#[test]
fn test_history_records_every_attempt() {
    let mut game = Game::new(
        BoardConfig::default(),
        ManualTimer::new(),
        RecordingScoring::new(),
        replay("II"),
    )
    .unwrap();

    game.apply(Command::Right).unwrap();
    game.apply(Command::Right).unwrap();
    game.apply(Command::Rotate).unwrap();
    game.apply(Command::SoftDrop).unwrap();

    assert_eq!(
        game.history(),
        &[
            Action::TryRight,
            Action::Right,
            Action::TryRight,
            Action::CollisionWall,
            Action::TryRotate,
            Action::Rotate,
            Action::SoftDrop,
            Action::Down,
        ]
    );
}

#[test]
fn test_filling_two_rows_clears_them() {
    let mut game = Game::new(
        BoardConfig::default(),
        ManualTimer::new(),
        ClassicScoring::new(),
        replay("OOOOOOO"),
    )
    .unwrap();

    for dx in [-5, -3, -1, 1] {
        drop_at(&mut game, dx);
    }
    assert_eq!(game.settled_blocks().len(), 16);
    assert!(game.find_completed_rows().is_empty());

    drop_at(&mut game, 3);
    assert!(game.settled_blocks().is_empty());
    assert_eq!(game.completed_lines(), 2);
    // six spawns plus 100 for a double at level 1
    assert_eq!(game.score(), 106);
    assert_eq!(game.level(), 1);
}

#[test]
fn test_modern_rule_pays_perfect_clear() {
    let mut game = Game::new(
        BoardConfig::default(),
        ManualTimer::new(),
        ModernScoring::new(),
        replay("OOOOOOO"),
    )
    .unwrap();

    for dx in [-5, -3, -1, 1, 3] {
        drop_at(&mut game, dx);
    }
    assert_eq!(game.completed_lines(), 2);
    assert_eq!(game.score(), 100 + 1200);
}

#[test]
fn test_level_up_restarts_timer_with_faster_gravity() {
    let mut game = Game::new(
        BoardConfig::default(),
        ManualTimer::new(),
        ClassicScoring::new(),
        replay("IIII"),
    )
    .unwrap();
    game.apply(Command::Resume).unwrap();
    game.tick().unwrap();

    // nine full rows below, plus row 1 missing exactly the bar's cells
    for y in 2..11 {
        let row = (0..BOARD_WIDTH).map(|x| Block::new(Position::new(x, y), Color::Red));
        game.place_blocks(row).unwrap();
    }
    let gap_row = (0..BOARD_WIDTH)
        .filter(|x| !(5..9).contains(x))
        .map(|x| Block::new(Position::new(x, 1), Color::Red));
    game.place_blocks(gap_row).unwrap();

    game.tick().unwrap();
    assert_eq!(game.completed_lines(), 10);
    assert_eq!(game.level(), 2);
    assert_eq!(game.timer().start_calls, 2);
    assert_eq!(
        game.timer().last_interval,
        Some(Duration::from_millis(793))
    );
    assert!(game.settled_blocks().is_empty());
}

#[test]
fn test_boxed_collaborators() {
    let mut game = Game::new(
        BoardConfig {
            width: 7,
            height: 8,
            preview_depth: 3,
        },
        Box::new(ManualTimer::new()),
        ScoringRule::Modern.build(),
        Box::new(PieceGenerator::new(7)),
    )
    .unwrap();

    assert_eq!(game.start_position(), Position::new(3, 0));
    assert_eq!(game.floor().len(), 9);
    assert_eq!(game.left_wall().len(), 8);
    assert_eq!(game.upcoming().count(), 3);
    game.apply(Command::Resume).unwrap();
    game.tick().unwrap();
    assert!(!game.is_paused());
}

#[test]
fn test_board_too_narrow_for_bar_rejected() {
    let result = Game::new(
        BoardConfig {
            width: 6,
            height: 8,
            preview_depth: 1,
        },
        ManualTimer::new(),
        ClassicScoring::new(),
        replay("IIII"),
    );
    assert!(matches!(
        result,
        Err(Error::InvalidBoard {
            width: 6,
            height: 8
        })
    ));
}

#[test]
fn test_zero_preview_depth_rejected() {
    let result = Game::new(
        BoardConfig {
            preview_depth: 0,
            ..BoardConfig::default()
        },
        ManualTimer::new(),
        ClassicScoring::new(),
        PieceGenerator::new(1),
    );
    assert!(matches!(result, Err(Error::InvalidPreviewDepth)));
}

#[test]
fn test_seeded_games_are_reproducible() {
    let play = |seed| {
        let mut game = Game::new(
            BoardConfig::default(),
            ManualTimer::new(),
            ClassicScoring::new(),
            PieceGenerator::new(seed),
        )
        .unwrap();
        for i in 0..300 {
            let command = [Command::Left, Command::Rotate, Command::Right][i % 3];
            game.apply(command).unwrap();
            game.tick().unwrap();
        }
        game.history().to_vec()
    };

    assert_eq!(play(99), play(99));
}

#[test]
fn test_minimal_end_to_end_game() {
    let mut game = Game::new(
        BoardConfig::default(),
        ManualTimer::new(),
        ClassicScoring::new(),
        PieceGenerator::new(12345),
    )
    .unwrap();
    game.apply(Command::Resume).unwrap();

    let mut steps = 0;
    while !game.is_over() {
        let command = if steps % 2 == 0 {
            Command::Left
        } else {
            Command::Right
        };
        game.handle(Event::Command(command)).unwrap();
        game.handle(Event::Tick).unwrap();
        steps += 1;
        assert!(steps < 10_000, "game never ended");
    }

    let landings = game
        .history()
        .iter()
        .filter(|a| **a == Action::Land)
        .count();
    assert_eq!(landings, 15);
    assert_eq!(game.settled_blocks().len(), 60);
    assert_eq!(game.score(), 16);
    assert_eq!(game.last_action(), Action::GameOver);
    assert!(game.is_paused());

    // the stack stays inside the playfield
    assert!(game
        .settled_blocks()
        .iter()
        .all(|b| (0..BOARD_WIDTH).contains(&b.position().x)));
}
