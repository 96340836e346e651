//! Game scenarios driven through the public engine API.

use blocktris::arena::LINE_SCORE;
use blocktris::{
    Arena, DropResult, GameConfig, GameState, Matrix, PieceKind, Position, Rotation, ScoreSink,
    Spawn, create_piece,
};

fn new_game(seed: u64) -> GameState {
    GameState::new(&GameConfig {
        seed,
        ..GameConfig::default()
    })
}

fn fill_row_except(arena: &mut Arena, y: i32, gaps: &[i32], value: u8) {
    for x in 0..arena.width() as i32 {
        if !gaps.contains(&x) {
            arena.set(x, y, value);
        }
    }
}

/// Drop until the piece locks.
fn lock(game: &mut GameState) -> DropResult {
    loop {
        let result = game.drop_piece();
        if result != DropResult::Fell {
            return result;
        }
    }
}

#[derive(Default)]
struct Display {
    pushed: Vec<u64>,
}

impl ScoreSink for Display {
    fn show_score(&mut self, score: u64) {
        self.pushed.push(score);
    }
}

#[test]
fn test_o_piece_left_wall_scenario() {
    let mut game = new_game(1);
    assert_eq!(game.spawn(PieceKind::O), Spawn::Clean);
    assert_eq!(game.player.pos, Position::new(5, 0));
    for _ in 0..9 {
        game.move_left();
    }
    assert_eq!(game.player.pos.x, 0);
    assert!(!game.move_left());
    assert_eq!(game.player.pos.x, 0);
}

#[test]
fn test_filling_the_gap_clears_one_row() {
    let mut game = new_game(2);
    fill_row_except(&mut game.arena, 19, &[5, 6], 3);
    game.arena.set(0, 18, 7);
    game.spawn(PieceKind::O);

    let result = lock(&mut game);
    let DropResult::Locked { sweep, spawn } = result else {
        panic!("expected lock, got {:?}", result);
    };
    assert_eq!(sweep.rows, 1);
    assert_eq!(sweep.score, LINE_SCORE);
    assert_eq!(spawn, Spawn::Clean);
    assert_eq!(game.score(), 10);
    assert_eq!(game.lines_cleared, 1);

    // Row 18 (one settled cell plus the O's upper half) moved down to 19.
    assert_eq!(game.arena.get(0, 19), Some(7));
    assert_eq!(game.arena.get(5, 19), Some(2));
    assert_eq!(game.arena.get(6, 19), Some(2));
    assert_eq!(game.arena.get(1, 19), Some(0));
    assert!(game.arena.cells().rows()[0].iter().all(|&v| v == 0));
    assert!(game.arena.cells().rows()[18].iter().all(|&v| v == 0));
}

#[test]
fn test_vertical_i_clears_four_rows_with_bonus() {
    let mut game = new_game(3);
    for y in 16..20 {
        fill_row_except(&mut game.arena, y, &[5], 1);
    }
    game.spawn(PieceKind::I);
    // The I piece occupies matrix column 1: spawn x=4 puts it in column 5.
    assert_eq!(game.player.pos.x, 4);
    let DropResult::Locked { sweep, .. } = lock(&mut game) else {
        panic!("expected lock");
    };
    assert_eq!(sweep.rows, 4);
    assert_eq!(sweep.score, 10 + 20 + 40 + 80);
    assert_eq!(game.score(), 150);
    assert!(game.arena.is_empty());
}

#[test]
fn test_score_law_for_every_row_count() {
    for n in 0..=20usize {
        let mut arena = Arena::new(12, 20);
        for k in 0..n {
            fill_row_except(&mut arena, 19 - k as i32, &[], 4);
        }
        let sweep = arena.sweep();
        assert_eq!(sweep.rows as usize, n);
        assert_eq!(sweep.score, 10 * ((1u64 << n) - 1), "n={}", n);
        assert_eq!(arena.sweep().rows, 0);
    }
}

#[test]
fn test_game_over_wipes_board_and_score_then_recovers() {
    let mut game = new_game(4);
    let mut display = Display::default();
    game.flush_score(&mut display);

    game.player.score = 500;
    for y in 0..4 {
        fill_row_except(&mut game.arena, y, &[0], 6);
    }
    assert_eq!(game.reset(), Spawn::GameOver);
    assert!(game.arena.is_empty());
    assert_eq!(game.score(), 0);
    assert!(!game.arena.collides(&game.player.matrix, game.player.pos));

    game.flush_score(&mut display);
    assert_eq!(display.pushed, vec![0, 0]);

    for _ in 0..20 {
        assert_eq!(game.reset(), Spawn::Clean);
    }
}

#[test]
fn test_lock_into_blocked_spawn_is_game_over() {
    let mut game = new_game(5);
    // Tall column under the spawn area, with one free row at the top.
    for y in 2..20 {
        for x in 3..9 {
            game.arena.set(x, y, 5);
        }
    }
    game.spawn(PieceKind::O);
    let result = lock(&mut game);
    assert_eq!(
        result,
        DropResult::Locked {
            sweep: Default::default(),
            spawn: Spawn::GameOver
        }
    );
    assert!(game.arena.is_empty());
    assert_eq!(game.games_over, 1);
}

#[test]
fn test_gravity_runs_on_supplied_timestamps() {
    let mut game = new_game(6);
    game.spawn(PieceKind::T);
    let mut drops = 0;
    for frame in 0..=600u64 {
        // ~60 FPS for ten seconds.
        if game.update(frame * 16 + frame / 3).is_some() {
            drops += 1;
        }
    }
    assert_eq!(drops, 9);
    assert_eq!(game.player.pos.y, 9);
}

#[test]
fn test_moves_never_leave_a_colliding_state() {
    let mut game = new_game(7);
    fill_row_except(&mut game.arena, 19, &[0, 11], 2);
    for step in 0..400 {
        match step % 5 {
            0 => {
                game.move_left();
            }
            1 => {
                game.rotate_cw();
            }
            2 => {
                game.move_right();
            }
            3 => {
                game.rotate_ccw();
            }
            _ => {
                game.drop_piece();
            }
        }
        assert!(!game.arena.collides(&game.player.matrix, game.player.pos));
        assert!(game.arena.cells().occupied().all(|(_, _, v)| (1..=7).contains(&v)));
    }
}

#[test]
fn test_rotation_round_trip_on_catalogue() {
    for kind in PieceKind::ALL {
        let original = create_piece(kind);
        let mut m: Matrix = original.clone();
        m.rotate(Rotation::Clockwise);
        m.rotate(Rotation::CounterClockwise);
        assert_eq!(m, original, "{}", kind);
    }
}

#[test]
fn test_zero_width_arena_keeps_running() {
    let mut game = GameState::new(&GameConfig {
        width: 0,
        height: 4,
        ..GameConfig::default()
    });
    for frame in 0..5u64 {
        game.drop_piece();
        game.update(frame * 1500);
    }
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines_cleared, 0);
}

#[test]
fn test_separate_games_do_not_share_state() {
    let mut a = new_game(8);
    let b = new_game(8);
    a.spawn(PieceKind::O);
    lock(&mut a);
    assert!(!a.arena.is_empty());
    assert!(b.arena.is_empty());
}
