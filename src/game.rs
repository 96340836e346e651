//! Game state: arena, active piece, drop timer, scoring and spawn.

use crate::arena::{Arena, Sweep};
use crate::config::GameConfig;
use crate::matrix::Rotation;
use crate::player::Player;
use crate::shape::PieceKind;

/// Receives the score whenever it changes.
pub trait ScoreSink {
    fn show_score(&mut self, score: u64);
}

/// Outcome of spawning the next piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    Clean,
    /// Spawn position was blocked: arena wiped and score reset, play continues.
    GameOver,
}

/// Outcome of one downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    Fell,
    Locked { sweep: Sweep, spawn: Spawn },
}

/// Gravity clock driven by caller-supplied timestamps (ms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTimer {
    pub counter: u64,
    pub interval: u64,
    pub last_time: u64,
}

impl DropTimer {
    pub fn new(interval: u64) -> Self {
        Self {
            counter: 0,
            interval,
            last_time: 0,
        }
    }

    /// Accumulate time since the previous call. True once the counter exceeds
    /// the interval. Timestamps going backwards add nothing.
    pub fn advance(&mut self, time: u64) -> bool {
        let delta = time.saturating_sub(self.last_time);
        self.last_time = time;
        self.counter = self.counter.saturating_add(delta);
        self.counter > self.interval
    }

    /// Move `last_time` to `time` without accumulating (after a pause).
    pub fn rebase(&mut self, time: u64) {
        self.last_time = time;
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

/// Seedable piece picker (LCG, high bits).
#[derive(Debug, Clone)]
pub struct PieceRng {
    state: u32,
}

impl PieceRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ (seed >> 32)) as u32,
        }
    }

    fn next_rand(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        self.state >> 16
    }

    /// Uniform over `PieceKind::ALL`.
    pub fn next_kind(&mut self) -> PieceKind {
        let n = PieceKind::ALL.len() as u32;
        // 16-bit draws; reject the tail that would bias the low kinds.
        let limit = (1 << 16) - (1 << 16) % n;
        loop {
            let r = self.next_rand();
            if r < limit {
                return PieceKind::ALL[(r % n) as usize];
            }
        }
    }
}

/// Everything one session owns. No globals: several may coexist.
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub player: Player,
    pub timer: DropTimer,
    rng: PieceRng,
    pub lines_cleared: u32,
    pub games_over: u32,
    score_dirty: bool,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = PieceRng::new(config.seed);
        let first = rng.next_kind();
        let mut state = Self {
            arena: Arena::new(config.width, config.height),
            player: Player::new(first),
            timer: DropTimer::new(config.drop_interval_ms),
            rng,
            lines_cleared: 0,
            games_over: 0,
            score_dirty: true,
        };
        state.spawn(first);
        state
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.player.score
    }

    /// Spawn a random piece.
    pub fn reset(&mut self) -> Spawn {
        let kind = self.rng.next_kind();
        self.spawn(kind)
    }

    /// Spawn `kind` centred at the top. A blocked spawn wipes the arena and the
    /// score; the piece then stays where it spawned, which is now clear.
    pub fn spawn(&mut self, kind: PieceKind) -> Spawn {
        if self.player.spawn(&self.arena, kind) {
            return Spawn::Clean;
        }
        self.arena.clear();
        self.player.score = 0;
        self.lines_cleared = 0;
        self.games_over += 1;
        self.score_dirty = true;
        Spawn::GameOver
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    /// Shift by `dir` columns; refused (false) if the new position collides.
    pub fn shift(&mut self, dir: i32) -> bool {
        self.player.shift(&self.arena, dir)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(Rotation::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(Rotation::CounterClockwise)
    }

    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        self.player.rotate(&self.arena, rotation)
    }

    /// One row down (gravity and soft drop). When blocked, the piece locks,
    /// full rows are swept and the next piece spawns. The drop timer restarts
    /// either way.
    pub fn drop_piece(&mut self) -> DropResult {
        let result = if self.player.step_down(&self.arena) {
            DropResult::Fell
        } else {
            self.arena.merge(&self.player.matrix, self.player.pos);
            let sweep = self.arena.sweep();
            if sweep.rows > 0 {
                self.player.score = self.player.score.saturating_add(sweep.score);
                self.lines_cleared += sweep.rows;
                self.score_dirty = true;
            }
            let spawn = self.reset();
            DropResult::Locked { sweep, spawn }
        };
        self.timer.reset();
        result
    }

    /// Per-frame step with a monotonically increasing timestamp in ms.
    /// Returns the drop outcome when gravity fired this frame.
    pub fn update(&mut self, time: u64) -> Option<DropResult> {
        self.timer.advance(time).then(|| self.drop_piece())
    }

    /// Push the score to `sink` if it changed since the last call.
    pub fn flush_score(&mut self, sink: &mut impl ScoreSink) {
        if self.score_dirty {
            sink.show_score(self.player.score);
            self.score_dirty = false;
        }
    }
}
