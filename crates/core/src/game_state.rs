//! Game state module - the session struct and its phase machine
//!
//! Ties the grid, the falling piece, scoring and the piece generator together.
//! The caller drives it with [`GameState::step`], once per tick, handing in the
//! current time and the two collaborators.
//!
//! | Phase      | Entered when                               | Leaves to            |
//! |------------|--------------------------------------------|----------------------|
//! | `Idle`     | `reset`                                    | `Spawning` (confirm) |
//! | `Falling`  | a piece was spawned                        | `Locking`            |
//! | `Locking`  | a downward move collided                   | `Clearing`           |
//! | `Clearing` | the piece was written as settled           | `Spawning`           |
//! | `Spawning` | session start, or after every clear        | `Falling`/`GameOver` |
//! | `GameOver` | the queued piece collided at spawn         | `Idle` (`reset`)     |
//!
//! `Locking`, `Clearing` and `Spawning` are transient: they run to completion
//! inside the step that entered them.

use crate::collision::collides;
use crate::grid::Grid;
use crate::piece::{ActivePiece, Motion, PieceState};
use crate::render::RowDiff;
use crate::rng::SimpleRng;
use crate::scoring::{Progress, ScoreResult};
use crate::types::{CellStatus, Difficulty, InputEvent, InputSource, PieceKind, Renderer};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Menu: choosing a difficulty
    Idle,
    /// A piece is falling and accepts input
    Falling,
    /// The falling piece landed and is being settled
    Locking,
    /// Complete rows among visible rows `[from, to)` are being removed
    Clearing { from: u8, to: u8 },
    /// The queued piece is being placed
    Spawning,
    /// The stack topped out
    GameOver,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    piece: Option<PieceState>,
    phase: Phase,
    difficulty: Difficulty,
    progress: Progress,
    next_kind: PieceKind,
    /// Timestamp of the last gravity step (or session start)
    drop_started_ms: u64,
    rng: SimpleRng,
    rows: RowDiff,
    /// Outcome of the most recent lock (consumed by observers)
    last_lock: Option<ScoreResult>,
}

impl GameState {
    /// Create a session in the menu with the given RNG seed
    ///
    /// Nothing is drawn; call [`GameState::reset`] to paint the menu.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next_kind = rng.next_piece();
        Self {
            grid: Grid::new(),
            piece: None,
            phase: Phase::Idle,
            difficulty: Difficulty::Easy,
            progress: Progress::new(Difficulty::Easy),
            next_kind,
            drop_started_ms: 0,
            rng,
            rows: RowDiff::new(),
            last_lock: None,
        }
    }

    /// Return to the menu with score and lines zeroed
    pub fn reset<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.phase = Phase::Idle;
        self.difficulty = Difficulty::Easy;
        self.progress = Progress::new(self.difficulty);
        self.piece = None;
        self.last_lock = None;
        self.grid.reset();
        self.rows.invalidate();
        self.next_kind = self.rng.next_piece();

        renderer.clear_all();
        renderer.draw_score(self.progress.score());
        renderer.draw_next_piece_hint(self.next_kind);
        renderer.draw_menu(self.difficulty);
        log::debug!("back to menu");
    }

    /// Advance the session by one tick
    ///
    /// Polls `input` once (except after game over) and applies at most one action
    /// or one gravity step. Returns false once the session is over.
    pub fn step<I, R>(&mut self, now_ms: u64, input: &mut I, renderer: &mut R) -> bool
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        match self.phase {
            Phase::GameOver => return false,
            Phase::Idle => {
                let event = input.poll();
                self.handle_menu(event, now_ms, renderer);
            }
            _ => {
                let event = input.poll();
                let motion = if self.gravity_due(now_ms) {
                    self.drop_started_ms = now_ms;
                    Some(Motion::Down)
                } else {
                    Motion::from_event(event)
                };
                if let Some(motion) = motion {
                    self.apply_motion(motion, renderer);
                }
            }
        }

        self.advance(input, renderer);
        self.phase != Phase::GameOver
    }

    fn gravity_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.drop_started_ms) > u64::from(self.progress.drop_interval_ms())
    }

    fn handle_menu<R: Renderer + ?Sized>(
        &mut self,
        event: InputEvent,
        now_ms: u64,
        renderer: &mut R,
    ) {
        match event {
            InputEvent::SoftDrop => {
                self.difficulty = self.difficulty.next();
                renderer.draw_menu(self.difficulty);
            }
            InputEvent::Rotate => self.start(now_ms, renderer),
            InputEvent::None | InputEvent::MoveLeft | InputEvent::MoveRight => {}
        }
    }

    fn start<R: Renderer + ?Sized>(&mut self, now_ms: u64, renderer: &mut R) {
        self.progress = Progress::new(self.difficulty);
        self.grid.reset();
        self.piece = None;
        self.last_lock = None;
        self.drop_started_ms = now_ms;

        renderer.clear_all();
        self.rows.invalidate();
        renderer.draw_score(self.progress.score());

        log::info!(
            "session started: difficulty={} interval={}ms",
            self.difficulty.label(),
            self.progress.drop_interval_ms()
        );
        self.phase = Phase::Spawning;
    }

    fn apply_motion<R: Renderer + ?Sized>(&mut self, motion: Motion, renderer: &mut R) {
        let Some(state) = self.piece.as_mut() else {
            return;
        };

        state.apply(motion);
        if collides(state.active(), &self.grid) {
            state.rollback();
            if motion.is_down() {
                self.phase = Phase::Locking;
            }
            return;
        }

        let (backup, active) = (*state.backup(), *state.active());
        self.grid.write(&backup, CellStatus::ToClear);
        self.grid.write(&active, CellStatus::ToDraw);
        self.rows.flush(&mut self.grid, renderer);
    }

    /// Run transient phases until the session rests in a stable one
    fn advance<I, R>(&mut self, input: &mut I, renderer: &mut R)
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        loop {
            match self.phase {
                Phase::Locking => self.lock(),
                Phase::Clearing { from, to } => self.clear_lines(from, to, renderer),
                Phase::Spawning => self.spawn(input, renderer),
                Phase::Idle | Phase::Falling | Phase::GameOver => break,
            }
        }
    }

    fn lock(&mut self) {
        let Some(state) = self.piece.take() else {
            self.phase = Phase::Spawning;
            return;
        };

        let piece = *state.active();
        self.grid.write(&piece, CellStatus::Settled);
        log::debug!("locked {} at ({}, {})", piece.kind.as_str(), piece.x, piece.y);

        let (bottom, top) = piece.envelope_rows();
        let (from, to) = Grid::visible_span(bottom, top);
        self.phase = Phase::Clearing {
            from: from as u8,
            to: to as u8,
        };
    }

    fn clear_lines<R: Renderer + ?Sized>(&mut self, from: u8, to: u8, renderer: &mut R) {
        let cleared = self.grid.mark_complete_rows(from as usize, to as usize);
        let result = self.progress.record_lock(cleared);

        if cleared > 0 {
            // Blank the completed rows first, then drop everything above them.
            self.rows.flush(&mut self.grid, renderer);
            renderer.draw_score(self.progress.score());
            self.grid.compact(cleared);
            self.rows.flush(&mut self.grid, renderer);
            log::info!(
                "cleared {} line(s): +{} score={} lines={}",
                cleared,
                result.points,
                self.progress.score(),
                self.progress.lines()
            );
        }
        if result.milestone {
            log::info!(
                "milestone: award_factor={} interval={}ms",
                self.progress.award_factor(),
                self.progress.drop_interval_ms()
            );
        }

        self.last_lock = Some(result);
        self.phase = Phase::Spawning;
    }

    fn spawn<I, R>(&mut self, input: &mut I, renderer: &mut R)
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        // Tested off-grid first: a topped-out spawn must leave the grid untouched.
        let candidate = ActivePiece::spawn(self.next_kind);
        if collides(&candidate, &self.grid) {
            self.phase = Phase::GameOver;
            renderer.draw_game_over();
            log::info!(
                "game over: score={} lines={}",
                self.progress.score(),
                self.progress.lines()
            );
            return;
        }

        self.grid.write(&candidate, CellStatus::ToDraw);
        self.piece = Some(PieceState::new(candidate));
        input.reset_repeat();

        self.next_kind = self.rng.next_piece();
        renderer.draw_next_piece_hint(self.next_kind);
        self.rows.flush(&mut self.grid, renderer);
        self.phase = Phase::Falling;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines()
    }

    pub fn award_factor(&self) -> u32 {
        self.progress.award_factor()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms()
    }

    /// Piece that will be spawned next
    pub fn next_piece(&self) -> PieceKind {
        self.next_kind
    }

    /// Override the queued piece (for scripted sessions)
    pub fn set_next_piece(&mut self, kind: PieceKind) {
        self.next_kind = kind;
    }

    /// The falling piece, if any
    pub fn active(&self) -> Option<&ActivePiece> {
        self.piece.as_ref().map(|state| state.active())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get mutable grid (for test setups)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Take and clear the outcome of the last lock
    pub fn take_last_lock(&mut self) -> Option<ScoreResult> {
        self.last_lock.take()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PLAYGROUND_WIDTH;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ClearAll,
        Score(u32),
        Next(PieceKind),
        Row(u8),
        Menu(Difficulty),
        GameOver,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer for Recorder {
        fn clear_all(&mut self) {
            self.calls.push(Call::ClearAll);
        }
        fn draw_score(&mut self, score: u32) {
            self.calls.push(Call::Score(score));
        }
        fn draw_next_piece_hint(&mut self, kind: PieceKind) {
            self.calls.push(Call::Next(kind));
        }
        fn draw_playground_row(&mut self, row: u8, _cells: &[CellStatus; PLAYGROUND_WIDTH]) {
            self.calls.push(Call::Row(row));
        }
        fn draw_menu(&mut self, selected: Difficulty) {
            self.calls.push(Call::Menu(selected));
        }
        fn draw_game_over(&mut self) {
            self.calls.push(Call::GameOver);
        }
    }

    #[derive(Default)]
    struct Script {
        events: VecDeque<InputEvent>,
        resets: u32,
    }

    impl Script {
        fn push(&mut self, event: InputEvent) -> &mut Self {
            self.events.push_back(event);
            self
        }
    }

    impl InputSource for Script {
        fn poll(&mut self) -> InputEvent {
            self.events.pop_front().unwrap_or_default()
        }
        fn reset_repeat(&mut self) {
            self.resets += 1;
        }
    }

    fn started(next: PieceKind) -> (GameState, Script, Recorder) {
        let mut game = GameState::new(7);
        let mut input = Script::default();
        let mut out = Recorder::default();
        game.reset(&mut out);
        game.set_next_piece(next);
        input.push(InputEvent::Rotate);
        assert!(game.step(0, &mut input, &mut out));
        (game, input, out)
    }

    #[test]
    fn test_new_game_state() {
        let game = GameState::new(1);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.difficulty(), Difficulty::Easy);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert!(game.active().is_none());
    }

    #[test]
    fn test_reset_paints_menu() {
        let mut game = GameState::new(1);
        let mut out = Recorder::default();
        game.reset(&mut out);
        assert_eq!(
            out.calls,
            vec![
                Call::ClearAll,
                Call::Score(0),
                Call::Next(game.next_piece()),
                Call::Menu(Difficulty::Easy),
            ]
        );
    }

    #[test]
    fn test_menu_cycles_difficulty() {
        let mut game = GameState::new(1);
        let mut input = Script::default();
        let mut out = Recorder::default();

        for expected in [Difficulty::Normal, Difficulty::Hard, Difficulty::Easy] {
            input.push(InputEvent::SoftDrop);
            assert!(game.step(0, &mut input, &mut out));
            assert_eq!(game.difficulty(), expected);
            assert_eq!(out.calls.last(), Some(&Call::Menu(expected)));
        }

        // Moves are ignored in the menu.
        input.push(InputEvent::MoveLeft);
        game.step(0, &mut input, &mut out);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(out.calls.len(), 3);
    }

    #[test]
    fn test_confirm_starts_session() {
        let (game, input, out) = started(PieceKind::T);
        assert_eq!(game.phase(), Phase::Falling);
        assert_eq!(game.active().map(|p| p.kind), Some(PieceKind::T));
        assert_eq!(input.resets, 1);

        let start = out.calls.iter().rposition(|c| *c == Call::ClearAll).unwrap();
        assert_eq!(out.calls[start + 1], Call::Score(0));
        assert!(matches!(out.calls[start + 2], Call::Next(_)));
        // T reaches into the top visible row at spawn.
        assert_eq!(out.calls[start + 3], Call::Row(19));
    }

    #[test]
    fn test_difficulty_defaults_apply_on_start() {
        let mut game = GameState::new(1);
        let mut input = Script::default();
        let mut out = Recorder::default();
        input
            .push(InputEvent::SoftDrop)
            .push(InputEvent::SoftDrop)
            .push(InputEvent::Rotate);
        for _ in 0..3 {
            game.step(0, &mut input, &mut out);
        }
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.drop_interval_ms(), 200);
        assert_eq!(game.award_factor(), 2);
    }

    #[test]
    fn test_gravity_moves_piece_and_drops_event() {
        let (mut game, mut input, mut out) = started(PieceKind::O);
        let spawn = *game.active().unwrap();

        // Not yet due at exactly the interval.
        game.step(500, &mut input, &mut out);
        assert_eq!(game.active().unwrap().y, spawn.y);

        input.push(InputEvent::MoveLeft);
        game.step(501, &mut input, &mut out);
        let moved = *game.active().unwrap();
        assert_eq!((moved.x, moved.y), (spawn.x, spawn.y - 1));

        // Gravity restarted from the last drop.
        game.step(1000, &mut input, &mut out);
        assert_eq!(game.active().unwrap().y, spawn.y - 1);
    }

    #[test]
    fn test_illegal_move_is_rolled_back() {
        let (mut game, mut input, mut out) = started(PieceKind::O);
        for _ in 0..10 {
            input.push(InputEvent::MoveLeft);
            game.step(0, &mut input, &mut out);
        }
        let piece = game.active().unwrap();
        assert!(piece.cells().iter().any(|&(x, _)| x == 2));
        assert!(game.grid().sentinels_intact());
    }

    #[test]
    fn test_soft_drop_locks_on_floor() {
        let (mut game, mut input, mut out) = started(PieceKind::O);
        for _ in 0..21 {
            input.push(InputEvent::SoftDrop);
            game.step(0, &mut input, &mut out);
        }

        let lock = game.take_last_lock().unwrap();
        assert_eq!(lock.lines, 0);
        assert_eq!(game.score(), 0);
        for (col, row) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
            assert_eq!(game.grid().playable(col, row), CellStatus::Settled);
        }
        assert_eq!(game.phase(), Phase::Falling);
        assert_eq!(input.resets, 2);
    }

    #[test]
    fn test_game_over_leaves_grid_untouched() {
        let (mut game, mut input, mut out) = started(PieceKind::I);
        // Lock the I in the overflow band right away.
        game.grid_mut().set(5, 20, CellStatus::Settled);
        game.set_next_piece(PieceKind::O);

        input.push(InputEvent::SoftDrop);
        assert!(!game.step(0, &mut input, &mut out));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(out.calls.last(), Some(&Call::GameOver));
        // The O was never written.
        assert_eq!(game.grid().status(7, 22), CellStatus::Empty);
        assert!(game.active().is_none());

        // Input is ignored until reset.
        input.push(InputEvent::Rotate);
        assert!(!game.step(0, &mut input, &mut out));
        assert_eq!(input.events.len(), 1);

        game.reset(&mut out);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.score(), 0);
    }
}
