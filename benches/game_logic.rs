use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mini_tetris::core::{block_map, collides, rotate, ActivePiece, GameState, Grid, Motion};
use mini_tetris::types::{
    CellStatus, Difficulty, InputEvent, InputSource, PieceKind, Renderer, PLAYGROUND_WIDTH,
};

struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear_all(&mut self) {}
    fn draw_score(&mut self, score: u32) {
        black_box(score);
    }
    fn draw_next_piece_hint(&mut self, kind: PieceKind) {
        black_box(kind);
    }
    fn draw_playground_row(&mut self, row: u8, cells: &[CellStatus; PLAYGROUND_WIDTH]) {
        black_box((row, cells));
    }
    fn draw_menu(&mut self, selected: Difficulty) {
        black_box(selected);
    }
    fn draw_game_over(&mut self) {}
}

/// Cycles through a fixed pattern of moves
struct Pattern {
    at: usize,
}

const PATTERN: [InputEvent; 6] = [
    InputEvent::Rotate,
    InputEvent::MoveLeft,
    InputEvent::SoftDrop,
    InputEvent::MoveRight,
    InputEvent::None,
    InputEvent::SoftDrop,
];

impl InputSource for Pattern {
    fn poll(&mut self) -> InputEvent {
        self.at = (self.at + 1) % PATTERN.len();
        PATTERN[self.at]
    }
    fn reset_repeat(&mut self) {}
}

fn bench_step(c: &mut Criterion) {
    let mut game = GameState::new(12345);
    let mut out = NullRenderer;
    let mut input = Pattern { at: 0 };
    game.reset(&mut out);
    let mut now = 0u64;

    c.bench_function("game_step_5ms", |b| {
        b.iter(|| {
            now += 5;
            if !game.step(black_box(now), &mut input, &mut out) {
                game.reset(&mut out);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for row in 0..4 {
                for col in 0..PLAYGROUND_WIDTH {
                    grid.set_playable(col, row, CellStatus::Settled);
                }
            }
            let cleared = grid.mark_complete_rows(0, 4);
            grid.compact(cleared);
            black_box(&grid);
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let grid = Grid::new();
    let piece = ActivePiece::spawn(PieceKind::T).apply(Motion::Down);

    c.bench_function("collides", |b| {
        b.iter(|| collides(black_box(&piece), &grid))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let map = block_map(PieceKind::L);

    c.bench_function("rotate", |b| b.iter(|| rotate(black_box(&map))));
}

criterion_group!(
    benches,
    bench_step,
    bench_line_clear,
    bench_collides,
    bench_rotate
);
criterion_main!(benches);
