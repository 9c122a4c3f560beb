//! Piece state - the falling piece and its rollback snapshot

use arrayvec::ArrayVec;

use crate::pieces::{block_map, occupied_offsets, rotate, BlockMap};
use crate::types::{InputEvent, PieceKind, ENVELOPE, SPAWN_POSITION};

/// A single transformation applied to the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Down,
    Rotate,
}

impl Motion {
    /// Map an input event to a motion (`None` for [`InputEvent::None`])
    pub fn from_event(event: InputEvent) -> Option<Self> {
        match event {
            InputEvent::None => None,
            InputEvent::MoveLeft => Some(Motion::Left),
            InputEvent::MoveRight => Some(Motion::Right),
            InputEvent::SoftDrop => Some(Motion::Down),
            InputEvent::Rotate => Some(Motion::Rotate),
        }
    }

    /// Downward motions lock the piece when they collide
    pub fn is_down(self) -> bool {
        self == Motion::Down
    }
}

/// A piece placed on the grid: its current occupancy map and envelope origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub blocks: BlockMap,
    /// Grid column of the envelope origin
    pub x: i8,
    /// Grid row of the envelope origin (may go negative while resting on the floor)
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece in its canonical orientation at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            blocks: block_map(kind),
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Grid coordinates of every occupied cell
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        occupied_offsets(&self.blocks)
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated 90° inside its envelope
    pub fn rotated(&self) -> Self {
        Self {
            blocks: rotate(&self.blocks),
            ..*self
        }
    }

    /// Apply a motion, returning the moved piece
    pub fn apply(&self, motion: Motion) -> Self {
        match motion {
            Motion::Left => self.shifted(-1, 0),
            Motion::Right => self.shifted(1, 0),
            Motion::Down => self.shifted(0, -1),
            Motion::Rotate => self.rotated(),
        }
    }

    /// Grid rows covered by the envelope, `[bottom, top)`
    pub fn envelope_rows(&self) -> (i8, i8) {
        (self.y, self.y + ENVELOPE as i8)
    }
}

/// The falling piece together with its last known legal placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceState {
    active: ActivePiece,
    backup: ActivePiece,
}

impl PieceState {
    pub fn new(piece: ActivePiece) -> Self {
        Self {
            active: piece,
            backup: piece,
        }
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    /// Placement before the most recent motion
    pub fn backup(&self) -> &ActivePiece {
        &self.backup
    }

    /// Snapshot the current placement, then apply `motion`
    pub fn apply(&mut self, motion: Motion) {
        self.backup = self.active;
        self.active = self.active.apply(motion);
    }

    /// Restore the snapshot taken by the last [`PieceState::apply`]
    pub fn rollback(&mut self) {
        self.active = self.backup;
    }
}
