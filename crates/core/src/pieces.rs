//! Pieces module - piece footprints, pivot rotation and rotate kicks
//!
//! Every piece is a pivot cell plus three offsets. Rotation turns the offsets
//! about the pivot in exact quarter turns; no lookup of pre-rotated shapes.
//! With row 0 at the bottom, one quarter turn maps `(dx, dy)` to `(dy, -dx)`,
//! which is clockwise on screen.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Offset of a single cell relative to the pivot
pub type CellOffset = (i8, i8);

/// Absolute board cells of a placed piece; the pivot is always last.
pub type PieceCells = [(i8, i8); 4];

/// The three non-pivot offsets of a kind at rotation `North`.
pub fn offsets(kind: PieceKind) -> [CellOffset; 3] {
    match kind {
        PieceKind::L => [(-1, -1), (-1, 0), (1, 0)],
        PieceKind::J => [(-1, 0), (1, 0), (1, -1)],
        PieceKind::S => [(-1, -1), (0, -1), (1, 0)],
        PieceKind::Z => [(-1, 0), (0, -1), (1, -1)],
        PieceKind::T => [(-1, 0), (0, -1), (1, 0)],
        PieceKind::O => [(-1, -1), (-1, 0), (0, -1)],
        PieceKind::I => [(-2, 0), (-1, 0), (1, 0)],
    }
}

/// Number of distinct rotation states a kind cycles through.
pub fn rotation_count(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::L | PieceKind::J | PieceKind::T => 4,
        PieceKind::S | PieceKind::Z | PieceKind::I => 2,
        PieceKind::O => 1,
    }
}

/// Turn an offset about the pivot.
#[inline]
pub fn rotate_offset((dx, dy): CellOffset, rotation: Rotation) -> CellOffset {
    match rotation {
        Rotation::North => (dx, dy),
        Rotation::East => (dy, -dx),
        Rotation::South => (-dx, -dy),
        Rotation::West => (-dy, dx),
    }
}

/// Board cells covered by `kind` with its pivot at `(col, row)`.
///
/// The three rotated offsets come first, the pivot itself is the fourth cell.
/// Cells may lie outside the board; bounds are the caller's concern.
pub fn piece_cells(kind: PieceKind, col: i8, row: i8, rotation: Rotation) -> PieceCells {
    let mut cells = [(col, row); 4];
    for (cell, offset) in cells.iter_mut().zip(offsets(kind)) {
        let (dx, dy) = rotate_offset(offset, rotation);
        *cell = (col + dx, row + dy);
    }
    cells
}

/// Pivot shifts tried, in order, when rotating.
///
/// In place, one left, one right, two right (I piece against the left wall
/// only), one down, one up. The first placement that fits wins.
pub fn rotation_kicks(kind: PieceKind, col: i8) -> ArrayVec<CellOffset, 6> {
    let mut kicks = ArrayVec::new();
    kicks.push((0, 0));
    kicks.push((-1, 0));
    kicks.push((1, 0));
    if kind == PieceKind::I && col == 0 {
        kicks.push((2, 0));
    }
    kicks.push((0, -1));
    kicks.push((0, 1));
    kicks
}
