//! Pieces module tests - footprints, pivot rotation and rotate kicks

use blockfall::core::pieces::{offsets, piece_cells, rotate_offset, rotation_count, rotation_kicks};
use blockfall::types::{PieceKind, Rotation};

fn sorted(mut cells: [(i8, i8); 4]) -> [(i8, i8); 4] {
    cells.sort();
    cells
}

// ============== Footprints ==============

#[test]
fn test_spawn_footprints() {
    let at = |kind| sorted(piece_cells(kind, 5, 20, Rotation::North));

    assert_eq!(at(PieceKind::L), [(4, 19), (4, 20), (5, 20), (6, 20)]);
    assert_eq!(at(PieceKind::J), [(4, 20), (5, 20), (6, 19), (6, 20)]);
    assert_eq!(at(PieceKind::S), [(4, 19), (5, 19), (5, 20), (6, 20)]);
    assert_eq!(at(PieceKind::Z), [(4, 20), (5, 19), (5, 20), (6, 19)]);
    assert_eq!(at(PieceKind::T), [(4, 20), (5, 19), (5, 20), (6, 20)]);
    assert_eq!(at(PieceKind::O), [(4, 19), (4, 20), (5, 19), (5, 20)]);
    assert_eq!(at(PieceKind::I), [(3, 20), (4, 20), (5, 20), (6, 20)]);
}

#[test]
fn test_pivot_is_always_fourth_cell() {
    for kind in PieceKind::ALL {
        for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            let cells = piece_cells(kind, 3, 7, rotation);
            assert_eq!(cells[3], (3, 7), "{:?} {:?}", kind, rotation);
        }
    }
}

#[test]
fn test_every_piece_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            let cells = sorted(piece_cells(kind, 5, 10, rotation));
            for pair in cells.windows(2) {
                assert_ne!(pair[0], pair[1], "{:?} {:?}", kind, rotation);
            }
        }
    }
}

// ============== Rotation ==============

#[test]
fn test_quarter_turn_formulas() {
    assert_eq!(rotate_offset((1, 0), Rotation::North), (1, 0));
    assert_eq!(rotate_offset((1, 0), Rotation::East), (0, -1));
    assert_eq!(rotate_offset((1, 0), Rotation::South), (-1, 0));
    assert_eq!(rotate_offset((1, 0), Rotation::West), (0, 1));

    // Four quarter turns compose to the identity.
    let mut offset = (-2, 1);
    for _ in 0..4 {
        offset = rotate_offset(offset, Rotation::East);
    }
    assert_eq!(offset, (-2, 1));
}

#[test]
fn test_i_piece_east_is_vertical() {
    let cells = sorted(piece_cells(PieceKind::I, 5, 19, Rotation::East));
    assert_eq!(cells, [(5, 18), (5, 19), (5, 20), (5, 21)]);
}

#[test]
fn test_rotation_counts() {
    assert_eq!(rotation_count(PieceKind::L), 4);
    assert_eq!(rotation_count(PieceKind::J), 4);
    assert_eq!(rotation_count(PieceKind::T), 4);
    assert_eq!(rotation_count(PieceKind::S), 2);
    assert_eq!(rotation_count(PieceKind::Z), 2);
    assert_eq!(rotation_count(PieceKind::I), 2);
    assert_eq!(rotation_count(PieceKind::O), 1);
}

#[test]
fn test_offsets_are_explicit_per_kind() {
    // S and Z are mirror images across the vertical axis.
    let mirror = |offs: [(i8, i8); 3]| {
        let mut m = offs.map(|(dx, dy)| (-dx, dy));
        m.sort();
        m
    };
    let mut z = offsets(PieceKind::Z);
    z.sort();
    assert_eq!(mirror(offsets(PieceKind::S)), z);
    assert_ne!(offsets(PieceKind::Z), offsets(PieceKind::O));
}

// ============== Kicks ==============

#[test]
fn test_kick_order() {
    let kicks = rotation_kicks(PieceKind::T, 4);
    assert_eq!(kicks.as_slice(), &[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]);

    // I piece away from the left wall uses the same list.
    let kicks = rotation_kicks(PieceKind::I, 1);
    assert_eq!(kicks.len(), 5);
}

#[test]
fn test_i_piece_left_wall_kick_comes_after_horizontal_before_vertical() {
    let kicks = rotation_kicks(PieceKind::I, 0);
    assert_eq!(
        kicks.as_slice(),
        &[(0, 0), (-1, 0), (1, 0), (2, 0), (0, -1), (0, 1)]
    );

    // Only the I piece gets the extra kick.
    assert_eq!(rotation_kicks(PieceKind::L, 0).len(), 5);
}
