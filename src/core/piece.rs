//! Active piece: shape data, movement, rotation and wall kicks.
//!
//! Every tetromino kind has four rotation states, each a 4x4 occupancy
//! grid. A piece's position is the top-left corner of that box in board
//! coordinates. A blocked downward step fixes the piece into the board on
//! the spot; blocked sideways steps and rejected rotations change nothing.
//!
//! The kick table is a simplified one, not the guideline SRS data: a short
//! list of nearby offsets tried in a fixed order. Offsets and order are a
//! compatibility contract.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::display::GameDisplay;
use crate::types::{MoveDirection, PieceKind, BOARD_WIDTH};

/// One 4x4 rotation state. Bit `3 - x` of `rows[y]` marks an occupied
/// cell, so the table literals below read like piece silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: [u8; 4],
}

impl Shape {
    const fn new(rows: [u8; 4]) -> Self {
        Self { rows }
    }

    /// Whether the cell at (x, y) inside the 4x4 box is occupied.
    pub fn contains(&self, x: i8, y: i8) -> bool {
        if !(0..4).contains(&x) || !(0..4).contains(&y) {
            return false;
        }
        self.rows[y as usize] & (1 << (3 - x)) != 0
    }

    /// Occupied cells in row-major order (y outer, x inner).
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut cells = ArrayVec::new();
        for y in 0..4i8 {
            for x in 0..4i8 {
                if self.contains(x, y) {
                    let _ = cells.try_push((x, y));
                }
            }
        }
        cells
    }
}

/// The four rotation states for a kind, hand-authored geometry.
pub fn rotation_states(kind: PieceKind) -> [Shape; 4] {
    match kind {
        PieceKind::I => [
            Shape::new([0b0000, 0b1111, 0b0000, 0b0000]),
            Shape::new([0b0010, 0b0010, 0b0010, 0b0010]),
            Shape::new([0b0000, 0b0000, 0b1111, 0b0000]),
            Shape::new([0b0100, 0b0100, 0b0100, 0b0100]),
        ],
        // Square: identical in every rotation.
        PieceKind::O => [Shape::new([0b0110, 0b0110, 0b0000, 0b0000]); 4],
        PieceKind::T => [
            Shape::new([0b0100, 0b1110, 0b0000, 0b0000]),
            Shape::new([0b0100, 0b0110, 0b0100, 0b0000]),
            Shape::new([0b0000, 0b1110, 0b0100, 0b0000]),
            Shape::new([0b0100, 0b1100, 0b0100, 0b0000]),
        ],
        // S and Z only have two distinct silhouettes; states 2/3 repeat 0/1.
        PieceKind::S => [
            Shape::new([0b0110, 0b1100, 0b0000, 0b0000]),
            Shape::new([0b0100, 0b0110, 0b0010, 0b0000]),
            Shape::new([0b0110, 0b1100, 0b0000, 0b0000]),
            Shape::new([0b0100, 0b0110, 0b0010, 0b0000]),
        ],
        PieceKind::Z => [
            Shape::new([0b1100, 0b0110, 0b0000, 0b0000]),
            Shape::new([0b0010, 0b0110, 0b0100, 0b0000]),
            Shape::new([0b1100, 0b0110, 0b0000, 0b0000]),
            Shape::new([0b0010, 0b0110, 0b0100, 0b0000]),
        ],
        PieceKind::J => [
            Shape::new([0b1000, 0b1110, 0b0000, 0b0000]),
            Shape::new([0b0110, 0b0100, 0b0100, 0b0000]),
            Shape::new([0b0000, 0b1110, 0b0010, 0b0000]),
            Shape::new([0b0100, 0b0100, 0b1100, 0b0000]),
        ],
        PieceKind::L => [
            Shape::new([0b0010, 0b1110, 0b0000, 0b0000]),
            Shape::new([0b0100, 0b0100, 0b0110, 0b0000]),
            Shape::new([0b0000, 0b1110, 0b1000, 0b0000]),
            Shape::new([0b1100, 0b0100, 0b0100, 0b0000]),
        ],
    }
}

const I_KICKS: &[(i8, i8)] = &[(0, 0), (-1, 0), (1, 0), (0, -1)];
const O_KICKS: &[(i8, i8)] = &[];
const COMMON_KICKS: &[(i8, i8)] = &[(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// Offsets tried, in order, when an in-place rotation is blocked. The
/// square never kicks; the bar has a shorter list than the rest.
pub fn kick_offsets(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::I => I_KICKS,
        PieceKind::O => O_KICKS,
        _ => COMMON_KICKS,
    }
}

/// The falling tetromino.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shapes: [Shape; 4],
    rotation: usize,
    x: i8,
    y: i8,
    fixed: bool,
}

impl ActivePiece {
    /// New piece at the spawn anchor: horizontally centered, top row,
    /// rotation 0.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shapes: rotation_states(kind),
            rotation: 0,
            x: (BOARD_WIDTH / 2) as i8 - 2,
            y: 0,
            fixed: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn shape(&self) -> &Shape {
        &self.shapes[self.rotation]
    }

    /// Board-space cells of the current rotation, row-major.
    pub fn block_positions(&self) -> ArrayVec<(i8, i8), 4> {
        let mut cells = self.shape().cells();
        for (x, y) in &mut cells {
            *x += self.x;
            *y += self.y;
        }
        cells
    }

    fn placement_valid(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .cells()
            .iter()
            .all(|&(dx, dy)| board.is_position_valid(x + dx, y + dy))
    }

    /// Whether every cell of the current placement is a valid board cell.
    pub fn is_valid_on(&self, board: &Board) -> bool {
        Self::placement_valid(board, self.shape(), self.x, self.y)
    }

    /// Step one cell in a direction.
    pub fn shift(
        &mut self,
        direction: MoveDirection,
        board: &mut Board,
        display: &mut dyn GameDisplay,
    ) -> bool {
        let (dx, dy) = direction.delta();
        self.move_by(dx, dy, board, display)
    }

    /// Try to move by a delta. A rejected downward move fixes the piece
    /// into the board as a side effect; rejected sideways moves leave
    /// everything untouched.
    pub fn move_by(
        &mut self,
        dx: i8,
        dy: i8,
        board: &mut Board,
        display: &mut dyn GameDisplay,
    ) -> bool {
        if self.fixed {
            return false;
        }

        let (nx, ny) = (self.x + dx, self.y + dy);
        if Self::placement_valid(board, self.shape(), nx, ny) {
            self.x = nx;
            self.y = ny;
            return true;
        }

        if dy > 0 {
            self.fix(board, display);
        }
        false
    }

    /// Rotate one step, clockwise or counter-clockwise. Tries the target
    /// rotation in place first, then walks the kick table; the first
    /// offset whose placement is fully valid commits both position and
    /// rotation. Returns false with no change when nothing fits.
    pub fn rotate(&mut self, clockwise: bool, board: &Board) -> bool {
        if self.fixed {
            return false;
        }

        let next = if clockwise {
            (self.rotation + 1) % 4
        } else {
            (self.rotation + 3) % 4
        };
        let shape = self.shapes[next];

        if Self::placement_valid(board, &shape, self.x, self.y) {
            self.rotation = next;
            return true;
        }

        for &(dx, dy) in kick_offsets(self.kind) {
            let (kx, ky) = (self.x + dx, self.y + dy);
            if Self::placement_valid(board, &shape, kx, ky) {
                self.x = kx;
                self.y = ky;
                self.rotation = next;
                return true;
            }
        }

        false
    }

    /// Drop straight down until blocked. The blocking step fixes the piece
    /// as a side effect. Returns the number of rows descended.
    pub fn hard_drop(&mut self, board: &mut Board, display: &mut dyn GameDisplay) -> u32 {
        let mut distance = 0;
        while self.shift(MoveDirection::Down, board, display) {
            distance += 1;
        }
        distance
    }

    /// Merge the piece into the board and end its mobility. Idempotent:
    /// calling again after the first fix changes nothing.
    pub fn fix(&mut self, board: &mut Board, display: &mut dyn GameDisplay) {
        if self.fixed {
            return;
        }
        self.fixed = true;

        for (x, y) in self.block_positions() {
            board.set_block(x, y, Some(self.kind), display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::display::NullDisplay;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    #[test]
    fn every_rotation_state_has_four_cells() {
        for kind in PieceKind::ALL {
            for shape in rotation_states(kind) {
                assert_eq!(shape.cells().len(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn shape_cells_are_row_major() {
        let [north, ..] = rotation_states(PieceKind::T);
        assert_eq!(north.cells().as_slice(), &[(1, 0), (0, 1), (1, 1), (2, 1)]);

        let [north, ..] = rotation_states(PieceKind::L);
        assert_eq!(north.cells().as_slice(), &[(2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn bar_rotations_alternate_horizontal_and_vertical() {
        let shapes = rotation_states(PieceKind::I);
        assert_eq!(shapes[0].cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(shapes[1].cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
        assert_eq!(shapes[2].cells().as_slice(), &[(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(shapes[3].cells().as_slice(), &[(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn square_is_identical_in_all_rotations() {
        let shapes = rotation_states(PieceKind::O);
        for shape in &shapes[1..] {
            assert_eq!(*shape, shapes[0]);
        }
        assert_eq!(shapes[0].cells().as_slice(), &[(1, 0), (2, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn skew_pieces_repeat_after_two_states() {
        for kind in [PieceKind::S, PieceKind::Z] {
            let shapes = rotation_states(kind);
            assert_eq!(shapes[2], shapes[0]);
            assert_eq!(shapes[3], shapes[1]);
            assert_ne!(shapes[1], shapes[0]);
        }
    }

    #[test]
    fn spawn_anchor_is_centered_on_the_top_row() {
        let piece = ActivePiece::spawn(PieceKind::J);
        assert_eq!(piece.position(), ((BOARD_WIDTH / 2) as i8 - 2, 0));
        assert_eq!(piece.rotation(), 0);
        assert!(!piece.is_fixed());
    }

    #[test]
    fn rotation_index_wraps_both_ways() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::T);
        piece.move_by(0, 5, &mut board, &mut NullDisplay);

        for expected in [1, 2, 3, 0] {
            assert!(piece.rotate(true, &board));
            assert_eq!(piece.rotation(), expected);
        }
        assert!(piece.rotate(false, &board));
        assert_eq!(piece.rotation(), 3);
    }

    #[test]
    fn kick_tables_match_the_contract() {
        assert_eq!(
            kick_offsets(PieceKind::I),
            &[(0, 0), (-1, 0), (1, 0), (0, -1)]
        );
        assert!(kick_offsets(PieceKind::O).is_empty());
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(
                kick_offsets(kind),
                &[(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)]
            );
        }
    }

    #[test]
    fn blocked_sideways_move_has_no_side_effect() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::O);

        // Walk into the left wall.
        while piece.move_by(-1, 0, &mut board, &mut NullDisplay) {}
        let at_wall = piece.position();

        assert!(!piece.move_by(-1, 0, &mut board, &mut NullDisplay));
        assert_eq!(piece.position(), at_wall);
        assert!(!piece.is_fixed());
        assert_eq!(board.occupied_cells(), 0);
    }

    #[test]
    fn blocked_downward_move_fixes_in_place() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::O);

        // Drop to the floor, then ask for one more step.
        while piece.move_by(0, 1, &mut board, &mut NullDisplay) {}

        assert!(piece.is_fixed());
        assert_eq!(board.occupied_cells(), 4);
        // Square bottom cells sit on the last row.
        let (_, y) = piece.position();
        assert_eq!(y + 1, BOARD_HEIGHT as i8 - 1);

        // Fixed pieces refuse further movement and rotation.
        assert!(!piece.move_by(0, 1, &mut board, &mut NullDisplay));
        assert!(!piece.move_by(1, 0, &mut board, &mut NullDisplay));
        assert!(!piece.rotate(true, &board));
    }

    #[test]
    fn fix_is_idempotent() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::T);
        piece.move_by(0, 3, &mut board, &mut NullDisplay);

        piece.fix(&mut board, &mut NullDisplay);
        let after_first = board.clone();

        piece.fix(&mut board, &mut NullDisplay);
        assert_eq!(board, after_first);
        assert_eq!(board.occupied_cells(), 4);
    }

    #[test]
    fn hard_drop_counts_descended_rows_and_fixes() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::I);

        // Horizontal bar occupies box row 1; it can descend until that row
        // reaches the floor.
        let distance = piece.hard_drop(&mut board, &mut NullDisplay);
        assert_eq!(distance, BOARD_HEIGHT as u32 - 2);
        assert!(piece.is_fixed());
        assert_eq!(board.occupied_cells(), 4);
    }

    #[test]
    fn hard_drop_stacks_on_settled_cells() {
        let mut board = Board::new();
        let mut first = ActivePiece::spawn(PieceKind::O);
        assert!(first.hard_drop(&mut board, &mut NullDisplay) > 0);

        // Same spawn column: the second square lands on top of the first.
        let mut second = ActivePiece::spawn(PieceKind::O);
        let distance = second.hard_drop(&mut board, &mut NullDisplay);
        assert_eq!(distance, BOARD_HEIGHT as u32 - 4);
        assert!(second.is_fixed());
        assert_eq!(board.occupied_cells(), 8);
    }

    #[test]
    fn hard_drop_on_fixed_piece_is_a_no_op() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::O);
        piece.hard_drop(&mut board, &mut NullDisplay);
        assert!(piece.is_fixed());

        assert_eq!(piece.hard_drop(&mut board, &mut NullDisplay), 0);
        assert_eq!(board.occupied_cells(), 4);
    }

    #[test]
    fn rotation_kick_walks_offsets_in_order() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::T);
        // Move to an open spot: anchor (4, 5).
        piece.move_by(1, 5, &mut board, &mut NullDisplay);
        assert_eq!(piece.position(), (4, 5));

        // Clockwise target cells at the anchor: (5,5) (5,6) (6,6) (5,7).
        // Block the in-place try and the (-1,0) kick; leave (+1,0) open.
        board.set_block(5, 7, Some(PieceKind::I), &mut NullDisplay);
        board.set_block(4, 7, Some(PieceKind::I), &mut NullDisplay);

        assert!(piece.rotate(true, &board));
        assert_eq!(piece.position(), (5, 5));
        assert_eq!(piece.rotation(), 1);
    }

    #[test]
    fn rotation_fails_cleanly_when_no_kick_fits() {
        let mut board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::T);
        piece.move_by(1, 5, &mut board, &mut NullDisplay);

        // Wall off every kick candidate for the clockwise rotation:
        // in-place/(0,0), (-1,0), (1,0), (0,-1), (-1,-1), (1,-1). One
        // blocked target cell per candidate anchor, none of them under the
        // piece's current cells.
        for (bx, by) in [(5, 7), (4, 7), (6, 7), (5, 4), (4, 4), (6, 4)] {
            board.set_block(bx, by, Some(PieceKind::Z), &mut NullDisplay);
        }

        let before = piece.clone();
        assert!(!piece.rotate(true, &board));
        assert_eq!(piece, before);
    }
}
