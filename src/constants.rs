use crate::moves::Move::{self, *};

/// 3^7 = 2187 possible orientations of the 8 corners.
pub const N_TWIST: usize = 2187;
/// 2^11 = 2048 possible orientations of the 12 edges.
pub const N_FLIP: usize = 2048;
/// Binomial(12, 4) = 495 possible positions of the four slice edges.
pub const N_SLICE: usize = 495;
/// 8! = 40320 permutations of the corners.
pub const N_CORNERS: usize = 40320;
/// 8! = 40320 permutations of the U and D face edges. Defined only in the
/// subgroup reached at the end of phase 1.
pub const N_UD_EDGES: usize = 40320;
/// 4! = 24 permutations of the slice edges within the slice.
pub const N_SLICE_PERM: usize = 24;
/// 6 faces with 3 turns each.
pub const N_MOVE: usize = 18;

/// Slice coordinate of the solved cube: C(11,4) + C(10,3) + C(9,2) + C(8,1).
pub const SOLVED_SLICE: u16 = 494;

/// Phase 1 aborts once the IDA* bound passes this depth.
pub const PHASE1_DEPTH_LIMIT: u8 = 14;
/// Phase 2 aborts once the IDA* bound passes this depth.
pub const PHASE2_DEPTH_LIMIT: u8 = 22;

/// Default directory holding the generated table files.
pub const TABLES_DIR: &str = "solver_tables";

/// All 18 moves in the fixed order the search enumerates them.
#[rustfmt::skip]
pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
];

/// The ten moves generating the stabilizer of the phase 1 subgroup.
pub const PHASE2_MOVES: [Move; 10] = [U, U2, U3, R2, F2, D, D2, D3, L2, B2];
