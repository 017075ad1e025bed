use std::path::Path;
use std::str::FromStr;
use std::{fmt, fs};

use bincode::config::{self, Configuration};
use bincode::{decode_from_slice, encode_to_vec};

use self::Move::*;
use crate::constants::*;
use crate::cubie::Corner::*;
use crate::cubie::CubieCube;
use crate::cubie::Edge::*;
use crate::error::Error;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" => Ok(R2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" => Ok(L2),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" => Ok(D2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" => Ok(B2),
            _ => Err(Error::InvalidMove),
        }
    }
}

#[rustfmt::skip]
impl Move {
    pub fn is_same_layer(&self, other: Move) -> bool {
        matches!(
            (&self, other),
            (U | U2 | U3, U | U2 | U3)
            | (D | D2 | D3, D | D2 | D3)
            | (R | R2 | R3, R | R2 | R3)
            | (L | L2 | L3, L | L2 | L3)
            | (F | F2 | F3, F | F2 | F3)
            | (B | B2 | B3, B | B2 | B3)
        )
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3,
            U3 => U,
            D => D3,
            D3 => D,
            R => R3,
            R3 => R,
            L => L3,
            L3 => L,
            F => F3,
            F3 => F,
            B => B3,
            B3 => B,
            _ => self,
        }
    }
}

/// The basic six cube moves described by permutations and changes in orientation.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, ULB, UFL, URF, DBL, DLF, DFR, DRB], //permutation of the corners
    co: [0, 0, 0, 0, 0, 0, 0, 0],                 //changes of the orientations of the corners
    ep: [UB, UL, UF, UR, DL, DF, DR, DB, FL, FR, BR, BL], //permutation of the edges
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],     //changes of the orientations of the edges
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    cp: [ULB, UFL, UBR, DRB, DBL, DLF, URF, DFR],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UL, UF, BR, UB, DL, DF, FR, DB, FL, UR, DR, BL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    cp: [ULB, URF, DFR, UBR, DBL, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UL, FR, UR, UB, DL, FL, DR, DB, UF, DF, BR, BL],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    cp: [ULB, UFL, URF, UBR, DLF, DFR, DRB, DBL],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UL, UF, UR, UB, DB, DL, DF, DR, FL, FR, BR, BL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, URF, UBR, ULB, DBL, DFR, DRB],
    co: [2, 1, 0, 0, 1, 2, 0, 0],
    ep: [FL, UF, UR, UB, BL, DF, DR, DB, DL, FR, BR, UL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    cp: [DBL, UFL, URF, ULB, DRB, DLF, DFR, UBR],
    co: [2, 0, 0, 1, 1, 0, 0, 2],
    ep: [UL, UF, UR, BL, DL, DF, DR, BR, FL, FR, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// The six basic move cubes in face order U, R, F, D, L, B, matching the
/// grouping of the `Move` enum.
pub const BASIC_MOVE_CUBES: [CubieCube; 6] = [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE];

/// Move tables for every coordinate space, one flat row-major table each:
/// `table[N_MOVE * coord + m]` is the coordinate reached by applying move `m`.
pub struct MoveTables {
    pub twist_move: Vec<u16>,
    pub flip_move: Vec<u16>,
    pub slice_move: Vec<u16>,
    pub corners_move: Vec<u16>,
    pub ud_edges_move: Vec<u16>,
    pub slice_perm_move: Vec<u16>,
}

impl MoveTables {
    /// Compute all move tables from the cube model.
    pub fn generate() -> Self {
        Self {
            twist_move: gen_twist_move(),
            flip_move: gen_flip_move(),
            slice_move: gen_slice_move(),
            corners_move: gen_corners_move(),
            ud_edges_move: gen_ud_edges_move(),
            slice_perm_move: gen_slice_perm_move(),
        }
    }

    /// Write every move table into `dir`.
    pub fn save(&self, dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir)?;
        store_move_table(dir, "move_twist", &self.twist_move)?;
        store_move_table(dir, "move_flip", &self.flip_move)?;
        store_move_table(dir, "move_slice", &self.slice_move)?;
        store_move_table(dir, "move_corners", &self.corners_move)?;
        store_move_table(dir, "move_ud_edges", &self.ud_edges_move)?;
        store_move_table(dir, "move_slice_perm", &self.slice_perm_move)?;
        Ok(())
    }

    /// Load every move table from `dir`, failing if one is absent or has the
    /// wrong size.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        Ok(Self {
            twist_move: load_move_table(dir, "move_twist", N_TWIST)?,
            flip_move: load_move_table(dir, "move_flip", N_FLIP)?,
            slice_move: load_move_table(dir, "move_slice", N_SLICE)?,
            corners_move: load_move_table(dir, "move_corners", N_CORNERS)?,
            ud_edges_move: load_move_table(dir, "move_ud_edges", N_UD_EDGES)?,
            slice_perm_move: load_move_table(dir, "move_slice_perm", N_SLICE_PERM)?,
        })
    }
}

const TABLE_CONFIG: Configuration = config::standard();

fn store_move_table(dir: &Path, fname: &str, table: &Vec<u16>) -> Result<(), Error> {
    let encoded = encode_to_vec(table, TABLE_CONFIG)?;
    fs::write(dir.join(fname), encoded)?;
    Ok(())
}

/// Read one move table back. Trailing bytes or a row count that does not
/// match the coordinate space are treated like a missing table.
fn load_move_table(dir: &Path, fname: &str, n_states: usize) -> Result<Vec<u16>, Error> {
    let path = dir.join(fname);
    let bytes = fs::read(&path).map_err(|_| Error::TablesMissing(path.display().to_string()))?;
    let (table, read): (Vec<u16>, usize) = decode_from_slice(&bytes, TABLE_CONFIG)?;
    if read != bytes.len() || table.len() != n_states * N_MOVE {
        return Err(Error::TablesMissing(path.display().to_string()));
    }
    Ok(table)
}

/// Move table for the twist of the corners.
///
/// The twist coordinate describes the 3^7 = 2187 possible orientations of the 8 corners.
fn gen_twist_move() -> Vec<u16> {
    let mut a = CubieCube::default();
    let mut twist_move = vec![0; N_TWIST * N_MOVE];
    for i in 0..N_TWIST {
        a.set_twist(i as u16);
        for (j, mc) in BASIC_MOVE_CUBES.iter().enumerate() {
            for k in 0..3 {
                // three moves for each face, for example U, U2, U3 = U'
                a.corner_multiply(*mc);
                twist_move[N_MOVE * i + 3 * j + k] = a.get_twist();
            }
            a.corner_multiply(*mc); // 4. move restores face
        }
    }
    twist_move
}

/// Move table for the flip of the edges.
///
/// The flip coordinate describes the 2^11 = 2048 possible orientations of the 12 edges.
fn gen_flip_move() -> Vec<u16> {
    let mut a = CubieCube::default();
    let mut flip_move = vec![0; N_FLIP * N_MOVE];
    for i in 0..N_FLIP {
        a.set_flip(i as u16);
        for (j, mc) in BASIC_MOVE_CUBES.iter().enumerate() {
            for k in 0..3 {
                a.edge_multiply(*mc);
                flip_move[N_MOVE * i + 3 * j + k] = a.get_flip();
            }
            a.edge_multiply(*mc);
        }
    }
    flip_move
}

/// Move table for the positions of the four slice edges.
///
/// The slice coordinate describes the Binomial(12, 4) = 495 possible position
/// sets of the FL, FR, BR and BL edges. Only membership counts, not the order
/// within the slice.
fn gen_slice_move() -> Vec<u16> {
    let mut a = CubieCube::default();
    let mut slice_move = vec![0; N_SLICE * N_MOVE];
    for i in 0..N_SLICE {
        a.set_slice(i as u16);
        for (j, mc) in BASIC_MOVE_CUBES.iter().enumerate() {
            for k in 0..3 {
                a.edge_multiply(*mc);
                slice_move[N_MOVE * i + 3 * j + k] = a.get_slice();
            }
            a.edge_multiply(*mc);
        }
    }
    slice_move
}

/// Move table for the corners coordinate.
///
/// The corners coordinate describes the 8! = 40320 permutations of the
/// corners. It drives phase 2 but is defined under all moves.
fn gen_corners_move() -> Vec<u16> {
    let mut a = CubieCube::default();
    let mut corners_move = vec![0; N_CORNERS * N_MOVE];
    for i in 0..N_CORNERS {
        a.set_corners(i as u16);
        for (j, mc) in BASIC_MOVE_CUBES.iter().enumerate() {
            for k in 0..3 {
                a.corner_multiply(*mc);
                corners_move[N_MOVE * i + 3 * j + k] = a.get_corners();
            }
            a.corner_multiply(*mc);
        }
    }
    corners_move
}

/// Move table for the permutation of the U and D face edges in phase 2.
///
/// The ud_edges coordinate describes the 8! = 40320 permutations of the edges
/// in positions 0..7. Only the ten phase 2 columns are populated; quarter
/// turns of R, F, L and B leave the subgroup where the coordinate is defined.
fn gen_ud_edges_move() -> Vec<u16> {
    let mut a = CubieCube::default();
    let mut ud_edges_move = vec![0; N_UD_EDGES * N_MOVE];
    for i in 0..N_UD_EDGES {
        a.set_ud_edges(i as u16);
        for (j, mc) in BASIC_MOVE_CUBES.iter().enumerate() {
            for k in 0..3 {
                a.edge_multiply(*mc);
                // only U, U2, U3, D, D2, D3 and the four half turns
                if j != 0 && j != 3 && k != 1 {
                    continue;
                }
                ud_edges_move[N_MOVE * i + 3 * j + k] = a.get_ud_edges();
            }
            a.edge_multiply(*mc);
        }
    }
    ud_edges_move
}

/// Move table for the permutation of the slice edges within the slice in
/// phase 2. Only the ten phase 2 columns are populated.
fn gen_slice_perm_move() -> Vec<u16> {
    let mut a = CubieCube::default();
    let mut slice_perm_move = vec![0; N_SLICE_PERM * N_MOVE];
    for i in 0..N_SLICE_PERM {
        a.set_slice_perm(i as u16);
        for (j, mc) in BASIC_MOVE_CUBES.iter().enumerate() {
            for k in 0..3 {
                a.edge_multiply(*mc);
                if j != 0 && j != 3 && k != 1 {
                    continue;
                }
                slice_perm_move[N_MOVE * i + 3 * j + k] = a.get_slice_perm();
            }
            a.edge_multiply(*mc);
        }
    }
    slice_perm_move
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use crate::constants::*;
    use crate::moves::*;

    lazy_static! {
        static ref MV: MoveTables = MoveTables::generate();
    }

    #[test]
    fn test_move_parse_and_display() {
        for m in ALL_MOVES {
            assert_eq!(Move::from_str(&m.to_string()).unwrap(), m);
        }
        assert!(Move::from_str("X").is_err());
        assert!(Move::from_str("u").is_err());
        assert!(Move::from_str("U2'").is_err());
    }

    #[test]
    fn test_move_twist_table() {
        assert_eq!(MV.twist_move.len(), N_TWIST * N_MOVE);
        assert_eq!(MV.twist_move[Move::U as usize], 0);
        assert_eq!(MV.twist_move[Move::F as usize], 412);
        assert!(MV.twist_move.iter().all(|&c| (c as usize) < N_TWIST));
    }

    #[test]
    fn test_move_flip_table() {
        assert_eq!(MV.flip_move.len(), N_FLIP * N_MOVE);
        assert_eq!(MV.flip_move[Move::U as usize], 0);
        assert_eq!(MV.flip_move[Move::F as usize], 550);
        assert!(MV.flip_move.iter().all(|&c| (c as usize) < N_FLIP));
    }

    #[test]
    fn test_move_slice_table() {
        assert_eq!(MV.slice_move.len(), N_SLICE * N_MOVE);
        let solved_row = N_MOVE * SOLVED_SLICE as usize;
        assert_eq!(MV.slice_move[solved_row + Move::U as usize], SOLVED_SLICE);
        assert_eq!(MV.slice_move[solved_row + Move::F as usize], 461);
        assert!(MV.slice_move.iter().all(|&c| (c as usize) < N_SLICE));
    }

    #[test]
    fn test_move_corners_table() {
        assert_eq!(MV.corners_move.len(), N_CORNERS * N_MOVE);
        assert_eq!(MV.corners_move[Move::U as usize], 6);
        assert!(MV.corners_move.iter().all(|&c| (c as usize) < N_CORNERS));
    }

    #[test]
    fn test_move_ud_edges_table() {
        assert_eq!(MV.ud_edges_move.len(), N_UD_EDGES * N_MOVE);
        assert_eq!(MV.ud_edges_move[Move::U as usize], 6);
        for m in PHASE2_MOVES {
            assert!((MV.ud_edges_move[m as usize] as usize) < N_UD_EDGES);
        }
    }

    #[test]
    fn test_move_slice_perm_table() {
        assert_eq!(MV.slice_perm_move.len(), N_SLICE_PERM * N_MOVE);
        assert_eq!(MV.slice_perm_move[Move::R2 as usize], 5);
        assert_eq!(MV.slice_perm_move[Move::U as usize], 0);
    }

    #[test]
    fn test_move_then_inverse_restores_coordinate() {
        for coord in 0..N_SLICE {
            for m in ALL_MOVES {
                let next = MV.slice_move[N_MOVE * coord + m as usize] as usize;
                let back = MV.slice_move[N_MOVE * next + m.get_inverse() as usize] as usize;
                assert_eq!(back, coord);
            }
        }
        for coord in 0..N_TWIST {
            for m in ALL_MOVES {
                let next = MV.twist_move[N_MOVE * coord + m as usize] as usize;
                let back = MV.twist_move[N_MOVE * next + m.get_inverse() as usize] as usize;
                assert_eq!(back, coord);
            }
        }
    }
}
