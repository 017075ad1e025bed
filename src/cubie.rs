use std::fmt;
use std::ops::Mul;

use self::{Corner::*, Edge::*};
use crate::moves::{Move, BASIC_MOVE_CUBES};

/// Represents the 8 corners on the cube, described by the layers they are on.
///
/// The discriminant is the slot index: 0..3 on the U layer, 4..7 on the D layer.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Corner {
    ULB, UFL, URF, UBR, DBL, DLF, DFR, DRB,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Represents the 12 edges on the cube, described by the layers they are on.
///
/// Slots 8..11 (`FL`, `FR`, `BR`, `BL`) are the middle slice edges.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Edge {
    UL, UF, UR, UB, DL, DF, DR, DB, FL, FR, BR, BL,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub const ALL_CORNERS: [Corner; 8] = [ULB, UFL, URF, UBR, DBL, DLF, DFR, DRB];
pub const ALL_EDGES: [Edge; 12] = [UL, UF, UR, UB, DL, DF, DR, DB, FL, FR, BR, BL];

/// Cube on the cubie level.
///
/// A state is the corner and edge permutation plus the orientation of every
/// cubie relative to [`SOLVED_CUBIE_CUBE`]. For any reachable state
/// `sum(co) % 3 == 0` and `sum(eo) % 2 == 0`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CubieCube {
    /// Corner permutation.
    pub cp: [Corner; 8],
    /// Corner orientation: 0 oriented, 1 twisted clockwise, 2 twisted counter-clockwise.
    pub co: [u8; 8],
    /// Edge permutation.
    pub ep: [Edge; 12],
    /// Edge orientation: 0 oriented, 1 flipped.
    pub eo: [u8; 12],
}

/// Solved cube on the cubie level.
pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    cp: ALL_CORNERS,
    co: [0; 8],
    ep: ALL_EDGES,
    eo: [0; 12],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl Mul for CubieCube {
    type Output = Self;

    fn mul(self, rhs: CubieCube) -> Self::Output {
        let mut state = self;
        state.corner_multiply(rhs);
        state.edge_multiply(rhs);
        state
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for i in 0..8 {
            s.push_str(&format!("({},{})", self.cp[i], self.co[i]));
        }
        for i in 0..12 {
            s.push_str(&format!("({},{})", self.ep[i], self.eo[i]));
        }
        write!(f, "{s}")
    }
}

impl CubieCube {
    /// Multiply this cube with another restricted to the corners.
    ///
    /// `(A * B).cp[i] = A.cp[B.cp[i]]`, orientations add along the permutation.
    pub fn corner_multiply(&mut self, rhs: CubieCube) {
        let mut cp = [ULB; 8];
        let mut co = [0; 8];
        for i in 0..8 {
            cp[i] = self.cp[rhs.cp[i] as usize];
            co[i] = (self.co[rhs.cp[i] as usize] + rhs.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Multiply this cube with another restricted to the edges.
    pub fn edge_multiply(&mut self, rhs: CubieCube) {
        let mut ep = [UL; 12];
        let mut eo = [0; 12];
        for i in 0..12 {
            ep[i] = self.ep[rhs.ep[i] as usize];
            eo[i] = (self.eo[rhs.ep[i] as usize] + rhs.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// Apply a single move, quarter turns composed from the basic move cubes.
    pub fn apply_move(&self, m: Move) -> Self {
        let base = BASIC_MOVE_CUBES[m as usize / 3];
        let mut state = *self;
        for _ in 0..m as usize % 3 + 1 {
            state = state * base;
        }
        state
    }

    /// Apply a sequence of moves.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |state, m| state.apply_move(*m))
    }

    /// The twist coordinate: orientation of the corners as a base 3 number,
    /// 0 <= twist < 2187. The orientation of the last corner is implied by
    /// the sum rule.
    pub fn get_twist(&self) -> u16 {
        let mut twist = 0;
        for i in 0..7 {
            twist = 3 * twist + self.co[i] as u16;
        }
        twist
    }

    pub fn set_twist(&mut self, twist: u16) {
        let mut twist = twist;
        let mut parity = 0;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            parity += self.co[i];
            twist /= 3;
        }
        self.co[7] = (3 - parity % 3) % 3;
    }

    /// The flip coordinate: orientation of the edges as a base 2 number,
    /// 0 <= flip < 2048. The orientation of the last edge is implied.
    pub fn get_flip(&self) -> u16 {
        let mut flip = 0;
        for i in 0..11 {
            flip = 2 * flip + self.eo[i] as u16;
        }
        flip
    }

    pub fn set_flip(&mut self, flip: u16) {
        let mut flip = flip;
        let mut parity = 0;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            parity += self.eo[i];
            flip /= 2;
        }
        self.eo[11] = (2 - parity % 2) % 2;
    }

    /// The slice coordinate: which positions hold the four slice edges,
    /// 0 <= slice < 495. Sum of C(n, k) over the slice edge positions n from
    /// high to low, k counting down from 4. The solved cube sits at
    /// [`SOLVED_SLICE`], not 0.
    pub fn get_slice(&self) -> u16 {
        let mut slice = 0;
        let mut k = 4;
        for n in (0..12).rev() {
            if k > 0 && self.ep[n] as usize >= 8 {
                slice += binomial(n, k);
                k -= 1;
            }
        }
        slice
    }

    /// Place the slice edges according to a slice coordinate. The labeling
    /// within each class is arbitrary since the coordinate only tracks
    /// membership.
    pub fn set_slice(&mut self, slice: u16) {
        let mut slice = slice;
        let mut k = 4;
        let mut next_slice = 8;
        let mut next_other = 0;
        for n in (0..12).rev() {
            if k > 0 && slice >= binomial(n, k) {
                slice -= binomial(n, k);
                self.ep[n] = ALL_EDGES[next_slice];
                next_slice += 1;
                k -= 1;
            } else {
                self.ep[n] = ALL_EDGES[next_other];
                next_other += 1;
            }
        }
    }

    /// The corners coordinate: permutation of the 8 corners, 0 <= corners < 40320,
    /// 0 for the solved cube.
    pub fn get_corners(&self) -> u16 {
        let mut perm = self.cp;
        let mut b = 0;
        for j in (1..8).rev() {
            let mut k = 0;
            while perm[j] as usize != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        b
    }

    pub fn set_corners(&mut self, corners: u16) {
        self.cp = ALL_CORNERS;
        let mut corners = corners as usize;
        for j in 1..8 {
            let mut k = corners % (j + 1);
            corners /= j + 1;
            while k > 0 {
                rotate_right(&mut self.cp, 0, j);
                k -= 1;
            }
        }
    }

    /// The ud_edges coordinate: permutation of the 8 U and D face edges in
    /// positions 0..7, 0 <= ud_edges < 40320. Defined only while the slice
    /// edges are in the slice.
    pub fn get_ud_edges(&self) -> u16 {
        debug_assert!(self.ep[..8].iter().all(|e| (*e as usize) < 8));
        let mut perm = [0; 8];
        for (i, e) in self.ep[..8].iter().enumerate() {
            perm[i] = *e as usize;
        }
        let mut b = 0;
        for j in (1..8).rev() {
            let mut k = 0;
            while perm[j] != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        b
    }

    pub fn set_ud_edges(&mut self, ud_edges: u16) {
        self.ep = ALL_EDGES;
        let mut ud_edges = ud_edges as usize;
        for j in 1..8 {
            let mut k = ud_edges % (j + 1);
            ud_edges /= j + 1;
            while k > 0 {
                rotate_right(&mut self.ep[..8], 0, j);
                k -= 1;
            }
        }
    }

    /// The slice_perm coordinate: permutation of the four slice edges within
    /// positions 8..11, 0 <= slice_perm < 24. Defined only while the slice
    /// edges are in the slice.
    pub fn get_slice_perm(&self) -> u16 {
        debug_assert!(self.ep[8..].iter().all(|e| (*e as usize) >= 8));
        let mut perm = [0; 4];
        for (i, e) in self.ep[8..].iter().enumerate() {
            perm[i] = *e as usize - 8;
        }
        let mut b = 0;
        for j in (1..4).rev() {
            let mut k = 0;
            while perm[j] != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        b
    }

    pub fn set_slice_perm(&mut self, slice_perm: u16) {
        for i in 8..12 {
            self.ep[i] = ALL_EDGES[i];
        }
        let mut slice_perm = slice_perm as usize;
        for j in 1..4 {
            let mut k = slice_perm % (j + 1);
            slice_perm /= j + 1;
            while k > 0 {
                rotate_right(&mut self.ep[8..], 0, j);
                k -= 1;
            }
        }
    }
}

/// Rotate `p[l..=r]` one step to the left.
fn rotate_left<T: Copy>(p: &mut [T], l: usize, r: usize) {
    let temp = p[l];
    for i in l..r {
        p[i] = p[i + 1];
    }
    p[r] = temp;
}

/// Rotate `p[l..=r]` one step to the right.
fn rotate_right<T: Copy>(p: &mut [T], l: usize, r: usize) {
    let temp = p[r];
    for i in (l + 1..=r).rev() {
        p[i] = p[i - 1];
    }
    p[l] = temp;
}

/// Binomial coefficient C(n, k) with integer arithmetic only.
pub(crate) fn binomial(n: usize, k: usize) -> u16 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut b: u32 = 1;
    for i in 0..k {
        b = b * (n - i) as u32 / (i + 1) as u32;
    }
    b as u16
}

#[cfg(test)]
mod test {
    use crate::constants::*;
    use crate::cubie::*;
    use crate::moves::Move::*;
    use crate::scramble::scramble_from_str;

    #[test]
    fn test_turn_identities() {
        // X X X X == identity, X2 == X X, X' == X X X for every face
        for f in [U, R, F, D, L, B] {
            let x = CubieCube::default().apply_move(f);
            let x2 = CubieCube::default().apply_move(ALL_MOVES[f as usize + 1]);
            let x3 = CubieCube::default().apply_move(ALL_MOVES[f as usize + 2]);
            assert_eq!(x2, x.apply_move(f));
            assert_eq!(x3, x.apply_move(f).apply_move(f));
            assert_eq!(x.apply_move(f).apply_move(f).apply_move(f), CubieCube::default());
        }
    }

    #[test]
    fn test_state_invariants() {
        let scramble = scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap();
        let cc = CubieCube::default().apply_moves(&scramble);
        assert_eq!(cc.co.iter().map(|&o| o as u32).sum::<u32>() % 3, 0);
        assert_eq!(cc.eo.iter().map(|&o| o as u32).sum::<u32>() % 2, 0);
        let mut corners_seen = [false; 8];
        for c in cc.cp {
            corners_seen[c as usize] = true;
        }
        assert!(corners_seen.iter().all(|&seen| seen));
        let mut edges_seen = [false; 12];
        for e in cc.ep {
            edges_seen[e as usize] = true;
        }
        assert!(edges_seen.iter().all(|&seen| seen));
    }

    #[test]
    fn test_scramble_inverse_restores() {
        let scramble = scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap();
        let inverse: Vec<_> = scramble.iter().rev().map(|m| m.get_inverse()).collect();
        let cc = CubieCube::default().apply_moves(&scramble).apply_moves(&inverse);
        assert_eq!(cc, CubieCube::default());
    }

    #[test]
    fn test_coordinate_values() {
        assert_eq!(CubieCube::default().get_twist(), 0);
        assert_eq!(CubieCube::default().get_flip(), 0);
        assert_eq!(CubieCube::default().get_slice(), SOLVED_SLICE);
        let f = CubieCube::default().apply_move(F);
        assert_eq!(f.get_twist(), 412);
        assert_eq!(f.get_flip(), 550);
        assert_eq!(f.get_slice(), 461);
        let u = CubieCube::default().apply_move(U);
        assert_eq!(u.get_corners(), 6);
        assert_eq!(u.get_ud_edges(), 6);
        assert_eq!(u.get_slice_perm(), 0);
        let r2 = CubieCube::default().apply_move(R2);
        assert_eq!(r2.get_slice_perm(), 5);
    }

    #[test]
    fn test_twist_roundtrip() {
        let mut cc = CubieCube::default();
        for i in 0..N_TWIST as u16 {
            cc.set_twist(i);
            assert_eq!(cc.get_twist(), i);
            assert_eq!(cc.co.iter().map(|&o| o as u32).sum::<u32>() % 3, 0);
        }
    }

    #[test]
    fn test_flip_roundtrip() {
        let mut cc = CubieCube::default();
        for i in 0..N_FLIP as u16 {
            cc.set_flip(i);
            assert_eq!(cc.get_flip(), i);
            assert_eq!(cc.eo.iter().map(|&o| o as u32).sum::<u32>() % 2, 0);
        }
    }

    #[test]
    fn test_slice_roundtrip() {
        let mut cc = CubieCube::default();
        for i in 0..N_SLICE as u16 {
            cc.set_slice(i);
            assert_eq!(cc.get_slice(), i);
            let in_slice = cc.ep.iter().filter(|e| (**e as usize) >= 8).count();
            assert_eq!(in_slice, 4);
        }
    }

    #[test]
    fn test_corners_roundtrip() {
        let mut cc = CubieCube::default();
        for i in 0..N_CORNERS as u16 {
            cc.set_corners(i);
            assert_eq!(cc.get_corners(), i);
        }
    }

    #[test]
    fn test_ud_edges_roundtrip() {
        let mut cc = CubieCube::default();
        for i in 0..N_UD_EDGES as u16 {
            cc.set_ud_edges(i);
            assert_eq!(cc.get_ud_edges(), i);
        }
    }

    #[test]
    fn test_slice_perm_roundtrip() {
        let mut cc = CubieCube::default();
        for i in 0..N_SLICE_PERM as u16 {
            cc.set_slice_perm(i);
            assert_eq!(cc.get_slice_perm(), i);
        }
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(12, 4), 495);
        assert_eq!(binomial(11, 4), 330);
        assert_eq!(binomial(8, 1), 8);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(5, 0), 1);
    }
}
