use std::path::Path;

use serde::Serialize;

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::{Move, MoveTables};
use crate::pruning::PruningTables;
use crate::scramble::{scramble_from_str, scramble_to_str};

/// All tables the two phase search needs, built once and shared read-only.
pub struct SolverTables {
    pub mv: MoveTables,
    pub pr: PruningTables,
}

impl SolverTables {
    /// Compute everything in memory without touching the filesystem.
    pub fn generate() -> Result<Self, Error> {
        let mv = MoveTables::generate();
        let pr = PruningTables::generate(&mv)?;
        Ok(Self { mv, pr })
    }

    /// Load all tables from `dir`; any missing or wrong-sized file fails.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        Ok(Self {
            mv: MoveTables::load(dir)?,
            pr: PruningTables::load(dir)?,
        })
    }

    /// Persist all tables into `dir`.
    pub fn save(&self, dir: &Path) -> Result<(), Error> {
        self.mv.save(dir)?;
        self.pr.save(dir)?;
        Ok(())
    }

    /// Load the tables from `dir`, generating and saving them first when they
    /// are not there yet.
    pub fn init(dir: &Path) -> Result<Self, Error> {
        match Self::load(dir) {
            Ok(tables) => Ok(tables),
            Err(_) => {
                println!("Creating solver tables in {}...", dir.display());
                let tables = Self::generate()?;
                tables.save(dir)?;
                Ok(tables)
            }
        }
    }
}

/// A solved scramble: the input, the solution as a move string (empty when
/// the cube was already solved) and the number of moves.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionResult {
    pub scramble: String,
    pub solution: String,
    pub length: usize,
}

/// Iterative deepening A* over the coordinate tables.
///
/// The search state is coordinates only, stepped through the move tables; the
/// full cube is touched just once per phase to extract the start coordinates.
/// Phase 1 brings the cube into the subgroup where all orientations are zero
/// and the slice edges sit in the slice, phase 2 finishes the permutations
/// with the ten subgroup moves.
pub struct TwoPhaseSearch<'a> {
    mv: &'a MoveTables,
    pr: &'a PruningTables,
    sofar_phase1: Vec<Move>,
    sofar_phase2: Vec<Move>,
}

impl<'a> TwoPhaseSearch<'a> {
    pub fn new(tables: &'a SolverTables) -> Self {
        Self {
            mv: &tables.mv,
            pr: &tables.pr,
            sofar_phase1: Vec::new(),
            sofar_phase2: Vec::new(),
        }
    }

    /// Solve the given cube: phase 1, then phase 2 from the reached subgroup
    /// state, both move lists concatenated.
    pub fn solve_cube(&mut self, cc: &CubieCube) -> Result<Vec<Move>, Error> {
        let phase1 = self.solve_phase1(cc.get_twist(), cc.get_flip(), cc.get_slice())?;
        let cc2 = cc.apply_moves(&phase1);
        let phase2 = self.solve_phase2(
            cc2.get_corners(),
            cc2.get_ud_edges(),
            cc2.get_slice_perm(),
        )?;
        let mut solution = phase1;
        solution.extend(phase2);
        Ok(solution)
    }

    /// Lower bound on the moves needed to reach the phase 1 subgroup: the
    /// maximum of three admissible bounds is admissible.
    fn phase1_dist(&self, twist: u16, flip: u16, slice: u16) -> u8 {
        let t = self.pr.twist_prune[twist as usize];
        let f = self.pr.flip_prune[flip as usize];
        let s = self.pr.slice_prune[slice as usize];
        t.max(f).max(s)
    }

    /// Lower bound on the moves needed to finish phase 2.
    fn phase2_dist(&self, corners: u16, ud_edges: u16, slice_perm: u16) -> u8 {
        let c = self.pr.corners_prune[corners as usize];
        let u = self.pr.ud_edges_prune[ud_edges as usize];
        let s = self.pr.slice_perm_prune[slice_perm as usize];
        c.max(u).max(s)
    }

    /// Iterative deepening driver for phase 1: run depth limited DFS with a
    /// growing bound, give up past [`PHASE1_DEPTH_LIMIT`].
    pub fn solve_phase1(&mut self, twist: u16, flip: u16, slice: u16) -> Result<Vec<Move>, Error> {
        let mut bound = self.phase1_dist(twist, flip, slice);
        loop {
            if bound > PHASE1_DEPTH_LIMIT {
                return Err(Error::Phase1DepthExceeded);
            }
            self.sofar_phase1.clear();
            match self.search_phase1(twist, flip, slice, 0, bound) {
                None => return Ok(self.sofar_phase1.clone()),
                Some(u8::MAX) => return Err(Error::PhaseUnreachable),
                Some(next_bound) => bound = next_bound,
            }
        }
    }

    /// Iterative deepening driver for phase 2, restricted to the subgroup
    /// moves, giving up past [`PHASE2_DEPTH_LIMIT`].
    pub fn solve_phase2(
        &mut self,
        corners: u16,
        ud_edges: u16,
        slice_perm: u16,
    ) -> Result<Vec<Move>, Error> {
        let mut bound = self.phase2_dist(corners, ud_edges, slice_perm);
        loop {
            if bound > PHASE2_DEPTH_LIMIT {
                return Err(Error::Phase2DepthExceeded);
            }
            self.sofar_phase2.clear();
            match self.search_phase2(corners, ud_edges, slice_perm, 0, bound) {
                None => return Ok(self.sofar_phase2.clone()),
                Some(u8::MAX) => return Err(Error::PhaseUnreachable),
                Some(next_bound) => bound = next_bound,
            }
        }
    }

    /// Depth limited DFS for phase 1. Returns `None` with the solution left
    /// in `sofar_phase1` when the subgroup is reached, otherwise the minimum
    /// f value that exceeded the bound, for the next deepening round.
    fn search_phase1(
        &mut self,
        twist: u16,
        flip: u16,
        slice: u16,
        g: u8,
        bound: u8,
    ) -> Option<u8> {
        let h = self.phase1_dist(twist, flip, slice);
        if g + h > bound {
            return Some(g + h);
        }
        if h == 0 {
            return None;
        }
        let mut min_exceeded = u8::MAX;
        for m in ALL_MOVES {
            // a second move on the face just turned is always redundant,
            // which also rules out the direct inverse
            if let Some(&last) = self.sofar_phase1.last() {
                if m.is_same_layer(last) {
                    continue;
                }
            }
            let mi = m as usize;
            let twist1 = self.mv.twist_move[N_MOVE * twist as usize + mi];
            let flip1 = self.mv.flip_move[N_MOVE * flip as usize + mi];
            let slice1 = self.mv.slice_move[N_MOVE * slice as usize + mi];
            self.sofar_phase1.push(m);
            match self.search_phase1(twist1, flip1, slice1, g + 1, bound) {
                None => return None,
                Some(f) => min_exceeded = min_exceeded.min(f),
            }
            self.sofar_phase1.pop();
        }
        Some(min_exceeded)
    }

    /// Depth limited DFS for phase 2, restricted to the ten subgroup moves.
    fn search_phase2(
        &mut self,
        corners: u16,
        ud_edges: u16,
        slice_perm: u16,
        g: u8,
        bound: u8,
    ) -> Option<u8> {
        let h = self.phase2_dist(corners, ud_edges, slice_perm);
        if g + h > bound {
            return Some(g + h);
        }
        if h == 0 {
            return None;
        }
        let mut min_exceeded = u8::MAX;
        for m in PHASE2_MOVES {
            if let Some(&last) = self.sofar_phase2.last() {
                if m.is_same_layer(last) {
                    continue;
                }
            }
            let mi = m as usize;
            let corners1 = self.mv.corners_move[N_MOVE * corners as usize + mi];
            let ud_edges1 = self.mv.ud_edges_move[N_MOVE * ud_edges as usize + mi];
            let slice_perm1 = self.mv.slice_perm_move[N_MOVE * slice_perm as usize + mi];
            self.sofar_phase2.push(m);
            match self.search_phase2(corners1, ud_edges1, slice_perm1, g + 1, bound) {
                None => return None,
                Some(f) => min_exceeded = min_exceeded.min(f),
            }
            self.sofar_phase2.pop();
        }
        Some(min_exceeded)
    }
}

/// Solve a scramble using the given tables.
///
/// The scramble is applied to a solved cube, phase 1 runs on the resulting
/// state, phase 2 on the state after the phase 1 moves. Parsing errors are
/// reported before any search starts.
pub fn solve_with_tables(scramble: &str, tables: &SolverTables) -> Result<SolutionResult, Error> {
    let moves = scramble_from_str(scramble)?;
    let cc = CubieCube::default().apply_moves(&moves);
    let mut search = TwoPhaseSearch::new(tables);
    let solution = search.solve_cube(&cc)?;
    Ok(SolutionResult {
        scramble: scramble.trim().to_string(),
        solution: scramble_to_str(&solution),
        length: solution.len(),
    })
}

/// Solve a scramble with process-wide tables, generated into the default
/// table directory on first use.
pub fn solve(scramble: &str) -> Result<SolutionResult, Error> {
    lazy_static! {
        static ref SOLVERTABLES: SolverTables = SolverTables::init(Path::new(TABLES_DIR))
            .expect("solver tables could not be loaded or generated");
    }
    solve_with_tables(scramble, &SOLVERTABLES)
}
