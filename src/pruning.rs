use std::collections::VecDeque;
use std::path::Path;
use std::fs;

use crate::constants::*;
use crate::error::Error;
use crate::moves::{Move, MoveTables};

/// The pruning tables cut the search tree during the search.
///
/// Every entry is the exact BFS distance in moves from the solved sub-state
/// to that coordinate, which makes each table an admissible lower bound for
/// its phase. One byte per coordinate.
pub struct PruningTables {
    pub twist_prune: Vec<u8>,
    pub flip_prune: Vec<u8>,
    pub slice_prune: Vec<u8>,
    pub corners_prune: Vec<u8>,
    pub ud_edges_prune: Vec<u8>,
    pub slice_perm_prune: Vec<u8>,
}

/// Sentinel for a coordinate the BFS has not reached yet.
const UNASSIGNED: u8 = 255;

impl PruningTables {
    /// Compute all pruning tables by breadth first search over the move
    /// tables. The phase 1 tables use all 18 moves, the phase 2 tables only
    /// the ten subgroup moves.
    pub fn generate(mv: &MoveTables) -> Result<Self, Error> {
        Ok(Self {
            twist_prune: bfs_fill(&mv.twist_move, N_TWIST, &ALL_MOVES, 0)?,
            flip_prune: bfs_fill(&mv.flip_move, N_FLIP, &ALL_MOVES, 0)?,
            slice_prune: bfs_fill(&mv.slice_move, N_SLICE, &ALL_MOVES, SOLVED_SLICE as usize)?,
            corners_prune: bfs_fill(&mv.corners_move, N_CORNERS, &PHASE2_MOVES, 0)?,
            ud_edges_prune: bfs_fill(&mv.ud_edges_move, N_UD_EDGES, &PHASE2_MOVES, 0)?,
            slice_perm_prune: bfs_fill(&mv.slice_perm_move, N_SLICE_PERM, &PHASE2_MOVES, 0)?,
        })
    }

    /// Write every pruning table into `dir` as raw bytes, one byte per
    /// coordinate, no header.
    pub fn save(&self, dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join("twist_prune"), &self.twist_prune)?;
        fs::write(dir.join("flip_prune"), &self.flip_prune)?;
        fs::write(dir.join("slice_prune"), &self.slice_prune)?;
        fs::write(dir.join("corners_prune"), &self.corners_prune)?;
        fs::write(dir.join("ud_edges_prune"), &self.ud_edges_prune)?;
        fs::write(dir.join("slice_perm_prune"), &self.slice_perm_prune)?;
        Ok(())
    }

    /// Load every pruning table from `dir`. A missing file or one whose size
    /// does not match its coordinate space exactly is an error.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        Ok(Self {
            twist_prune: read_prune_table(dir, "twist_prune", N_TWIST)?,
            flip_prune: read_prune_table(dir, "flip_prune", N_FLIP)?,
            slice_prune: read_prune_table(dir, "slice_prune", N_SLICE)?,
            corners_prune: read_prune_table(dir, "corners_prune", N_CORNERS)?,
            ud_edges_prune: read_prune_table(dir, "ud_edges_prune", N_UD_EDGES)?,
            slice_perm_prune: read_prune_table(dir, "slice_perm_prune", N_SLICE_PERM)?,
        })
    }
}

/// Fill one pruning table: FIFO BFS from `seed` over the given move set,
/// distances grow by one per layer. Every coordinate must be reached, a
/// leftover sentinel means the move table is inconsistent.
fn bfs_fill(
    move_table: &[u16],
    n_states: usize,
    moves: &[Move],
    seed: usize,
) -> Result<Vec<u8>, Error> {
    let mut dist = vec![UNASSIGNED; n_states];
    let mut queue = VecDeque::with_capacity(n_states);
    dist[seed] = 0;
    queue.push_back(seed);
    while let Some(coord) = queue.pop_front() {
        let d = dist[coord];
        for &m in moves {
            let next = move_table[N_MOVE * coord + m as usize] as usize;
            if dist[next] == UNASSIGNED {
                dist[next] = d + 1;
                queue.push_back(next);
            }
        }
    }
    if dist.contains(&UNASSIGNED) {
        return Err(Error::IncompleteTable);
    }
    Ok(dist)
}

fn read_prune_table(dir: &Path, fname: &str, n_states: usize) -> Result<Vec<u8>, Error> {
    let path = dir.join(fname);
    let bytes = fs::read(&path).map_err(|_| Error::TablesMissing(path.display().to_string()))?;
    if bytes.len() != n_states {
        return Err(Error::TablesMissing(path.display().to_string()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod test {
    use crate::constants::*;
    use crate::moves::MoveTables;
    use crate::pruning::*;

    lazy_static! {
        static ref MV: MoveTables = MoveTables::generate();
        static ref PR: PruningTables = PruningTables::generate(&MV).unwrap();
    }

    #[test]
    fn test_solved_entries_are_zero() {
        assert_eq!(PR.twist_prune[0], 0);
        assert_eq!(PR.flip_prune[0], 0);
        assert_eq!(PR.slice_prune[SOLVED_SLICE as usize], 0);
        assert_eq!(PR.corners_prune[0], 0);
        assert_eq!(PR.ud_edges_prune[0], 0);
        assert_eq!(PR.slice_perm_prune[0], 0);
    }

    #[test]
    fn test_tables_fully_assigned() {
        assert_eq!(PR.twist_prune.len(), N_TWIST);
        assert_eq!(PR.flip_prune.len(), N_FLIP);
        assert_eq!(PR.slice_prune.len(), N_SLICE);
        assert_eq!(PR.corners_prune.len(), N_CORNERS);
        assert_eq!(PR.ud_edges_prune.len(), N_UD_EDGES);
        assert_eq!(PR.slice_perm_prune.len(), N_SLICE_PERM);
        // distances stay tiny in every space, far below the sentinel
        assert!(PR.twist_prune.iter().all(|&d| d <= 10));
        assert!(PR.flip_prune.iter().all(|&d| d <= 10));
        assert!(PR.slice_prune.iter().all(|&d| d <= 10));
        assert!(PR.corners_prune.iter().all(|&d| d < 20));
        assert!(PR.ud_edges_prune.iter().all(|&d| d < 20));
        assert!(PR.slice_perm_prune.iter().all(|&d| d < 20));
    }

    #[test]
    fn test_phase1_triangle_inequality() {
        let tables = [
            (&PR.twist_prune, &MV.twist_move),
            (&PR.flip_prune, &MV.flip_move),
            (&PR.slice_prune, &MV.slice_move),
        ];
        for (prune, moves) in tables {
            for coord in 0..prune.len() {
                for m in ALL_MOVES {
                    let next = moves[N_MOVE * coord + m as usize] as usize;
                    let diff = prune[coord] as i16 - prune[next] as i16;
                    assert!(diff.abs() <= 1);
                }
            }
        }
    }

    #[test]
    fn test_phase2_triangle_inequality() {
        let tables = [
            (&PR.corners_prune, &MV.corners_move),
            (&PR.ud_edges_prune, &MV.ud_edges_move),
            (&PR.slice_perm_prune, &MV.slice_perm_move),
        ];
        for (prune, moves) in tables {
            for coord in 0..prune.len() {
                for m in PHASE2_MOVES {
                    let next = moves[N_MOVE * coord + m as usize] as usize;
                    let diff = prune[coord] as i16 - prune[next] as i16;
                    assert!(diff.abs() <= 1);
                }
            }
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("twophase_prune_roundtrip");
        PR.save(&dir).unwrap();
        let loaded = PruningTables::load(&dir).unwrap();
        assert_eq!(loaded.twist_prune, PR.twist_prune);
        assert_eq!(loaded.slice_perm_prune, PR.slice_perm_prune);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_tables_fails() {
        let dir = std::env::temp_dir().join("twophase_prune_missing");
        assert!(matches!(
            PruningTables::load(&dir),
            Err(crate::error::Error::TablesMissing(_))
        ));
    }
}
