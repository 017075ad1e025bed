//! # twophase
//! `twophase`: crate for manipulating and solving the 3x3 Rubik's cube with a
//! two-phase IDA* search over precomputed coordinate tables.

#[macro_use]
extern crate lazy_static;

/// Module containing functions for scrambling the cube.
pub mod scramble;

/// Error define.
pub mod error;

/// Module containing 3x3 cube constants.
pub mod constants;

/// Module for represent a cube on the cubie level.
pub mod cubie;

/// Module for represent move and create/load move tables.
pub mod moves;

/// Module for create/load pruning tables. The pruning tables cut the search tree during the search.
pub mod pruning;

/// Module for Solver.
pub mod solver;
