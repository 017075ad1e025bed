use std::env;
use std::path::Path;
use std::process;
use std::time::Instant;

use twophase::constants::TABLES_DIR;
use twophase::solver::SolverTables;

/// Offline generator: build every move and pruning table and persist them
/// into the table directory (first argument, default `solver_tables/`).
fn main() {
    let dir = env::args().nth(1).unwrap_or_else(|| TABLES_DIR.to_string());
    let dir = Path::new(&dir);

    let start = Instant::now();
    println!("Creating move tables...");
    let tables = match SolverTables::generate() {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("table generation failed: {e}");
            process::exit(1);
        }
    };
    println!("Writing tables to {}...", dir.display());
    if let Err(e) = tables.save(dir) {
        eprintln!("could not write tables: {e}");
        process::exit(1);
    }
    println!("Done in {:.2?}.", start.elapsed());
}
