use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use spinners::{Spinner, Spinners};

use twophase::constants::TABLES_DIR;
use twophase::error::Error;
use twophase::scramble::{gen_scramble, scramble_to_str};
use twophase::solver::{solve_with_tables, SolverTables};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves a scramble with the two-phase search")]
    Solve {
        scramble: String,

        #[arg(short, long, default_value = TABLES_DIR)]
        tables: PathBuf,
    },

    #[command(about = "generates a random scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 25)]
        number: usize,
    },

    #[command(about = "builds the move and pruning tables")]
    GenTables {
        #[arg(short, long, default_value = TABLES_DIR)]
        tables: PathBuf,
    },
}

fn solve(scramble: &str, tables_dir: &PathBuf) -> Result<(), Error> {
    let tables = SolverTables::init(tables_dir)?;

    let start = Instant::now();
    let mut spinner = Spinner::new(Spinners::Dots, "Solving".to_owned());
    let result = solve_with_tables(scramble, &tables);
    spinner.stop_with_newline();

    match result {
        Ok(result) => {
            println!("Solution: {}", result.solution);
            println!("Move count: {}", result.length);
            println!("Time: {:.2?}", start.elapsed());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn scramble(number: usize) -> Result<(), Error> {
    let scramble = gen_scramble(number);
    println!("{}", scramble_to_str(&scramble));
    Ok(())
}

fn gen_tables(tables_dir: &PathBuf) -> Result<(), Error> {
    let start = Instant::now();
    let tables = SolverTables::generate()?;
    tables.save(tables_dir)?;
    println!(
        "Tables written to {} in {:.2?}",
        tables_dir.display(),
        start.elapsed()
    );
    Ok(())
}

fn main() {
    let program = Cli::parse();

    let result = match &program.command {
        Commands::Solve { scramble, tables } => solve(scramble, tables),
        Commands::Scramble { number } => scramble(*number),
        Commands::GenTables { tables } => gen_tables(tables),
    };

    if let Err(error) = result {
        eprintln!("ERROR: {error}");
        std::process::exit(1);
    }
}
