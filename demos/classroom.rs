//! Seats a 42-student classroom on a 6x7 grid.
//!
//! Without arguments this runs a built-in instance: two pinned students,
//! front-row and back-row groups, three keep-apart pairs and three
//! keep-close pairs. Pass `--input problem.json` to solve your own
//! instance instead.

use std::{fs, path::PathBuf};

use clap::Parser;
use prettytable::{Cell as TableCell, Row, Table};
use seatplan::{
    grid::Seating, model::objective::ObjectivePolicy, problem::SeatingProblem, solver,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding a SeatingProblem; defaults to the built-in classroom.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Seed for the randomized tie-break; omit for a fresh seating each run.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximize seated count instead of drawing random weights.
    #[arg(long)]
    uniform: bool,
}

fn classroom() -> SeatingProblem {
    SeatingProblem::new(6, 7, 42)
        // Two students with assigned seats.
        .fix(21, 2, 3)
        .fix(40, 3, 5)
        // Front-row group.
        .allow_rows(1, vec![0])
        .allow_rows(2, vec![0])
        .allow_rows(4, vec![0])
        .allow_rows(5, vec![0])
        .allow_rows(6, vec![0, 1])
        .allow_rows(9, vec![0, 1])
        .allow_rows(13, vec![0, 1])
        .allow_rows(15, vec![0, 1])
        // Back-row group.
        .allow_rows(10, vec![4, 5])
        .allow_rows(11, vec![5])
        .allow_rows(27, vec![5])
        .allow_rows(37, vec![5])
        // Pairs to keep apart.
        .keep_apart(5, 7, 3)
        .keep_apart(1, 21, 2)
        .keep_apart(5, 21, 4)
        // Pairs to keep close.
        .keep_close(12, 14, 2)
        .keep_close(39, 31, 6)
        .keep_close(15, 21, 4)
}

fn render(seating: &Seating) -> String {
    let mut table = Table::new();
    for row in seating.rows() {
        table.add_row(Row::new(
            row.iter()
                .map(|seat| match seat {
                    Some(entity) => TableCell::new(&format!("{entity:02}")),
                    None => TableCell::new("--"),
                })
                .collect(),
        ));
    }
    table.to_string()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // 1. Load or build the problem instance.
    let problem = match &args.input {
        Some(path) => {
            let raw = fs::read_to_string(path).expect("cannot read the problem file");
            serde_json::from_str(&raw).expect("the problem file is not a valid SeatingProblem")
        }
        None => classroom(),
    };

    // 2. Pick the objective policy.
    let policy = if args.uniform {
        ObjectivePolicy::UniformCoverage
    } else {
        ObjectivePolicy::RandomTieBreak { seed: args.seed }
    };

    // 3. Solve and print the grid.
    match solver::solve(&problem, policy) {
        Ok(result) => {
            println!("status: {:?}", result.status);
            println!("{}", render(&result.seating));
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
