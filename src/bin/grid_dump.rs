//! Standalone grid inspection binary.
//!
//! Prints the raw cell grids extracted from one input file as
//! tab-separated rows, for diagnosing new source layouts before wiring
//! them into the pipeline.
//!
//! Usage: grid_dump <path_to_file>
//! Output: One block per grid on stdout, errors on stderr
//! Exit codes:
//!   0 - Success
//!   1 - Invalid arguments
//!   2 - Extraction error

use std::env;
use std::path::Path;
use std::process::ExitCode;

use portfolio_merge::extract::extract_file;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: grid_dump <path_to_file>");
        return ExitCode::from(1);
    }

    match extract_file(Path::new(&args[1])) {
        Ok(grids) => {
            for grid in grids {
                println!("# {} ({} rows)", grid.source, grid.cells.len());
                for row in &grid.cells {
                    println!("{}", row.join("\t"));
                }
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("EXTRACT_ERROR:{}", e);
            ExitCode::from(2)
        }
    }
}
