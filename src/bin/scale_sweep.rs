use std::path::PathBuf;

use clap::{ArgAction, Parser};

use meal_adjuster_rs::logging::init_logging;
use meal_adjuster_rs::optimizer::{
    best_candidate, scan_scale_factors, ScaleSearch, SCALE_MAX, SCALE_MIN, SCALE_STEPS,
};
use meal_adjuster_rs::report::{print_topk, write_best_json, write_csv};
use meal_adjuster_rs::request::load_request;

#[derive(Parser, Debug)]
#[command(name = "scale_sweep")]
#[command(about = "Export the global scale-factor landscape for a meal request")]
struct Args {
    /// Path to the meal request JSON
    #[arg(long, default_value = "meal_request.json")]
    file: PathBuf,

    /// Output CSV file for every sampled factor
    #[arg(long, default_value = "scale_sweep.csv")]
    csv: PathBuf,

    /// Output JSON file for the best factor
    #[arg(long, default_value = "scale_best.json")]
    json: PathBuf,

    /// Number of top factors to display
    #[arg(long, default_value = "10")]
    topk: usize,

    /// Smallest sampled factor
    #[arg(long, default_value_t = SCALE_MIN)]
    min: f64,

    /// Largest sampled factor
    #[arg(long, default_value_t = SCALE_MAX)]
    max: f64,

    /// Number of samples
    #[arg(long, default_value_t = SCALE_STEPS)]
    steps: usize,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let request = match load_request(&args.file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading meal request {:?}: {}", args.file, e);
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} food items from {:?}",
        request.items.len(),
        args.file
    );

    let search = ScaleSearch {
        min_factor: args.min,
        max_factor: args.max,
        steps: args.steps,
    };
    if let Err(e) = search.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!(
        "Sampling {} factors over [{:.3}, {:.3}]",
        search.steps, search.min_factor, search.max_factor
    );

    let candidates = scan_scale_factors(&request.items, &request.target, &search);
    let best = best_candidate(&candidates);

    print_topk(&candidates, args.topk);

    println!("=== Best Factor ===");
    println!(
        "factor={:.3} deviation={:.3}%",
        best.factor, best.score
    );
    println!();

    if let Err(e) = write_csv(&candidates, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all samples to {:?}", args.csv);
    }

    // Recover the winner's totals
    let winner = candidates
        .iter()
        .find(|c| c.factor == best.factor && c.score == best.score);

    match winner {
        Some(candidate) => {
            if let Err(e) = write_best_json(candidate, candidates.len(), &args.json) {
                eprintln!("Error writing JSON: {}", e);
            } else {
                println!("Wrote best factor to {:?}", args.json);
            }
        }
        None => eprintln!("No finite candidate to save"),
    }
}
