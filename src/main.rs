use clap::Parser;
use std::path::Path;

use meal_adjuster_rs::cli::{AdjustArgs, Cli, Command};
use meal_adjuster_rs::error::Result;
use meal_adjuster_rs::interface::{
    display_adjustment, display_items, display_totals, prompt_target, prompt_yes_no,
};
use meal_adjuster_rs::logging::init_logging;
use meal_adjuster_rs::models::NutrientProfile;
use meal_adjuster_rs::optimizer::{
    adjust_meal, aggregate, deviation_score, zero_target_nutrients, OptimizerConfig,
    DEFAULT_TARGET_CALORIE, DEFAULT_TARGET_CARBS, DEFAULT_TARGET_FATS, DEFAULT_TARGET_PROTEIN,
};
use meal_adjuster_rs::request::{
    load_config, load_document, load_request, parse_request, require_file, save_result,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OptimizerConfig::default(),
    };
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Adjust(args) => cmd_adjust(&cli.file, config, &args),
        Command::Score => cmd_score(&cli.file),
    }
}

/// Run both optimization phases and report the adjusted meal.
fn cmd_adjust(file_path: &str, mut config: OptimizerConfig, args: &AdjustArgs) -> Result<()> {
    let path = Path::new(file_path);

    require_file(path)?;

    args.apply_overrides(&mut config.fine_tune);

    let mut document = load_document(path)?;

    // Fill a missing target with defaults so the prompt has something to offer
    if args.interactive && document.get("target").is_none() {
        if let Some(root) = document.as_object_mut() {
            root.insert(
                "target".to_string(),
                serde_json::to_value(NutrientProfile::new(
                    DEFAULT_TARGET_PROTEIN,
                    DEFAULT_TARGET_CARBS,
                    DEFAULT_TARGET_FATS,
                    DEFAULT_TARGET_CALORIE,
                ))?,
            );
        }
    }

    let mut request = parse_request(&document)?;

    if args.interactive {
        request.target = prompt_target(&request.target)?;
    }

    let target = request.target;
    let result = adjust_meal(request, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_adjustment(&result, &target);
    }

    if let Some(output) = &args.output {
        let out_path = Path::new(output);
        if args.interactive && out_path.exists() {
            let overwrite = prompt_yes_no(&format!("Overwrite {}?", output), false)?;
            if !overwrite {
                println!("Result not saved.");
                return Ok(());
            }
        }
        save_result(out_path, &result)?;
        println!("Result saved to {}.", output);
    }

    Ok(())
}

/// Show totals and deviation of the meal without adjusting it.
fn cmd_score(file_path: &str) -> Result<()> {
    let path = Path::new(file_path);

    require_file(path)?;

    let request = load_request(path)?;
    let totals = aggregate(&request.items);

    println!();
    display_items(&request.items);
    println!();
    display_totals(&totals, &request.target);
    println!(
        "Deviation: {:.2}%",
        deviation_score(&totals, &request.target)
    );

    let ignored = zero_target_nutrients(&request.target);
    if !ignored.is_empty() {
        let names: Vec<String> = ignored.iter().map(|n| n.to_string()).collect();
        println!("Ignored (zero target): {}", names.join(", "));
    }
    println!();

    Ok(())
}
